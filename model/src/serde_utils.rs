use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Accepts a string, or a number written without quotes, for a `String` field. YAML reads
/// `version: 1.14` as a float, which a flattened or internally tagged struct would otherwise reject.
/// Numbers are formatted back with `to_string`, so `1.10` becomes `"1.1"` and must be quoted.
pub(crate) fn string_or_number<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    d.deserialize_any(StringOrNumber)
}

/// [`string_or_number`] for an optional field.
pub(crate) fn optional_string_or_number<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Lenient(#[serde(deserialize_with = "string_or_number")] String);

    Ok(Option::<Lenient>::deserialize(d)?.map(|lenient| lenient.0))
}

struct StringOrNumber;

impl<'de> Visitor<'de> for StringOrNumber {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or a number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
        Ok(v.to_string())
    }
}
