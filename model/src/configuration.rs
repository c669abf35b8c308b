use crate::error::{self, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use snafu::ResultExt;
use std::fmt::Debug;

/// The `Configuration` trait is for structs that carry typed Helm values or addon options, which
/// end up as a free-form object in the chart values:
///
/// ```yaml
/// pilot:
///   autoscaleEnabled: true
///   replicaCount: 2
/// ```
///
/// The traits aggregated by the `Configuration` trait are typical of "plain old data" types and
/// provide a way for callers to strongly type values which are otherwise unconstrained by a chart.
///
pub trait Configuration:
    Serialize + DeserializeOwned + Clone + Debug + Default + Send + Sync + Sized + 'static
{
    /// Convert the `Configuration` object to a serde `Map`.
    fn into_map(self) -> Result<Map<String, Value>> {
        match self.into_value()? {
            Value::Object(map) => Ok(map),
            _ => error::ConfigWrongValueTypeSnafu {}.fail(),
        }
    }

    /// Convert the `Configuration` object to a serde `Value`.
    fn into_value(self) -> Result<Value> {
        serde_json::to_value(self).context(error::ConfigSerializationSnafu)
    }
}
