use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// The identity of an addon: which chart to install, under which release name, into which
/// namespace. The `name` is what other addons refer to when they declare a dependency.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddonIdentity {
    pub name: String,
    pub release: String,
    pub namespace: String,
    pub chart: String,
    #[serde(deserialize_with = "crate::serde_utils::string_or_number")]
    pub version: String,
    pub repository: String,
}

impl AddonIdentity {
    /// Replace each field of `self` for which `overrides` has a value.
    pub fn with_overrides(self, overrides: IdentityOverrides) -> Self {
        Self {
            name: overrides.name.unwrap_or(self.name),
            release: overrides.release.unwrap_or(self.release),
            namespace: overrides.namespace.unwrap_or(self.namespace),
            chart: overrides.chart.unwrap_or(self.chart),
            version: overrides.version.unwrap_or(self.version),
            repository: overrides.repository.unwrap_or(self.repository),
        }
    }

    /// Whether the chart is pulled from an OCI registry rather than an HTTP chart repository.
    pub fn is_oci(&self) -> bool {
        self.repository.starts_with("oci://")
    }
}

impl Display for AddonIdentity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}/{} chart {}@{})",
            self.name, self.namespace, self.release, self.chart, self.version
        )
    }
}

/// Caller-supplied replacements for the fields of an addon's default [`AddonIdentity`].
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::serde_utils::optional_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
}
