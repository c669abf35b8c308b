use crate::{AddonIdentity, Result, Values};
use serde::{Deserialize, Serialize};

/// Identifies the cluster that addons are deployed into. Baseline values that depend on where an
/// addon runs, such as the cloud region, are read from here.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterInfo {
    pub cluster_name: String,
    pub region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
}

/// A chart installation request with fully merged values.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct HelmChart {
    pub identity: AddonIdentity,
    pub values: Values,
}

/// The result of a submitted chart installation.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallationHandle {
    pub release: String,
    pub namespace: String,
    pub chart: String,
    pub chart_version: String,
    /// The release revision reported by the installer. Re-installing the same release produces a
    /// new revision of the same release rather than an error.
    pub revision: u64,
    pub status: String,
}

/// A provisioned cluster that addons can be installed into. [`crate::clients::KubeTarget`] talks
/// to a real cluster; tests provide their own implementation.
#[async_trait::async_trait]
pub trait DeploymentTarget: Send + Sync {
    /// The identity of the cluster behind this target.
    fn cluster_info(&self) -> &ClusterInfo;

    /// Make sure `namespace` exists. A namespace that already exists is not an error.
    async fn create_namespace(&self, namespace: &str) -> Result<()>;

    /// Install or upgrade the release described by `chart`.
    async fn install_chart(&self, chart: HelmChart) -> Result<InstallationHandle>;
}
