use crate::target::{ClusterInfo, DeploymentTarget, HelmChart, InstallationHandle};
use crate::values::{merge_values, Values};
use crate::{AddonIdentity, Result};
use log::{debug, info};

/// You implement the [`Addon`] trait for each installable unit of cluster functionality. An addon
/// has a fixed [`AddonIdentity`], computes a baseline values tree from its typed options, and
/// carries a caller-supplied overlay that is deep-merged on top of the baseline when it is
/// deployed.
///
/// Ordering between addons is declared with [`Addon::depends_on`] and honored by whoever schedules
/// the installs (see [`crate::install_order`]). The addon itself never waits on other addons.
#[async_trait::async_trait]
pub trait Addon: Send + Sync {
    /// The chart, release and namespace this addon installs.
    fn identity(&self) -> &AddonIdentity;

    /// Names of the addons that must be installed before this one.
    fn depends_on(&self) -> Vec<String> {
        Vec::new()
    }

    /// The values computed from the addon's own options and the cluster it is deployed to.
    fn baseline(&self, cluster: &ClusterInfo) -> Result<Values>;

    /// The caller-supplied values that take precedence over the baseline.
    fn overlay(&self) -> Values;

    /// The final values: `overlay` deep-merged on top of `baseline`.
    fn values(&self, cluster: &ClusterInfo) -> Result<Values> {
        Ok(merge_values(self.baseline(cluster)?, self.overlay()))
    }

    /// The installation request for `cluster`.
    fn chart(&self, cluster: &ClusterInfo) -> Result<HelmChart> {
        Ok(HelmChart {
            identity: self.identity().clone(),
            values: self.values(cluster)?,
        })
    }

    /// Install the addon into `target`. The namespace is created if needed, then the merged values
    /// are submitted to the target's chart installer. Errors from the target are returned as-is.
    async fn deploy(&self, target: &dyn DeploymentTarget) -> Result<InstallationHandle> {
        let identity = self.identity();
        target.create_namespace(&identity.namespace).await?;
        let chart = self.chart(target.cluster_info())?;
        debug!(
            "Values for '{}': {}",
            identity.name,
            serde_json::Value::Object(chart.values.clone())
        );
        info!("Installing {}", identity);
        let handle = target.install_chart(chart).await?;
        info!(
            "Release '{}' is at revision {} ({})",
            handle.release, handle.revision, handle.status
        );
        Ok(handle)
    }
}
