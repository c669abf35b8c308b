/*!

This test module provides a mock [`DeploymentTarget`] that demonstrates what can be done to test
addons without a cluster. It keeps the namespaces and releases a real cluster would have and
records every chart that was submitted.

!*/

use blueprint_model::error::InstallRejectedSnafu;
use blueprint_model::{ClusterInfo, DeploymentTarget, HelmChart, InstallationHandle, Result};
use std::collections::BTreeMap;
use std::sync::Mutex;

#[derive(Default)]
struct Cluster {
    /// Namespace name -> number of times its creation was requested.
    namespaces: BTreeMap<String, usize>,
    /// Release name -> current revision.
    releases: BTreeMap<String, u64>,
    submitted: Vec<HelmChart>,
}

pub(crate) struct MockCluster {
    info: ClusterInfo,
    cluster: Mutex<Cluster>,
}

impl MockCluster {
    pub(crate) fn new(cluster_name: &str, region: &str) -> Self {
        Self {
            info: ClusterInfo {
                cluster_name: cluster_name.to_string(),
                region: region.to_string(),
                account: Some("123456789012".to_string()),
            },
            cluster: Mutex::new(Cluster::default()),
        }
    }

    pub(crate) fn namespace_requests(&self, namespace: &str) -> usize {
        self.cluster
            .lock()
            .unwrap()
            .namespaces
            .get(namespace)
            .copied()
            .unwrap_or_default()
    }

    pub(crate) fn submitted(&self) -> Vec<HelmChart> {
        self.cluster.lock().unwrap().submitted.clone()
    }
}

#[async_trait::async_trait]
impl DeploymentTarget for MockCluster {
    fn cluster_info(&self) -> &ClusterInfo {
        &self.info
    }

    async fn create_namespace(&self, namespace: &str) -> Result<()> {
        *self
            .cluster
            .lock()
            .unwrap()
            .namespaces
            .entry(namespace.to_string())
            .or_default() += 1;
        Ok(())
    }

    async fn install_chart(&self, chart: HelmChart) -> Result<InstallationHandle> {
        let mut cluster = self.cluster.lock().unwrap();
        let identity = chart.identity.clone();
        if !cluster.namespaces.contains_key(&identity.namespace) {
            return InstallRejectedSnafu {
                release: identity.release,
                reason: format!("namespaces \"{}\" not found", identity.namespace),
            }
            .fail();
        }
        // The control plane needs the CRDs from the base chart.
        if identity.chart == "istiod" && !cluster.releases.contains_key("istio-base") {
            return InstallRejectedSnafu {
                release: identity.release,
                reason: "no matches for kind \"EnvoyFilter\"",
            }
            .fail();
        }
        let revision = {
            let revision = cluster.releases.entry(identity.release.clone()).or_default();
            *revision += 1;
            *revision
        };
        cluster.submitted.push(chart);
        Ok(InstallationHandle {
            release: identity.release,
            namespace: identity.namespace,
            chart: identity.chart,
            chart_version: identity.version,
            revision,
            status: "deployed".to_string(),
        })
    }
}
