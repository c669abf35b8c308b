/*!

A [`DeploymentTarget`] that records what would have happened to a cluster so that addons and
blueprints can be tested in the absence of Kubernetes and Helm.

!*/

use blueprint_model::error::InstallRejectedSnafu;
use blueprint_model::{ClusterInfo, DeploymentTarget, HelmChart, InstallationHandle, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

#[derive(Default)]
struct ClusterState {
    namespaces: BTreeSet<String>,
    namespace_requests: usize,
    installs: Vec<HelmChart>,
    revisions: BTreeMap<String, u64>,
}

pub struct MockTarget {
    cluster_info: ClusterInfo,
    /// Installs of this release are rejected.
    reject_release: Option<String>,
    state: Mutex<ClusterState>,
}

impl MockTarget {
    pub fn new(region: &str) -> Self {
        Self {
            cluster_info: ClusterInfo {
                cluster_name: format!("mock-{}", region),
                region: region.to_string(),
                account: None,
            },
            reject_release: None,
            state: Default::default(),
        }
    }

    pub fn rejecting(region: &str, release: &str) -> Self {
        Self {
            reject_release: Some(release.to_string()),
            ..Self::new(region)
        }
    }

    pub fn namespaces(&self) -> Vec<String> {
        self.state.lock().unwrap().namespaces.iter().cloned().collect()
    }

    pub fn namespace_requests(&self) -> usize {
        self.state.lock().unwrap().namespace_requests
    }

    pub fn installs(&self) -> Vec<HelmChart> {
        self.state.lock().unwrap().installs.clone()
    }

    pub fn installed_releases(&self) -> Vec<String> {
        self.installs()
            .into_iter()
            .map(|chart| chart.identity.release)
            .collect()
    }
}

#[async_trait::async_trait]
impl DeploymentTarget for MockTarget {
    fn cluster_info(&self) -> &ClusterInfo {
        &self.cluster_info
    }

    async fn create_namespace(&self, namespace: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.namespace_requests += 1;
        state.namespaces.insert(namespace.to_string());
        Ok(())
    }

    async fn install_chart(&self, chart: HelmChart) -> Result<InstallationHandle> {
        let identity = chart.identity.clone();
        if self.reject_release.as_deref() == Some(identity.release.as_str()) {
            return InstallRejectedSnafu {
                release: identity.release,
                reason: "mock rejection",
            }
            .fail();
        }
        let mut state = self.state.lock().unwrap();
        if !state.namespaces.contains(&identity.namespace) {
            return InstallRejectedSnafu {
                release: identity.release,
                reason: format!("namespace '{}' not found", identity.namespace),
            }
            .fail();
        }
        let revision = state.revisions.entry(identity.release.clone()).or_default();
        *revision += 1;
        let revision = *revision;
        state.installs.push(chart);
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
