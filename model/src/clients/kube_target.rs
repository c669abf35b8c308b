use super::helm::Helm;
use super::http_status_code::HttpStatusCode;
use crate::constants::{HELM_BINARY_ENV, LABEL_MANAGED_BY, MANAGED_BY};
use crate::error::{self, Result};
use crate::{ClusterInfo, DeploymentTarget, HelmChart, InstallationHandle};
use k8s_openapi::api::core::v1::Namespace;
use kube::api::{ObjectMeta, PostParams};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Api, Client, Config};
use log::{debug, info};
use maplit::btreemap;
use snafu::ResultExt;
use std::path::{Path, PathBuf};

/// A [`DeploymentTarget`] backed by a live cluster. Namespaces are managed through the Kubernetes
/// API and charts are installed by running `helm` against the same kubeconfig.
pub struct KubeTarget {
    k8s_client: Client,
    cluster_info: ClusterInfo,
    helm: Helm,
}

impl KubeTarget {
    /// Create a `KubeTarget` from the path to a kubeconfig file.
    pub async fn new_from_kubeconfig_path(
        kubeconfig_path: &Path,
        cluster_info: ClusterInfo,
    ) -> Result<Self> {
        let kubeconfig = Kubeconfig::read_from(kubeconfig_path).context(error::ConfigReadSnafu)?;
        let config = Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
            .await
            .context(error::ClientCreateKubeconfigSnafu)?;
        Ok(Self {
            k8s_client: config.try_into().context(error::KubeSnafu {
                action: "create client from `Kubeconfig`",
            })?,
            cluster_info,
            helm: Helm::new(helm_binary(), Some(kubeconfig_path.to_path_buf())),
        })
    }

    /// Create a `KubeTarget` using the default `kube::Client`.
    pub async fn new(cluster_info: ClusterInfo) -> Result<Self> {
        Ok(Self {
            k8s_client: Client::try_default().await.context(error::KubeSnafu {
                action: "create client from `Kubeconfig`",
            })?,
            cluster_info,
            helm: Helm::new(helm_binary(), None),
        })
    }
}

/// The `helm` binary to run, `helm` from `PATH` unless overridden.
fn helm_binary() -> PathBuf {
    std::env::var_os(HELM_BINARY_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("helm"))
}

#[async_trait::async_trait]
impl DeploymentTarget for KubeTarget {
    fn cluster_info(&self) -> &ClusterInfo {
        &self.cluster_info
    }

    async fn create_namespace(&self, namespace: &str) -> Result<()> {
        let api: Api<Namespace> = Api::all(self.k8s_client.clone());
        let existing = api
            .get_opt(namespace)
            .await
            .context(error::NamespaceSnafu { namespace })?;
        if existing.is_some() {
            debug!("Namespace '{}' already exists", namespace);
            return Ok(());
        }

        let ns = Namespace {
            metadata: ObjectMeta {
                name: Some(namespace.to_string()),
                labels: Some(btreemap! {
                    LABEL_MANAGED_BY.to_string() => MANAGED_BY.to_string(),
                }),
                ..ObjectMeta::default()
            },
            ..Namespace::default()
        };
        match api.create(&PostParams::default(), &ns).await {
            Ok(_) => {
                info!("Created namespace '{}'", namespace);
                Ok(())
            }
            // Someone else created it between our get and create.
            Err(e) if e.is_conflict() => Ok(()),
            Err(e) => Err(e).context(error::NamespaceSnafu { namespace }),
        }
    }

    async fn install_chart(&self, chart: HelmChart) -> Result<InstallationHandle> {
        self.helm.upgrade_install(&chart).await
    }
}
