/*!

Runs the `helm` binary to install or upgrade a release.

!*/

use crate::error::{self, Result};
use crate::{HelmChart, InstallationHandle};
use log::{debug, trace};
use serde::Deserialize;
use snafu::{ensure, ResultExt};
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// The fields of `helm upgrade --output json` that end up in an [`InstallationHandle`].
#[derive(Debug, Deserialize)]
struct HelmRelease {
    name: String,
    namespace: String,
    version: u64,
    #[serde(default)]
    info: HelmReleaseInfo,
    #[serde(default)]
    chart: HelmReleaseChart,
}

#[derive(Debug, Default, Deserialize)]
struct HelmReleaseInfo {
    #[serde(default)]
    status: String,
}

#[derive(Debug, Default, Deserialize)]
struct HelmReleaseChart {
    #[serde(default)]
    metadata: HelmChartMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct HelmChartMetadata {
    #[serde(default)]
    name: String,
    #[serde(default)]
    version: String,
}

/// Invokes `helm` against the cluster described by `kubeconfig`, or the default kubeconfig when
/// `None`.
#[derive(Clone, Debug)]
pub(crate) struct Helm {
    binary: PathBuf,
    kubeconfig: Option<PathBuf>,
}

impl Helm {
    pub(crate) fn new(binary: PathBuf, kubeconfig: Option<PathBuf>) -> Self {
        Self { binary, kubeconfig }
    }

    /// `helm upgrade --install` the release described by `chart`. Running this again with the same
    /// chart converges on the same release.
    pub(crate) async fn upgrade_install(&self, chart: &HelmChart) -> Result<InstallationHandle> {
        let identity = &chart.identity;

        let mut values_file = tempfile::Builder::new()
            .prefix(&format!("{}-values", identity.release))
            .suffix(".yaml")
            .tempfile()
            .context(error::IoSnafu {
                action: "create values file",
            })?;
        let yaml = serde_yaml::to_string(&chart.values).context(error::SerdeYamlSnafu {
            action: "serialize chart values",
        })?;
        values_file
            .write_all(yaml.as_bytes())
            .context(error::IoSnafu {
                action: "write values file",
            })?;

        let args = upgrade_args(chart, values_file.path());
        debug!("Running {} {}", self.binary.display(), args.join(" "));

        let mut command = Command::new(&self.binary);
        command.args(&args);
        if let Some(kubeconfig) = &self.kubeconfig {
            command.env("KUBECONFIG", kubeconfig);
        }
        let output = command.output().await.context(error::IoSnafu {
            action: format!("run helm for release '{}'", identity.release),
        })?;

        ensure!(
            output.status.success(),
            error::InstallRejectedSnafu {
                release: &identity.release,
                reason: format!(
                    "helm exited with {}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            }
        );
        trace!("helm output: {}", String::from_utf8_lossy(&output.stdout));

        parse_release(&identity.release, &output.stdout)
    }
}

/// The arguments for `helm upgrade --install`. HTTP repositories are passed with `--repo`, OCI
/// registries as a chart reference.
fn upgrade_args(chart: &HelmChart, values_file: &Path) -> Vec<String> {
    let identity = &chart.identity;
    let mut args = vec![
        "upgrade".to_string(),
        "--install".to_string(),
        identity.release.clone(),
    ];
    if identity.is_oci() {
        args.push(format!(
            "{}/{}",
            identity.repository.trim_end_matches('/'),
            identity.chart
        ));
    } else {
        args.push(identity.chart.clone());
        args.push("--repo".to_string());
        args.push(identity.repository.clone());
    }
    args.extend([
        "--version".to_string(),
        identity.version.clone(),
        "--namespace".to_string(),
        identity.namespace.clone(),
        "--values".to_string(),
        values_file.display().to_string(),
        "--output".to_string(),
        "json".to_string(),
    ]);
    args
}

fn parse_release(release: &str, stdout: &[u8]) -> Result<InstallationHandle> {
    let parsed: HelmRelease =
        serde_json::from_slice(stdout).context(error::HelmOutputSnafu { release })?;
    Ok(InstallationHandle {
        release: parsed.name,
        namespace: parsed.namespace,
        chart: parsed.chart.metadata.name,
        chart_version: parsed.chart.metadata.version,
        revision: parsed.version,
        status: parsed.info.status,
    })
}
