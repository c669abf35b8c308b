use anyhow::{Context, Result};
use blueprint_addons::Pipeline;
use blueprint_model::clients::KubeTarget;
use clap::Parser;
use log::info;
use std::path::PathBuf;

/// Deploy the addons of a stage to the cluster of the current kubeconfig (or `--kubeconfig`).
#[derive(Debug, Parser)]
pub(crate) struct Deploy {
    /// The stage to deploy.
    #[clap(long, short)]
    stage: String,

    /// Output the installation results in JSON format.
    #[clap(long = "json")]
    json: bool,
}

impl Deploy {
    pub(crate) async fn run(self, pipeline: Pipeline, kubeconfig: Option<PathBuf>) -> Result<()> {
        let stage = pipeline
            .stage(&self.stage)
            .context(format!("Unable to deploy stage '{}'", self.stage))?;
        let cluster = stage.blueprint.cluster_info();
        let target = match kubeconfig {
            Some(path) => KubeTarget::new_from_kubeconfig_path(&path, cluster)
                .await
                .context(format!(
                    "Unable to create deployment target from path '{:?}'",
                    path
                ))?,
            None => KubeTarget::new(cluster)
                .await
                .context("Unable to create default deployment target")?,
        };

        info!("Deploying stage '{}' of wave '{}'", stage.id, stage.wave);
        let handles = stage.blueprint.deploy(&target).await.context(format!(
            "Unable to deploy stage '{}'. (Some releases may have been installed)",
            stage.id
        ))?;

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&handles)
                    .context("Could not create string from installation results.")?
            );
        } else {
            for handle in &handles {
                println!(
                    "{}/{}: {}@{} revision {} ({})",
                    handle.namespace,
                    handle.release,
                    handle.chart,
                    handle.chart_version,
                    handle.revision,
                    handle.status
                );
            }
            println!("Stage '{}' was successfully deployed.", stage.id);
        }
        Ok(())
    }
}
