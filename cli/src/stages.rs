use anyhow::Result;
use blueprint_addons::Pipeline;
use clap::Parser;

/// List the waves and stages of the pipeline along with the cluster each stage deploys to.
#[derive(Debug, Parser)]
pub(crate) struct Stages {}

impl Stages {
    pub(crate) fn run(self, pipeline: Pipeline) -> Result<()> {
        println!("Pipeline: {}", pipeline.name());
        if let Some(owner) = pipeline.owner() {
            println!("Owner: {}", owner);
        }
        if let Some(repository) = pipeline.repository() {
            println!(
                "Repository: {} ({})",
                repository.repo_url, repository.target_revision
            );
        }
        let mut wave = None;
        for stage in pipeline.stages() {
            if wave != Some(&stage.wave) {
                println!("Wave '{}':", stage.wave);
                wave = Some(&stage.wave);
            }
            let cluster = stage.blueprint.cluster_info();
            println!(
                "  {:<12} {:<16} {}",
                stage.id, cluster.region, cluster.cluster_name
            );
        }
        Ok(())
    }
}
