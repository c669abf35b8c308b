use anyhow::{Context, Result};
use blueprint_addons::{Pipeline, Stage};
use clap::Parser;

/// Show the waves in which addons are installed. Addons in the same wave have no dependencies on
/// each other.
#[derive(Debug, Parser)]
pub(crate) struct Plan {
    /// Only show this stage.
    #[clap(long, short)]
    stage: Option<String>,
}

impl Plan {
    pub(crate) fn run(self, pipeline: Pipeline) -> Result<()> {
        let stages: Vec<&Stage> = match &self.stage {
            Some(id) => vec![pipeline
                .stage(id)
                .context(format!("Unable to plan stage '{}'", id))?],
            None => pipeline.stages().iter().collect(),
        };
        for stage in stages {
            println!("{} ({}):", stage.id, stage.blueprint.region());
            let waves = stage
                .blueprint
                .install_order()
                .context(format!("Unable to order addons of stage '{}'", stage.id))?;
            for (i, wave) in waves.iter().enumerate() {
                let addons: Vec<String> = wave
                    .iter()
                    .map(|addon| addon.identity().to_string())
                    .collect();
                println!("  {}. {}", i + 1, addons.join(", "));
            }
        }
        Ok(())
    }
}
