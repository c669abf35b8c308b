use anyhow::{Context, Result};
use blueprint_addons::Pipeline;
use blueprint_model::values::get_path;
use clap::Parser;
use serde_json::{Map, Value};

/// Print the values that each addon of a stage would be installed with, without touching a
/// cluster.
#[derive(Debug, Parser)]
pub(crate) struct Render {
    /// The stage to render.
    #[clap(long, short)]
    stage: String,

    /// Only render this addon.
    #[clap(long, short)]
    addon: Option<String>,

    /// Only render the value found at this dot-separated path, e.g. `global.istiod`. Addons that
    /// have nothing at the path render as `null`.
    #[clap(long)]
    path: Option<String>,

    /// Output the values in JSON format.
    #[clap(long = "json")]
    json: bool,
}

impl Render {
    pub(crate) fn run(self, pipeline: Pipeline) -> Result<()> {
        let stage = pipeline
            .stage(&self.stage)
            .context(format!("Unable to render stage '{}'", self.stage))?;
        let blueprint = &stage.blueprint;
        let cluster = blueprint.cluster_info();

        let addons = match &self.addon {
            Some(name) => vec![blueprint.addon(name).context(format!(
                "Stage '{}' has no addon named '{}'",
                stage.id, name
            ))?],
            None => blueprint.addons().iter().collect(),
        };

        let mut rendered = Map::new();
        for addon in addons {
            let values = addon.values(&cluster).context(format!(
                "Unable to compute values for addon '{}'",
                addon.identity().name
            ))?;
            let value = match &self.path {
                Some(path) => {
                    let segments: Vec<&str> = path.split('.').collect();
                    get_path(&values, &segments).cloned().unwrap_or(Value::Null)
                }
                None => Value::Object(values),
            };
            rendered.insert(addon.identity().name.clone(), value);
        }

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&rendered)
                    .context("Could not create string from values.")?
            );
        } else {
            print!(
                "{}",
                serde_yaml::to_string(&rendered).context("Could not create string from values.")?
            );
        }
        Ok(())
    }
}
