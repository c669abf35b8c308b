/*!

A pipeline deploys one blueprint to several environments. It is described by a YAML file:

```yaml
name: platform-pipeline
owner: platform-team
repository:
  repoUrl: https://github.com/example/platform-workloads
  credentialsSecretName: github-token
  targetRevision: main
account: "123456789012"
region: us-west-2
addons:
  - type: istio-base
  - type: istio-control-plane
waves:
  - id: envs
    stages:
      - id: dev
        region: ap-south-1
      - id: test
        region: ap-southeast-1
      - id: prod
        region: ap-southeast-2
```

Each stage gets its own copy of the blueprint for its region.

!*/

use crate::config::{bind_base_addon, AddonConfig};
use blueprint_model::error::{self, Result};
use blueprint_model::Blueprint;
use log::debug;
use serde::{Deserialize, Serialize};
use snafu::{OptionExt, ResultExt};
use std::path::Path;

/// The source repository of the workloads that the GitOps tooling in each cluster syncs from.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GitRepository {
    pub repo_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials_secret_name: Option<String>,
    #[serde(default = "default_revision")]
    pub target_revision: String,
}

fn default_revision() -> String {
    "main".to_string()
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageConfig {
    pub id: String,
    pub region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_name: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaveConfig {
    pub id: String,
    pub stages: Vec<StageConfig>,
}

/// The contents of a pipeline file.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineConfig {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<GitRepository>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    /// The region of the blueprint before it is cloned into each stage.
    pub region: String,
    /// The cluster name of the blueprint before it is cloned. Stages name their own clusters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_name: Option<String>,
    #[serde(default)]
    pub addons: Vec<AddonConfig>,
    #[serde(default)]
    pub waves: Vec<WaveConfig>,
}

impl PipelineConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).context(error::FileSnafu { path })?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context(error::SerdeYamlSnafu {
            action: "parse pipeline file",
        })
    }
}

/// A stage of a pipeline: one environment with its own copy of the blueprint.
#[derive(Clone, Debug)]
pub struct Stage {
    pub wave: String,
    pub id: String,
    pub blueprint: Blueprint,
}

/// A pipeline with its blueprint cloned into every stage.
#[derive(Clone, Debug)]
pub struct Pipeline {
    name: String,
    owner: Option<String>,
    repository: Option<GitRepository>,
    blueprint: Blueprint,
    stages: Vec<Stage>,
}

impl Pipeline {
    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        let mut builder = Blueprint::builder()
            .id(&config.name)
            .region(&config.region);
        if let Some(account) = &config.account {
            builder = builder.account(account);
        }
        if let Some(cluster_name) = &config.cluster_name {
            builder = builder.cluster_name(cluster_name);
        }
        let addons = bind_base_addon(&config.addons)
            .iter()
            .map(|entry| {
                debug!("Adding {} addon '{}'", entry.kind(), entry.name());
                entry.build()
            })
            .collect::<Result<Vec<_>>>()?;
        let blueprint = builder.addons(addons).build()?;

        let mut stages = Vec::new();
        for wave in &config.waves {
            for stage in &wave.stages {
                debug!(
                    "Stage '{}' of wave '{}' deploys to {}",
                    stage.id, wave.id, stage.region
                );
                let blueprint = match &stage.cluster_name {
                    Some(cluster_name) => blueprint.clone_for_cluster(&stage.region, cluster_name),
                    None => blueprint.clone_for_region(&stage.region),
                };
                stages.push(Stage {
                    wave: wave.id.clone(),
                    id: stage.id.clone(),
                    blueprint,
                });
            }
        }

        Ok(Self {
            name: config.name.clone(),
            owner: config.owner.clone(),
            repository: config.repository.clone(),
            blueprint,
            stages,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        Self::from_config(&PipelineConfig::from_path(path)?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn repository(&self) -> Option<&GitRepository> {
        self.repository.as_ref()
    }

    /// The blueprint that every stage is cloned from.
    pub fn blueprint(&self) -> &Blueprint {
        &self.blueprint
    }

    /// All stages in wave order.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn stage(&self, id: &str) -> Result<&Stage> {
        self.stages
            .iter()
            .find(|stage| stage.id == id)
            .context(error::UnknownStageSnafu { stage: id })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use blueprint_model::Error;

    const PIPELINE: &str = r#"
name: eks-blueprints-accelerator-pipeline
owner: codemato
repository:
  repoUrl: accelerator-eks-blueprint
  credentialsSecretName: github-token
account: "123456789012"
region: us-west-2
clusterName: platform-root
addons:
  - type: istio-base
  - type: istio-control-plane
waves:
  - id: envs
    stages:
      - id: dev
        region: ap-south-1
      - id: test
        region: ap-southeast-1
      - id: prod
        region: ap-southeast-2
        clusterName: prod-platform
"#;

    #[test]
    fn stages_get_their_region() {
        let pipeline = Pipeline::from_config(&PipelineConfig::from_yaml(PIPELINE).unwrap()).unwrap();
        let regions: Vec<(&str, &str)> = pipeline
            .stages()
            .iter()
            .map(|stage| (stage.id.as_str(), stage.blueprint.region()))
            .collect();
        assert_eq!(
            regions,
            vec![
                ("dev", "ap-south-1"),
                ("test", "ap-southeast-1"),
                ("prod", "ap-southeast-2")
            ]
        );
        assert_eq!(pipeline.blueprint().region(), "us-west-2");
        assert_eq!(
            pipeline.blueprint().cluster_info().cluster_name,
            "platform-root"
        );
        assert_eq!(
            pipeline.stage("prod").unwrap().blueprint.cluster_info().cluster_name,
            "prod-platform"
        );
        assert_eq!(
            pipeline.stage("dev").unwrap().blueprint.cluster_info().cluster_name,
            "eks-blueprints-accelerator-pipeline-ap-south-1"
        );
        assert_eq!(pipeline.stage("test").unwrap().blueprint.addons().len(), 2);
    }

    #[test]
    fn repository_defaults_revision() {
        let config = PipelineConfig::from_yaml(PIPELINE).unwrap();
        let repository = config.repository.unwrap();
        assert_eq!(repository.repo_url, "accelerator-eks-blueprint");
        assert_eq!(
            repository.credentials_secret_name.as_deref(),
            Some("github-token")
        );
        assert_eq!(repository.target_revision, "main");
    }

    #[test]
    fn unknown_stage() {
        let pipeline = Pipeline::from_config(&PipelineConfig::from_yaml(PIPELINE).unwrap()).unwrap();
        assert!(matches!(
            pipeline.stage("staging"),
            Err(Error::UnknownStage { stage }) if stage == "staging"
        ));
    }

    #[test]
    fn renamed_base_is_still_a_prerequisite() {
        let config = PipelineConfig::from_yaml(
            r#"
name: mesh
region: us-east-1
addons:
  - type: istio-control-plane
  - type: istio-base
    name: mesh-base
"#,
        )
        .unwrap();
        let pipeline = Pipeline::from_config(&config).unwrap();
        let waves = pipeline.blueprint().install_order().unwrap();
        let names: Vec<Vec<String>> = waves
            .iter()
            .map(|wave| wave.iter().map(|a| a.identity().name.clone()).collect())
            .collect();
        assert_eq!(
            names,
            vec![vec!["mesh-base".to_string()], vec!["istiod".to_string()]]
        );
    }

    #[test]
    fn control_plane_without_base_is_rejected() {
        let config = PipelineConfig::from_yaml(
            r#"
name: broken
region: us-east-1
addons:
  - type: istio-control-plane
"#,
        )
        .unwrap();
        assert!(matches!(
            Pipeline::from_config(&config),
            Err(Error::MissingDependency { .. })
        ));
    }
}
