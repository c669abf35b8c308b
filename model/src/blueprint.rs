use crate::error::{self, Result};
use crate::install_order::install_order;
use crate::{Addon, ClusterInfo, DeploymentTarget, InstallationHandle};
use futures::future::try_join_all;
use log::info;
use snafu::OptionExt;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// # Blueprint
///
/// A blueprint is the set of addons that make up one cluster's platform, together with the
/// account and region the cluster lives in. The same blueprint is usually deployed to several
/// environments; [`Blueprint::clone_for_region`] produces the copy for each of them.
///
/// Addons are validated when the blueprint is built: names must be unique and every declared
/// dependency must be part of the blueprint without forming a cycle.
#[derive(Clone)]
pub struct Blueprint {
    id: String,
    account: Option<String>,
    region: String,
    cluster_name: Option<String>,
    addons: Vec<Arc<dyn Addon>>,
}

impl Blueprint {
    pub fn builder() -> BlueprintBuilder {
        BlueprintBuilder::default()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn addons(&self) -> &[Arc<dyn Addon>] {
        &self.addons
    }

    /// Look up an addon by its identity name.
    pub fn addon(&self, name: &str) -> Option<&Arc<dyn Addon>> {
        self.addons
            .iter()
            .find(|addon| addon.identity().name == name)
    }

    /// The cluster this blueprint describes. Unless a cluster name was given, the cluster is named
    /// after the blueprint and its region.
    pub fn cluster_info(&self) -> ClusterInfo {
        ClusterInfo {
            cluster_name: self
                .cluster_name
                .clone()
                .unwrap_or_else(|| format!("{}-{}", self.id, self.region)),
            region: self.region.clone(),
            account: self.account.clone(),
        }
    }

    /// A copy of this blueprint for `region`. Addons are shared between copies since they are not
    /// modified after construction. An explicit cluster name is not carried over.
    pub fn clone_for_region<S>(&self, region: S) -> Blueprint
    where
        S: Into<String>,
    {
        Blueprint {
            id: self.id.clone(),
            account: self.account.clone(),
            region: region.into(),
            cluster_name: None,
            addons: self.addons.clone(),
        }
    }

    /// Like [`Blueprint::clone_for_region`] but with an explicit cluster name.
    pub fn clone_for_cluster<S1, S2>(&self, region: S1, cluster_name: S2) -> Blueprint
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        Blueprint {
            cluster_name: Some(cluster_name.into()),
            ..self.clone_for_region(region)
        }
    }

    /// The addons grouped into installation waves, see [`install_order`].
    pub fn install_order(&self) -> Result<Vec<Vec<Arc<dyn Addon>>>> {
        install_order(&self.addons)
    }

    /// Deploy every addon to `target`, one wave at a time. The addons of a wave are deployed
    /// concurrently. The first failure stops the deployment and is returned.
    pub async fn deploy(&self, target: &dyn DeploymentTarget) -> Result<Vec<InstallationHandle>> {
        let waves = self.install_order()?;
        let mut handles = Vec::new();
        for (i, wave) in waves.iter().enumerate() {
            info!(
                "Deploying wave {} of {} for '{}': {}",
                i + 1,
                waves.len(),
                target.cluster_info().cluster_name,
                wave.iter()
                    .map(|addon| addon.identity().name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            let wave_handles = try_join_all(wave.iter().map(|addon| addon.deploy(target))).await?;
            handles.extend(wave_handles);
        }
        Ok(handles)
    }
}

impl Debug for Blueprint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Blueprint")
            .field("id", &self.id)
            .field("account", &self.account)
            .field("region", &self.region)
            .field("cluster_name", &self.cluster_name)
            .field(
                "addons",
                &self
                    .addons
                    .iter()
                    .map(|addon| addon.identity().name.as_str())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Builds a [`Blueprint`]. `id` and `region` are required.
#[derive(Default)]
pub struct BlueprintBuilder {
    id: Option<String>,
    account: Option<String>,
    region: Option<String>,
    cluster_name: Option<String>,
    addons: Vec<Arc<dyn Addon>>,
}

impl BlueprintBuilder {
    pub fn id<S: Into<String>>(mut self, id: S) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn account<S: Into<String>>(mut self, account: S) -> Self {
        self.account = Some(account.into());
        self
    }

    pub fn region<S: Into<String>>(mut self, region: S) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn cluster_name<S: Into<String>>(mut self, cluster_name: S) -> Self {
        self.cluster_name = Some(cluster_name.into());
        self
    }

    pub fn addon(mut self, addon: Arc<dyn Addon>) -> Self {
        self.addons.push(addon);
        self
    }

    pub fn addons<I>(mut self, addons: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Addon>>,
    {
        self.addons.extend(addons);
        self
    }

    pub fn build(self) -> Result<Blueprint> {
        let blueprint = Blueprint {
            id: self.id.context(error::MissingFieldSnafu { field: "id" })?,
            account: self.account,
            region: self
                .region
                .context(error::MissingFieldSnafu { field: "region" })?,
            cluster_name: self.cluster_name,
            addons: self.addons,
        };
        blueprint.install_order()?;
        Ok(blueprint)
    }
}
