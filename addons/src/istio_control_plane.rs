use crate::istio_base::IstioBaseAddOn;
use crate::ISTIO_CHART_REPOSITORY;
use blueprint_model::{
    Addon, AddonIdentity, ClusterInfo, Configuration, IdentityOverrides, Result, Values,
};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Commonly tuned `pilot` settings of the istiod chart.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PilotValues {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoscale_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoscale_min: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoscale_max: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replica_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rollout_max_surge: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rollout_max_unavailable: Option<String>,
    /// Container resource requests and limits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_sampling: Option<f64>,
    /// Any other `pilot` setting.
    #[serde(flatten)]
    pub other: Values,
}

/// Values for the istiod chart. The known fields are typed; everything else is carried in
/// `other` and passed to the chart unchanged.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IstioControlPlaneValues {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pilot: Option<PilotValues>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global: Option<Values>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mesh_config: Option<Values>,
    #[serde(flatten)]
    pub other: Values,
}

impl Configuration for IstioControlPlaneValues {}

/// Options for the [`IstioControlPlaneAddOn`].
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IstioControlPlaneAddOnProps {
    /// Replacements for the default chart identity.
    #[serde(flatten)]
    pub identity: IdentityOverrides,

    /// Name of the [`IstioBaseAddOn`] that must be installed first. Defaults to the base addon's
    /// default name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_name: Option<String>,

    /// Values merged on top of the computed `awsRegion`.
    #[serde(default)]
    pub values: IstioControlPlaneValues,
}

/// Installs the Istio `istiod` chart, the control plane. It is installed after the
/// [`IstioBaseAddOn`], whose CRDs and namespace it expects to exist.
#[derive(Clone, Debug)]
pub struct IstioControlPlaneAddOn {
    identity: AddonIdentity,
    base_name: String,
    overlay: Values,
}

impl IstioControlPlaneAddOn {
    pub const NAME: &'static str = "istiod";

    pub fn default_identity() -> AddonIdentity {
        AddonIdentity {
            name: Self::NAME.to_string(),
            release: "istiod".to_string(),
            namespace: "istio-system".to_string(),
            chart: "istiod".to_string(),
            version: "1.13.3".to_string(),
            repository: ISTIO_CHART_REPOSITORY.to_string(),
        }
    }

    pub fn new(props: IstioControlPlaneAddOnProps) -> Result<Self> {
        Ok(Self {
            identity: Self::default_identity().with_overrides(props.identity),
            base_name: props
                .base_name
                .unwrap_or_else(|| IstioBaseAddOn::NAME.to_string()),
            overlay: props.values.into_map()?,
        })
    }
}

impl Default for IstioControlPlaneAddOn {
    fn default() -> Self {
        Self {
            identity: Self::default_identity(),
            base_name: IstioBaseAddOn::NAME.to_string(),
            overlay: Values::new(),
        }
    }
}

#[async_trait::async_trait]
impl Addon for IstioControlPlaneAddOn {
    fn identity(&self) -> &AddonIdentity {
        &self.identity
    }

    fn depends_on(&self) -> Vec<String> {
        vec![self.base_name.clone()]
    }

    fn baseline(&self, cluster: &ClusterInfo) -> Result<Values> {
        if cluster.region.is_empty() {
            warn!("No region is known for cluster '{}'", cluster.cluster_name);
        }
        let mut values = Values::new();
        values.insert("awsRegion".to_string(), Value::from(cluster.region.as_str()));
        Ok(values)
    }

    fn overlay(&self) -> Values {
        self.overlay.clone()
    }
}
