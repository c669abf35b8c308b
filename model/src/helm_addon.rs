use crate::target::ClusterInfo;
use crate::values::Values;
use crate::{Addon, AddonIdentity, Result};
use serde::{Deserialize, Serialize};

/// Options for a [`HelmAddOn`]. The identity must be given in full since there are no defaults for
/// an arbitrary chart.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HelmAddOnProps {
    #[serde(flatten)]
    pub identity: AddonIdentity,
    /// Values passed to the chart unchanged.
    #[serde(default)]
    pub values: Values,
    /// Names of addons that must be installed first.
    #[serde(default)]
    pub depends_on: Vec<String>,
}

/// An addon for any chart, with no baseline of its own. Use it to list third-party charts such as
/// a metrics server or a cluster autoscaler in a blueprint.
#[derive(Clone, Debug)]
pub struct HelmAddOn {
    props: HelmAddOnProps,
}

impl HelmAddOn {
    pub fn new(props: HelmAddOnProps) -> Self {
        Self { props }
    }
}

#[async_trait::async_trait]
impl Addon for HelmAddOn {
    fn identity(&self) -> &AddonIdentity {
        &self.props.identity
    }

    fn depends_on(&self) -> Vec<String> {
        self.props.depends_on.clone()
    }

    fn baseline(&self, _cluster: &ClusterInfo) -> Result<Values> {
        Ok(Values::new())
    }

    fn overlay(&self) -> Values {
        self.props.values.clone()
    }
}
