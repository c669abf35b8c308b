/*!

The addons that can be composed into a blueprint, and the pipeline file that lists them.

Istio is installed with two addons: [`IstioBaseAddOn`] for the cluster-wide resources and CRDs,
then [`IstioControlPlaneAddOn`] for istiod. Any other chart can be listed with
[`blueprint_model::HelmAddOn`].

!*/

pub use config::{AddonConfig, AddonKind};
pub use istio_base::{IstioBaseAddOn, IstioBaseAddOnProps};
pub use istio_control_plane::{
    IstioControlPlaneAddOn, IstioControlPlaneAddOnProps, IstioControlPlaneValues, PilotValues,
};
pub use pipeline::{GitRepository, Pipeline, PipelineConfig, Stage, StageConfig, WaveConfig};

mod config;
mod istio_base;
mod istio_control_plane;
pub mod pipeline;

/// The Helm repository that Istio charts are published to.
pub const ISTIO_CHART_REPOSITORY: &str = "https://istio-release.storage.googleapis.com/charts";
