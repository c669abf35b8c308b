use crate::istio_base::{IstioBaseAddOn, IstioBaseAddOnProps};
use crate::istio_control_plane::{IstioControlPlaneAddOn, IstioControlPlaneAddOnProps};
use blueprint_model::{Addon, HelmAddOn, HelmAddOnProps, Result};
use serde::{Deserialize, Serialize};
use serde_plain::derive_display_from_serialize;
use std::sync::Arc;

/// The kinds of addon that can be listed in a pipeline file.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AddonKind {
    IstioBase,
    IstioControlPlane,
    Helm,
}

derive_display_from_serialize!(AddonKind);

/// One entry of a pipeline file's `addons` list. The `type` field selects the addon and the
/// remaining fields are its options:
///
/// ```yaml
/// addons:
///   - type: istio-base
///     enableAnalysis: true
///   - type: istio-control-plane
///     values:
///       pilot:
///         autoscaleEnabled: true
///   - type: helm
///     name: metrics-server
///     release: metrics-server
///     namespace: kube-system
///     chart: metrics-server
///     version: 3.8.2
///     repository: https://kubernetes-sigs.github.io/metrics-server
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum AddonConfig {
    IstioBase(IstioBaseAddOnProps),
    IstioControlPlane(IstioControlPlaneAddOnProps),
    Helm(HelmAddOnProps),
}

impl AddonConfig {
    pub fn kind(&self) -> AddonKind {
        match self {
            AddonConfig::IstioBase(_) => AddonKind::IstioBase,
            AddonConfig::IstioControlPlane(_) => AddonKind::IstioControlPlane,
            AddonConfig::Helm(_) => AddonKind::Helm,
        }
    }

    /// The name the built addon will have.
    pub fn name(&self) -> String {
        match self {
            AddonConfig::IstioBase(props) => props
                .identity
                .name
                .clone()
                .unwrap_or_else(|| IstioBaseAddOn::NAME.to_string()),
            AddonConfig::IstioControlPlane(props) => props
                .identity
                .name
                .clone()
                .unwrap_or_else(|| IstioControlPlaneAddOn::NAME.to_string()),
            AddonConfig::Helm(props) => props.identity.name.clone(),
        }
    }

    /// Construct the addon described by this entry.
    pub fn build(&self) -> Result<Arc<dyn Addon>> {
        Ok(match self {
            AddonConfig::IstioBase(props) => Arc::new(IstioBaseAddOn::new(props.clone())),
            AddonConfig::IstioControlPlane(props) => {
                Arc::new(IstioControlPlaneAddOn::new(props.clone())?)
            }
            AddonConfig::Helm(props) => Arc::new(HelmAddOn::new(props.clone())),
        })
    }
}

/// Point every control plane entry that does not name its base addon at the base addon listed in
/// `entries`, so that a renamed base is still installed first.
pub(crate) fn bind_base_addon(entries: &[AddonConfig]) -> Vec<AddonConfig> {
    let base_name = entries
        .iter()
        .find(|entry| entry.kind() == AddonKind::IstioBase)
        .map(AddonConfig::name);
    entries
        .iter()
        .cloned()
        .map(|entry| match (entry, &base_name) {
            (AddonConfig::IstioControlPlane(mut props), Some(base_name))
                if props.base_name.is_none() =>
            {
                props.base_name = Some(base_name.clone());
                AddonConfig::IstioControlPlane(props)
            }
            (entry, _) => entry,
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn entries_select_the_addon() {
        let entries: Vec<AddonConfig> = serde_yaml::from_str(
            r#"
- type: istio-base
  enableAnalysis: true
- type: istio-control-plane
- type: helm
  name: metrics-server
  release: metrics-server
  namespace: kube-system
  chart: metrics-server
  version: 3.8.2
  repository: https://kubernetes-sigs.github.io/metrics-server
  dependsOn: [base]
"#,
        )
        .unwrap();

        let kinds: Vec<AddonKind> = entries.iter().map(AddonConfig::kind).collect();
        assert_eq!(
            kinds,
            vec![
                AddonKind::IstioBase,
                AddonKind::IstioControlPlane,
                AddonKind::Helm
            ]
        );

        let addons: Vec<Arc<dyn Addon>> = entries.iter().map(|e| e.build().unwrap()).collect();
        assert_eq!(addons[0].identity().name, "base");
        assert_eq!(addons[1].identity().name, "istiod");
        assert_eq!(addons[2].identity().name, "metrics-server");
        assert_eq!(addons[2].depends_on(), vec!["base".to_string()]);
    }

    #[test]
    fn kind_names() {
        assert_eq!(AddonKind::IstioControlPlane.to_string(), "istio-control-plane");
        assert_eq!(AddonKind::Helm.to_string(), "helm");
    }

    #[test]
    fn control_plane_follows_renamed_base() {
        let entries: Vec<AddonConfig> = serde_yaml::from_str(
            r#"
- type: istio-base
  name: mesh-base
- type: istio-control-plane
- type: istio-control-plane
  name: canary
  release: istiod-canary
  baseName: other-base
"#,
        )
        .unwrap();
        let addons: Vec<Arc<dyn Addon>> = bind_base_addon(&entries)
            .iter()
            .map(|e| e.build().unwrap())
            .collect();
        assert_eq!(addons[0].identity().name, "mesh-base");
        assert_eq!(addons[1].depends_on(), vec!["mesh-base".to_string()]);
        assert_eq!(addons[2].depends_on(), vec!["other-base".to_string()]);
    }

    #[test]
    fn unquoted_version_is_accepted() {
        let entry: AddonConfig =
            serde_yaml::from_str("type: istio-control-plane\nversion: 1.14").unwrap();
        assert_eq!(entry.build().unwrap().identity().version, "1.14");
    }

    #[test]
    fn unknown_type_is_rejected() {
        assert!(serde_yaml::from_str::<AddonConfig>("type: calico").is_err());
    }
}
