use crate::ISTIO_CHART_REPOSITORY;
use blueprint_model::values::{insert_path, insert_path_opt};
use blueprint_model::{Addon, AddonIdentity, ClusterInfo, IdentityOverrides, Result, Values};
use serde::{Deserialize, Serialize};

/// Options for the [`IstioBaseAddOn`]. Every option is optional and falls back to the default
/// documented on it. No cross-field validation is done.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IstioBaseAddOnProps {
    /// Replacements for the default chart identity.
    #[serde(flatten)]
    pub identity: IdentityOverrides,

    /// Enable istioctl analysis, which reports invalid or suboptimal configuration in the status of
    /// Istio resources. Defaults to `false`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_analysis: Option<bool>,

    /// Enable the config validation webhook. Defaults to `true`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_validation: Option<bool>,

    /// One istiod controls remote clusters, CA included. Defaults to `false`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_istiod: Option<bool>,

    /// Address or hostname of the remote pilot when `external_istiod` is set. Unset by default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_pilot_address: Option<String>,

    /// Callback URL of the validation webhook, for example
    /// `https://<remotePilotAddress>:15017/validate`. Unset by default.
    #[serde(rename = "validationURL", skip_serializing_if = "Option::is_none")]
    pub validation_url: Option<String>,

    /// Install the Istio config CRDs with the base chart. Defaults to `true`.
    #[serde(rename = "enableIstioConfigCRDs", skip_serializing_if = "Option::is_none")]
    pub enable_istio_config_crds: Option<bool>,

    /// Values merged on top of the ones computed from the options above.
    #[serde(default, skip_serializing_if = "Values::is_empty")]
    pub values: Values,
}

/// Installs the Istio `base` chart: the cluster-wide resources and CRDs that the control plane
/// relies on.
#[derive(Clone, Debug)]
pub struct IstioBaseAddOn {
    identity: AddonIdentity,
    options: IstioBaseAddOnProps,
}

impl IstioBaseAddOn {
    pub const NAME: &'static str = "base";

    pub fn default_identity() -> AddonIdentity {
        AddonIdentity {
            name: Self::NAME.to_string(),
            release: "istio-base".to_string(),
            namespace: "istio-system".to_string(),
            chart: "base".to_string(),
            version: "1.13.3".to_string(),
            repository: ISTIO_CHART_REPOSITORY.to_string(),
        }
    }

    pub fn new(props: IstioBaseAddOnProps) -> Self {
        Self {
            identity: Self::default_identity().with_overrides(props.identity.clone()),
            options: props,
        }
    }

    pub fn options(&self) -> &IstioBaseAddOnProps {
        &self.options
    }
}

impl Default for IstioBaseAddOn {
    fn default() -> Self {
        Self::new(IstioBaseAddOnProps::default())
    }
}

#[async_trait::async_trait]
impl Addon for IstioBaseAddOn {
    fn identity(&self) -> &AddonIdentity {
        &self.identity
    }

    fn baseline(&self, _cluster: &ClusterInfo) -> Result<Values> {
        let options = &self.options;
        let mut values = Values::new();
        insert_path(
            &mut values,
            &["global", "istiod"],
            "enableAnalysis",
            options.enable_analysis.unwrap_or(false),
        );
        insert_path(
            &mut values,
            &["global"],
            "configValidation",
            options.config_validation.unwrap_or(true),
        );
        insert_path(
            &mut values,
            &["global"],
            "externalIstiod",
            options.external_istiod.unwrap_or(false),
        );
        insert_path_opt(
            &mut values,
            &["global"],
            "remotePilotAddress",
            options.remote_pilot_address.clone(),
        );
        insert_path(
            &mut values,
            &["global", "base"],
            "enableIstioConfigCRDs",
            options.enable_istio_config_crds.unwrap_or(true),
        );
        insert_path_opt(
            &mut values,
            &["global", "base"],
            "validationURL",
            options.validation_url.clone(),
        );
        Ok(values)
    }

    fn overlay(&self) -> Values {
        self.options.values.clone()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use blueprint_model::values::get_path;
    use serde_json::{json, Value};

    fn cluster() -> ClusterInfo {
        ClusterInfo {
            cluster_name: "dev".into(),
            region: "ap-south-1".into(),
            account: None,
        }
    }

    #[test]
    fn default_identity() {
        let addon = IstioBaseAddOn::default();
        let identity = addon.identity();
        assert_eq!(identity.name, "base");
        assert_eq!(identity.release, "istio-base");
        assert_eq!(identity.namespace, "istio-system");
        assert_eq!(identity.chart, "base");
        assert_eq!(identity.version, "1.13.3");
        assert_eq!(
            identity.repository,
            "https://istio-release.storage.googleapis.com/charts"
        );
        assert!(addon.depends_on().is_empty());
    }

    #[test]
    fn omitted_options_use_defaults() {
        let values = IstioBaseAddOn::default().baseline(&cluster()).unwrap();
        assert_eq!(
            Value::Object(values),
            json!({
                "global": {
                    "istiod": {"enableAnalysis": false},
                    "configValidation": true,
                    "externalIstiod": false,
                    "base": {"enableIstioConfigCRDs": true}
                }
            })
        );
    }

    #[test]
    fn supplied_options_are_used() {
        let addon = IstioBaseAddOn::new(IstioBaseAddOnProps {
            enable_analysis: Some(true),
            config_validation: Some(false),
            external_istiod: Some(true),
            remote_pilot_address: Some("istiod.mesh.example.com".into()),
            validation_url: Some("https://istiod.mesh.example.com:15017/validate".into()),
            enable_istio_config_crds: Some(false),
            ..Default::default()
        });
        let values = addon.baseline(&cluster()).unwrap();
        let at = |path: &[&str]| get_path(&values, path).cloned();
        assert_eq!(at(&["global", "istiod", "enableAnalysis"]), Some(json!(true)));
        assert_eq!(at(&["global", "configValidation"]), Some(json!(false)));
        assert_eq!(at(&["global", "externalIstiod"]), Some(json!(true)));
        assert_eq!(
            at(&["global", "remotePilotAddress"]),
            Some(json!("istiod.mesh.example.com"))
        );
        assert_eq!(
            at(&["global", "base", "validationURL"]),
            Some(json!("https://istiod.mesh.example.com:15017/validate"))
        );
        assert_eq!(
            at(&["global", "base", "enableIstioConfigCRDs"]),
            Some(json!(false))
        );
    }

    #[test]
    fn caller_values_take_precedence() {
        let addon = IstioBaseAddOn::new(IstioBaseAddOnProps {
            values: json!({"global": {"configValidation": false}})
                .as_object()
                .cloned()
                .unwrap(),
            ..Default::default()
        });
        let values = addon.values(&cluster()).unwrap();
        assert_eq!(
            get_path(&values, &["global", "configValidation"]),
            Some(&json!(false))
        );
        assert_eq!(
            get_path(&values, &["global", "externalIstiod"]),
            Some(&json!(false))
        );
    }

    #[test]
    fn identity_overrides_apply() {
        let addon = IstioBaseAddOn::new(IstioBaseAddOnProps {
            identity: IdentityOverrides {
                version: Some("1.14.1".into()),
                release: Some("mesh-base".into()),
                ..Default::default()
            },
            ..Default::default()
        });
        assert_eq!(addon.identity().version, "1.14.1");
        assert_eq!(addon.identity().release, "mesh-base");
        assert_eq!(addon.identity().name, "base");
    }

    #[test]
    fn props_read_from_yaml() {
        let props: IstioBaseAddOnProps = serde_yaml::from_str(
            r#"
version: 1.13.4
enableAnalysis: true
validationURL: https://pilot:15017/validate
enableIstioConfigCRDs: false
values:
  global:
    hub: docker.io/istio
"#,
        )
        .unwrap();
        assert_eq!(props.identity.version.as_deref(), Some("1.13.4"));
        assert_eq!(props.enable_analysis, Some(true));
        assert_eq!(
            props.validation_url.as_deref(),
            Some("https://pilot:15017/validate")
        );
        assert_eq!(props.enable_istio_config_crds, Some(false));
        assert_eq!(
            get_path(&props.values, &["global", "hub"]),
            Some(&json!("docker.io/istio"))
        );
    }
}
