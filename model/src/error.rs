use snafu::Snafu;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// The error type for blueprint composition, planning and deployment.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Unable to create client: {}", source))]
    ClientCreateKubeconfig {
        source: kube::config::KubeconfigError,
    },

    #[snafu(display("Error serializing configuration: {}", source))]
    ConfigSerialization { source: serde_json::Error },

    #[snafu(display("Unable to read kubeconfig: {}", source))]
    ConfigRead {
        source: kube::config::KubeconfigError,
    },

    #[snafu(display(
        "Error serializing configuration: expected Value::Object type but got something else."
    ))]
    ConfigWrongValueType {},

    #[snafu(display("Addons have a dependency cycle: {}", addons.join(", ")))]
    DependencyCycle { addons: Vec<String> },

    #[snafu(display("Addon '{}' is listed more than once", name))]
    DuplicateAddon { name: String },

    #[snafu(display("Unable to read file '{}': {}", path.display(), source))]
    File {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Unable to parse helm output for release '{}': {}", release, source))]
    HelmOutput {
        release: String,
        source: serde_json::Error,
    },

    #[snafu(display("Installation of release '{}' was rejected: {}", release, reason))]
    InstallRejected { release: String, reason: String },

    #[snafu(display("Unable to {}: {}", action, source))]
    Io {
        action: String,
        source: std::io::Error,
    },

    #[snafu(display("Unable to {}: {}", action, source))]
    Kube { action: String, source: kube::Error },

    #[snafu(display("Blueprint is missing required field '{}'", field))]
    MissingField { field: String },

    #[snafu(display("Addon '{}' depends on '{}' which is not in the blueprint", addon, dependency))]
    MissingDependency { addon: String, dependency: String },

    #[snafu(display("Unable to create namespace '{}': {}", namespace, source))]
    Namespace {
        namespace: String,
        source: kube::Error,
    },

    #[snafu(display("Unable to {}: {}", action, source))]
    SerdeYaml {
        action: String,
        source: serde_yaml::Error,
    },

    #[snafu(display("Unable to find stage '{}'", stage))]
    UnknownStage { stage: String },
}
