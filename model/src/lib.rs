/*!

This library provides the building blocks for composing a Kubernetes platform out of Helm addons:
the values tree and its deep merge, addon identities, the [`Addon`] and [`DeploymentTarget`]
traits, dependency ordering, and the [`Blueprint`] that ties a set of addons to a cluster.

!*/

#![deny(
    clippy::expect_used,
    clippy::get_unwrap,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::panicking_unwrap,
    clippy::unwrap_in_result,
    clippy::unwrap_used
)]

pub use addon::Addon;
pub use blueprint::{Blueprint, BlueprintBuilder};
pub use configuration::Configuration;
pub use error::{Error, Result};
pub use helm_addon::{HelmAddOn, HelmAddOnProps};
pub use identity::{AddonIdentity, IdentityOverrides};
pub use install_order::install_order;
pub use target::{ClusterInfo, DeploymentTarget, HelmChart, InstallationHandle};
pub use values::{merge, merge_values, Values};

mod addon;
mod blueprint;
pub mod clients;
mod configuration;
pub mod constants;
pub mod error;
mod helm_addon;
mod identity;
mod install_order;
mod serde_utils;
mod target;
pub mod values;
