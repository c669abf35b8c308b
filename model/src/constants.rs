// Labels applied to objects created by blueprints
pub const LABEL_MANAGED_BY: &str = "app.kubernetes.io/managed-by";
pub const MANAGED_BY: &str = "blueprints";

// Environment variables
pub const HELM_BINARY_ENV: &str = "BLUEPRINTS_HELM";
