mod helm;
mod http_status_code;
mod kube_target;

pub use kube_target::KubeTarget;
