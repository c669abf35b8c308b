use kube::Error;

/// Inspect the HTTP status code carried by a Kubernetes API error.
pub(crate) trait HttpStatusCode {
    fn status_code(&self) -> Option<u16>;

    /// The object already exists (409).
    fn is_conflict(&self) -> bool {
        self.status_code() == Some(409)
    }
}

impl HttpStatusCode for kube::Error {
    fn status_code(&self) -> Option<u16> {
        match self {
            Error::Api(error_response) => Some(error_response.code),
            _ => None,
        }
    }
}
