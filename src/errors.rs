use thiserror::Error;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("Kubeconfig error")]
    Kubeconfig(#[from] kube::config::KubeconfigError),

    #[error("Unable to infer cluster configuration")]
    InferConfig(#[from] kube::config::InferConfigError),

    #[error("K8s API error: {0}")]
    K8sApi(#[from] kube::Error),

    #[error("unexpected GroupVersion string: {0}")]
    InvalidGroupVersion(String),

    #[error("Resource '{resource}' not found in group version '{group_version}'")]
    ResourceNotFound {
        group_version: String,
        resource: String,
    },

    #[error("Unstructured conversion error: {0}")]
    Conversion(#[from] serde_json::Error),

    #[error("Malformed object {name}: {reason}")]
    MalformedObject { name: String, reason: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl DemoError {
    pub fn malformed(name: &str, reason: &str) -> Self {
        DemoError::MalformedObject {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Errors that can tell whether they were caused by an optimistic
/// concurrency conflict (HTTP 409).
pub trait ConflictError {
    fn is_conflict(&self) -> bool;
}

impl ConflictError for kube::Error {
    fn is_conflict(&self) -> bool {
        matches!(self, kube::Error::Api(ae) if ae.code == 409)
    }
}

impl ConflictError for DemoError {
    fn is_conflict(&self) -> bool {
        match self {
            DemoError::K8sApi(e) => e.is_conflict(),
            _ => false,
        }
    }
}
