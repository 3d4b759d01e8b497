// Kube-rs based Kubernetes clients
pub mod kube_client;
pub mod kube_resources;

// Typed clientset
pub mod namespaces;
pub mod deployments;
pub mod services;
pub mod pods;

// Untyped and low-level clients
pub mod discovery;
pub mod dynamic;
pub mod rest;

#[cfg(test)]
pub mod test_support;
