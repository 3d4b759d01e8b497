/// Re-export the Kubernetes resource types used by the demos
/// This module provides a centralized place for all K8s resource types

pub use k8s_openapi::api::core::v1::{
    Container,
    ContainerPort,
    Namespace,
    Pod,
    PodSpec,
    PodTemplateSpec,
    Service,
    ServicePort,
    ServiceSpec,
};

pub use k8s_openapi::api::apps::v1::{
    Deployment,
    DeploymentSpec,
};

pub use k8s_openapi::apimachinery::pkg::apis::meta::v1::{
    APIGroup,
    APIResource,
    APIResourceList,
    GroupVersionForDiscovery,
    LabelSelector,
    ObjectMeta,
};

pub use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
