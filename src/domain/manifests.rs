use std::collections::BTreeMap;

use crate::core::client::kube_resources::{
    Container, ContainerPort, Deployment, DeploymentSpec, IntOrString, LabelSelector, ObjectMeta,
    PodSpec, PodTemplateSpec, Service, ServicePort, ServiceSpec,
};

pub const KUBE_SYSTEM_NAMESPACE: &str = "kube-system";
pub const NGINX_NAMESPACE: &str = "nginx";

pub const DEPLOYMENT_NAME: &str = "nginx-demo";
pub const SERVICE_NAME: &str = "nginx";

pub const APP_LABEL: &str = "nginx-demo";
pub const CONTAINER_NAME: &str = "web";
pub const NGINX_IMAGE: &str = "harbor.dev.com/test-demo/nginx:1.12";
pub const NGINX_UPDATED_IMAGE: &str = "harbor.dev.com/test-demo/nginx:1.13";

pub const INITIAL_REPLICAS: i32 = 3;
pub const UPDATED_REPLICAS: i32 = 1;

pub const HTTP_PORT: i32 = 80;
pub const NODE_PORT: i32 = 30007;
pub const UPDATED_NODE_PORT: i32 = 30008;

fn app_labels() -> BTreeMap<String, String> {
    BTreeMap::from([("app".to_string(), APP_LABEL.to_string())])
}

/// The nginx Deployment created by the clientset demo.
pub fn new_deployment(namespace: &str, name: &str) -> Deployment {
    Deployment {
        metadata: ObjectMeta {
            namespace: Some(namespace.to_string()),
            name: Some(name.to_string()),
            ..Default::default()
        },
        spec: Some(DeploymentSpec {
            replicas: Some(INITIAL_REPLICAS),
            selector: LabelSelector {
                match_labels: Some(app_labels()),
                ..Default::default()
            },
            template: PodTemplateSpec {
                metadata: Some(ObjectMeta {
                    name: Some(name.to_string()),
                    labels: Some(app_labels()),
                    ..Default::default()
                }),
                spec: Some(PodSpec {
                    containers: vec![Container {
                        name: CONTAINER_NAME.to_string(),
                        image: Some(NGINX_IMAGE.to_string()),
                        ports: Some(vec![ContainerPort {
                            name: Some("http".to_string()),
                            protocol: Some("TCP".to_string()),
                            container_port: HTTP_PORT,
                            ..Default::default()
                        }]),
                        image_pull_policy: Some("IfNotPresent".to_string()),
                        ..Default::default()
                    }],
                    restart_policy: Some("Always".to_string()),
                    ..Default::default()
                }),
            },
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// A NodePort Service in front of the nginx Deployment.
pub fn new_service(namespace: &str, name: &str, node_port: i32) -> Service {
    Service {
        metadata: ObjectMeta {
            namespace: Some(namespace.to_string()),
            name: Some(name.to_string()),
            ..Default::default()
        },
        spec: Some(ServiceSpec {
            type_: Some("NodePort".to_string()),
            selector: Some(app_labels()),
            ports: Some(vec![ServicePort {
                port: HTTP_PORT,
                target_port: Some(IntOrString::Int(HTTP_PORT)),
                node_port: Some(node_port),
                ..Default::default()
            }]),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Scale down and bump the image, as the update step of the demo does.
pub fn apply_deployment_update(deployment: &mut Deployment) -> bool {
    let Some(spec) = deployment.spec.as_mut() else {
        return false;
    };
    spec.replicas = Some(UPDATED_REPLICAS);

    match spec
        .template
        .spec
        .as_mut()
        .and_then(|pod| pod.containers.first_mut())
    {
        Some(container) => {
            container.image = Some(NGINX_UPDATED_IMAGE.to_string());
            true
        }
        None => false,
    }
}
