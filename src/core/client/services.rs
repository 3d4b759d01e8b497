use anyhow::Result;
use kube::{Api, Client};
use kube::api::{DeleteParams, ListParams, PostParams};
use tracing::{debug, info};

use crate::core::client::kube_resources::Service;
use crate::domain::manifests::new_service;
use crate::errors::DemoError;

/// Create the demo NodePort service
pub async fn create_service(
    client: &Client,
    namespace: &str,
    name: &str,
    node_port: i32,
) -> Result<Service> {
    info!("Creating service: namespace: {}, name: {}", namespace, name);

    let services: Api<Service> = Api::namespaced(client.clone(), namespace);
    let svc = new_service(namespace, name, node_port);
    let created = services.create(&PostParams::default(), &svc).await?;

    Ok(created)
}

/// Fetch service names in a specific namespace
pub async fn fetch_service_names_by_namespace(
    client: &Client,
    namespace: &str,
) -> Result<Vec<String>> {
    let services: Api<Service> = Api::namespaced(client.clone(), namespace);
    let svc_list = services.list(&ListParams::default()).await?;

    let names = svc_list
        .items
        .into_iter()
        .filter_map(|s| s.metadata.name)
        .inspect(|name| debug!("Listing service: namespace: {}, name: {}", namespace, name))
        .collect();

    Ok(names)
}

/// Fetch a single service by name and namespace
pub async fn fetch_service_by_name_and_namespace(
    client: &Client,
    namespace: &str,
    name: &str,
) -> Result<Service> {
    let services: Api<Service> = Api::namespaced(client.clone(), namespace);
    let svc = services.get(name).await?;

    debug!("Fetched service: {}/{}", namespace, name);
    Ok(svc)
}

/// Move the first port of a service to another node port
pub async fn update_service_node_port(
    client: &Client,
    namespace: &str,
    name: &str,
    node_port: i32,
) -> Result<Service> {
    info!("Updating service: namespace: {}, name: {}", namespace, name);

    let mut svc = fetch_service_by_name_and_namespace(client, namespace, name).await?;
    let port = svc
        .spec
        .as_mut()
        .and_then(|spec| spec.ports.as_mut())
        .and_then(|ports| ports.first_mut())
        .ok_or_else(|| {
            DemoError::malformed(&format!("{}/{}", namespace, name), "service has no ports")
        })?;
    port.node_port = Some(node_port);

    let services: Api<Service> = Api::namespaced(client.clone(), namespace);
    let updated = services.replace(name, &PostParams::default(), &svc).await?;

    Ok(updated)
}

/// Delete a service after making sure it exists
pub async fn delete_service(client: &Client, namespace: &str, name: &str) -> Result<bool> {
    info!("Deleting service: namespace: {}, name: {}", namespace, name);

    fetch_service_by_name_and_namespace(client, namespace, name).await?;

    let services: Api<Service> = Api::namespaced(client.clone(), namespace);
    services.delete(name, &DeleteParams::default()).await?;

    Ok(true)
}

/// Node port of the first service port, if any
pub fn first_node_port(svc: &Service) -> Option<i32> {
    svc.spec
        .as_ref()
        .and_then(|spec| spec.ports.as_ref())
        .and_then(|ports| ports.first())
        .and_then(|port| port.node_port)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::client::test_support::{
        body_json, created_json, mock_client, ok_json, status_json,
    };
    use serde_json::json;

    const PATH: &str = "/api/v1/namespaces/nginx/services";

    fn stored_service(node_port: i32) -> serde_json::Value {
        let mut svc = new_service("nginx", "nginx", node_port);
        svc.metadata.resource_version = Some("7".to_string());
        serde_json::to_value(&svc).unwrap()
    }

    #[tokio::test]
    async fn creates_node_port_service() {
        let (client, mut handle) = mock_client();
        let server = tokio::spawn(async move {
            let (req, send) = handle.next_request().await.unwrap();
            assert_eq!(req.method(), http::Method::POST);
            assert_eq!(req.uri().path(), PATH);
            let body = body_json(req).await;
            assert_eq!(body["spec"]["type"], "NodePort");
            assert_eq!(body["spec"]["ports"][0]["nodePort"], 30007);
            send.send_response(created_json(body));
        });

        let svc = create_service(&client, "nginx", "nginx", 30007).await.unwrap();
        assert_eq!(first_node_port(&svc), Some(30007));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn lists_service_names() {
        let (client, mut handle) = mock_client();
        let server = tokio::spawn(async move {
            let (req, send) = handle.next_request().await.unwrap();
            assert_eq!(req.uri().path(), PATH);
            send.send_response(ok_json(json!({
                "apiVersion": "v1",
                "kind": "ServiceList",
                "metadata": {},
                "items": [stored_service(30007)]
            })));
        });

        let names = fetch_service_names_by_namespace(&client, "nginx").await.unwrap();
        assert_eq!(names, vec!["nginx"]);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn update_replaces_node_port() {
        let (client, mut handle) = mock_client();
        let server = tokio::spawn(async move {
            let (req, send) = handle.next_request().await.unwrap();
            assert_eq!(req.method(), http::Method::GET);
            assert_eq!(req.uri().path(), format!("{}/nginx", PATH));
            send.send_response(ok_json(stored_service(30007)));

            let (req, send) = handle.next_request().await.unwrap();
            assert_eq!(req.method(), http::Method::PUT);
            let body = body_json(req).await;
            assert_eq!(body["metadata"]["resourceVersion"], "7");
            assert_eq!(body["spec"]["ports"][0]["nodePort"], 30008);
            send.send_response(ok_json(body));
        });

        let svc = update_service_node_port(&client, "nginx", "nginx", 30008).await.unwrap();
        assert_eq!(first_node_port(&svc), Some(30008));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn update_rejects_service_without_ports() {
        let (client, mut handle) = mock_client();
        let server = tokio::spawn(async move {
            let (_req, send) = handle.next_request().await.unwrap();
            send.send_response(ok_json(json!({
                "apiVersion": "v1",
                "kind": "Service",
                "metadata": { "name": "nginx", "namespace": "nginx" },
                "spec": { "type": "ClusterIP" }
            })));
        });

        let err = update_service_node_port(&client, "nginx", "nginx", 30008)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("service has no ports"));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn delete_checks_existence_first() {
        let (client, mut handle) = mock_client();
        let server = tokio::spawn(async move {
            let (req, send) = handle.next_request().await.unwrap();
            assert_eq!(req.method(), http::Method::GET);
            send.send_response(ok_json(stored_service(30008)));

            let (req, send) = handle.next_request().await.unwrap();
            assert_eq!(req.method(), http::Method::DELETE);
            assert_eq!(req.uri().path(), format!("{}/nginx", PATH));
            send.send_response(ok_json(json!({
                "kind": "Status",
                "apiVersion": "v1",
                "metadata": {},
                "status": "Success",
                "code": 200
            })));
        });

        assert!(delete_service(&client, "nginx", "nginx").await.unwrap());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn delete_of_missing_service_fails_without_delete_call() {
        let (client, mut handle) = mock_client();
        let server = tokio::spawn(async move {
            let (req, send) = handle.next_request().await.unwrap();
            assert_eq!(req.method(), http::Method::GET);
            send.send_response(status_json(404, "NotFound", "services \"nginx\" not found"));
        });

        assert!(delete_service(&client, "nginx", "nginx").await.is_err());
        server.await.unwrap();
    }
}
