use anyhow::Result;
use kube::{Api, Client};
use kube::api::ListParams;
use tracing::debug;

use crate::core::client::kube_resources::Pod;

/// Fetch up to `limit` pods in a specific namespace
pub async fn fetch_pods_by_namespace(
    client: &Client,
    namespace: &str,
    limit: u32,
) -> Result<Vec<Pod>> {
    let pods: Api<Pod> = Api::namespaced(client.clone(), namespace);
    let pod_list = pods.list(&ListParams::default().limit(limit)).await?;

    debug!("Discovered {} pod(s) in namespace '{}'", pod_list.items.len(), namespace);
    Ok(pod_list.items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::client::test_support::{mock_client, ok_json};
    use serde_json::json;

    #[tokio::test]
    async fn lists_pods_with_limit() {
        let (client, mut handle) = mock_client();
        let server = tokio::spawn(async move {
            let (req, send) = handle.next_request().await.unwrap();
            assert_eq!(req.uri().path(), "/api/v1/namespaces/kube-system/pods");
            assert!(req.uri().query().unwrap_or_default().contains("limit=100"));
            send.send_response(ok_json(json!({
                "apiVersion": "v1",
                "kind": "PodList",
                "metadata": {},
                "items": [
                    { "metadata": { "name": "coredns-b5c4bcdd4-5nbmd", "namespace": "kube-system" },
                      "status": { "phase": "Running" } },
                    { "metadata": { "name": "etcd-k8s-master-1", "namespace": "kube-system" },
                      "status": { "phase": "Running" } }
                ]
            })));
        });

        let pods = fetch_pods_by_namespace(&client, "kube-system", 100).await.unwrap();
        let names: Vec<_> = pods.iter().filter_map(|p| p.metadata.name.as_deref()).collect();
        assert_eq!(names, vec!["coredns-b5c4bcdd4-5nbmd", "etcd-k8s-master-1"]);
        assert_eq!(
            pods[0].status.as_ref().and_then(|s| s.phase.as_deref()),
            Some("Running")
        );
        server.await.unwrap();
    }
}
