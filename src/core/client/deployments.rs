use anyhow::Result;
use kube::{Api, Client};
use kube::api::{DeleteParams, ListParams, PostParams};
use tracing::{debug, info};

use crate::core::client::kube_resources::Deployment;
use crate::core::util::retry::{retry_on_conflict, Backoff};
use crate::domain::manifests::{apply_deployment_update, new_deployment};
use crate::errors::DemoError;

/// Fetch deployments in a specific namespace
pub async fn fetch_deployments_by_namespace(
    client: &Client,
    namespace: &str,
) -> Result<Vec<Deployment>> {
    info!("Listing deployments in namespace {:?}:", namespace);

    let deployments: Api<Deployment> = Api::namespaced(client.clone(), namespace);
    let deployment_list = deployments.list(&ListParams::default()).await?;

    debug!(
        "Discovered {} deployment(s) in namespace '{}'",
        deployment_list.items.len(),
        namespace
    );
    Ok(deployment_list.items)
}

/// Fetch a single deployment by name and namespace
pub async fn fetch_deployment_by_name_and_namespace(
    client: &Client,
    namespace: &str,
    deployment_name: &str,
) -> Result<Deployment> {
    let deployments: Api<Deployment> = Api::namespaced(client.clone(), namespace);
    let deployment = deployments.get(deployment_name).await?;

    debug!("Fetched deployment: {}/{}", namespace, deployment_name);
    Ok(deployment)
}

/// Create the demo nginx deployment
pub async fn create_deployment(client: &Client, namespace: &str, name: &str) -> Result<Deployment> {
    info!("creating deployment...");

    let deployments: Api<Deployment> = Api::namespaced(client.clone(), namespace);
    let deployment = new_deployment(namespace, name);
    let created = deployments.create(&PostParams::default(), &deployment).await?;

    debug!("Created deployment: {}/{}", namespace, name);
    Ok(created)
}

/// Scale the demo deployment down and bump its image.
///
/// Each attempt re-reads the deployment so that changes made by other
/// clients since the last read are preserved; a 409 from the API server
/// triggers another attempt.
pub async fn update_deployment(client: &Client, namespace: &str, name: &str) -> Result<Deployment> {
    update_deployment_with_backoff(client, namespace, name, Backoff::default_retry()).await
}

pub async fn update_deployment_with_backoff(
    client: &Client,
    namespace: &str,
    name: &str,
    backoff: Backoff,
) -> Result<Deployment> {
    info!("Updating deployment...");

    let deployments: Api<Deployment> = Api::namespaced(client.clone(), namespace);
    let api = &deployments;
    let updated = retry_on_conflict(backoff, || async move {
        let mut latest = api.get(name).await?;
        if !apply_deployment_update(&mut latest) {
            return Err(DemoError::malformed(
                &format!("{}/{}", namespace, name),
                "deployment has no containers",
            ));
        }
        let replaced = api.replace(name, &PostParams::default(), &latest).await?;
        Ok::<Deployment, DemoError>(replaced)
    })
    .await?;

    info!("updated deployment...");
    Ok(updated)
}

/// Delete a deployment, removing its dependents in the foreground
pub async fn delete_deployment(client: &Client, namespace: &str, name: &str) -> Result<()> {
    info!("Deleting deployments...");

    let deployments: Api<Deployment> = Api::namespaced(client.clone(), namespace);
    deployments.delete(name, &DeleteParams::foreground()).await?;

    info!("Deleted deployment.");
    Ok(())
}
