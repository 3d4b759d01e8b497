use std::io::Write;

use anyhow::{Context, Result};
use kube::Client;
use tracing::{debug, info};

use crate::config::ClientsetArgs;
use crate::core::client::deployments::{
    create_deployment, delete_deployment, fetch_deployment_by_name_and_namespace,
    fetch_deployments_by_namespace, update_deployment,
};
use crate::core::client::namespaces::fetch_namespace_names;
use crate::core::client::pods::fetch_pods_by_namespace;
use crate::core::client::services::{
    create_service, delete_service, fetch_service_names_by_namespace, first_node_port,
    update_service_node_port,
};
use crate::core::util::prompt::Pause;
use crate::domain::format::{deployment_bullet, deployment_line, namespace_lines, pod_table};

/// Walk the typed client through list, create, update and delete calls.
pub async fn run<W: Write>(client: &Client, args: &ClientsetArgs, out: &mut W) -> Result<()> {
    debug!("Starting clientset demo...");
    let ns = args.namespace.as_str();
    let mut pause = Pause::terminal(args.yes);

    // --- Step 1: Read-only listings ---
    let names = fetch_namespace_names(client).await?;
    for line in namespace_lines(&names) {
        writeln!(out, "{}", line)?;
    }

    for deployment in fetch_deployments_by_namespace(client, &args.system_namespace).await? {
        writeln!(out, "{}", deployment_line(&deployment))?;
    }

    let pods = fetch_pods_by_namespace(client, &args.system_namespace, args.limit).await?;
    write!(out, "{}", pod_table(&pods))?;

    // --- Step 2: Deployment ---
    pause.wait().await?;
    let created = create_deployment(client, ns, &args.deployment_name)
        .await
        .context("Failed to create deployment")?;
    info!(
        "created deployment {:?}.",
        created.metadata.name.as_deref().unwrap_or_default()
    );

    // --- Step 3: Service lifecycle ---
    pause.wait().await?;
    let service = create_service(client, ns, &args.service_name, args.node_port)
        .await
        .context("Failed to create service")?;
    info!(
        "created service namespace: {}, name: {}",
        ns,
        service.metadata.name.as_deref().unwrap_or_default()
    );
    for name in fetch_service_names_by_namespace(client, ns).await? {
        writeln!(out, "service namespace = {}, name = {}", ns, name)?;
    }

    pause.wait().await?;
    let updated = update_service_node_port(client, ns, &args.service_name, args.updated_node_port)
        .await
        .context("Failed to update service")?;
    info!(
        "updated service namespace: {}, name: {}, nodePort: {}",
        ns,
        args.service_name,
        first_node_port(&updated).unwrap_or_default()
    );

    pause.wait().await?;
    delete_service(client, ns, &args.service_name)
        .await
        .context("Failed to delete service")?;
    info!("deleted service namespace: {}, name: {}", ns, args.service_name);

    // --- Step 4: Update and re-read the deployment ---
    pause.wait().await?;
    update_deployment(client, ns, &args.deployment_name)
        .await
        .context("Update failed")?;
    let current = fetch_deployment_by_name_and_namespace(client, ns, &args.deployment_name).await?;
    writeln!(out, "{}", deployment_line(&current))?;

    pause.wait().await?;
    for deployment in fetch_deployments_by_namespace(client, ns).await? {
        writeln!(out, "{}", deployment_bullet(&deployment))?;
    }

    // --- Step 5: Cleanup ---
    pause.wait().await?;
    delete_deployment(client, ns, &args.deployment_name)
        .await
        .context("Failed to delete deployment")?;

    Ok(())
}
