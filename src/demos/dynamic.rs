use std::io::Write;

use anyhow::{Context, Result};
use kube::Client;
use tracing::debug;

use crate::config::ListArgs;
use crate::core::client::dynamic::{core_v1_pods, into_typed, list_dynamic, resolve_api_resource};
use crate::core::client::kube_resources::Pod;
use crate::domain::format::pod_table;

/// List pods through the untyped API, then convert them to `Pod`.
pub async fn run<W: Write>(client: &Client, args: &ListArgs, out: &mut W) -> Result<()> {
    debug!("Starting dynamic demo...");

    let resource = resolve_api_resource(client, &core_v1_pods()).await?;
    let objects = list_dynamic(client, &resource, Some(&args.namespace), args.limit).await?;
    let pods: Vec<Pod> = into_typed(objects).context("Failed to convert unstructured pods")?;

    write!(out, "{}", pod_table(&pods))?;
    Ok(())
}
