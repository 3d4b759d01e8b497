use std::io::Write;

use anyhow::Result;
use kube::api::ListParams;
use kube::core::ObjectList;
use kube::Client;
use tracing::debug;

use crate::config::ListArgs;
use crate::core::client::kube_resources::Pod;
use crate::core::client::rest::RestClient;
use crate::domain::format::pod_table;

/// GET `/api/v1/namespaces/{ns}/pods` by hand and print the result.
pub async fn run<W: Write>(client: &Client, args: &ListArgs, out: &mut W) -> Result<()> {
    debug!("Starting REST demo...");

    let pods: ObjectList<Pod> = RestClient::for_core_v1(client.clone())
        .get()
        .namespace(&args.namespace)
        .resource("pods")
        .params(&ListParams::default().limit(args.limit))
        .send_into()
        .await?;

    write!(out, "{}", pod_table(&pods.items))?;
    Ok(())
}
