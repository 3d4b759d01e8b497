use anyhow::Result;
use kube::api::{ApiResource, DynamicObject, ListParams};
use kube::core::{GroupVersion, GroupVersionKind, GroupVersionResource};
use kube::{Api, Client};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::core::client::discovery::fetch_resource_list;
use crate::errors::DemoError;

/// `v1/pods`
pub fn core_v1_pods() -> GroupVersionResource {
    GroupVersionResource::gvr("", "v1", "pods")
}

/// Turn a group/version/resource triple into an `ApiResource` by asking the
/// API server which kind it serves under that plural.
pub async fn resolve_api_resource(
    client: &Client,
    gvr: &GroupVersionResource,
) -> Result<ApiResource> {
    let gv = GroupVersion::gv(&gvr.group, &gvr.version);
    let list = fetch_resource_list(client, &gv).await?;

    let found = list
        .resources
        .into_iter()
        .find(|r| r.name == gvr.resource)
        .ok_or_else(|| DemoError::ResourceNotFound {
            group_version: gv.api_version(),
            resource: gvr.resource.clone(),
        })?;

    let gvk = GroupVersionKind::gvk(&gvr.group, &gvr.version, &found.kind);
    debug!("Resolved {}/{} to kind {}", gv.api_version(), gvr.resource, found.kind);
    Ok(ApiResource::from_gvk_with_plural(&gvk, &gvr.resource))
}

/// List untyped objects, optionally restricted to a namespace
pub async fn list_dynamic(
    client: &Client,
    resource: &ApiResource,
    namespace: Option<&str>,
    limit: u32,
) -> Result<Vec<DynamicObject>> {
    let api: Api<DynamicObject> = match namespace {
        Some(ns) => Api::namespaced_with(client.clone(), ns, resource),
        None => Api::all_with(client.clone(), resource),
    };
    let list = api.list(&ListParams::default().limit(limit)).await?;

    debug!("Discovered {} {} object(s)", list.items.len(), resource.kind);
    Ok(list.items)
}

/// Convert unstructured objects into a typed representation
pub fn into_typed<K: DeserializeOwned>(objects: Vec<DynamicObject>) -> Result<Vec<K>, DemoError> {
    objects
        .into_iter()
        .map(|obj| -> Result<K, DemoError> {
            let value = serde_json::to_value(obj)?;
            Ok(serde_json::from_value(value)?)
        })
        .collect()
}
