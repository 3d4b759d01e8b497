use anyhow::Result;
use kube::core::GroupVersion;
use kube::Client;
use tracing::{debug, warn};

use crate::core::client::kube_resources::{APIGroup, APIResourceList, GroupVersionForDiscovery};
use crate::errors::DemoError;

/// Everything the API server advertises: its groups, and one resource list
/// per group version that could be loaded.
#[derive(Debug, Default)]
pub struct ServerResources {
    pub groups: Vec<APIGroup>,
    pub resource_lists: Vec<APIResourceList>,
}

/// Parse an `apiVersion`-style string ("v1", "apps/v1").
///
/// "" and "/" yield an empty group version.
pub fn parse_group_version(raw: &str) -> Result<GroupVersion, DemoError> {
    if raw.is_empty() || raw == "/" {
        return Ok(GroupVersion::gv("", ""));
    }

    match raw.split_once('/') {
        None => Ok(GroupVersion::gv("", raw)),
        Some((_, version)) if version.contains('/') => {
            Err(DemoError::InvalidGroupVersion(raw.to_string()))
        }
        Some((group, version)) => Ok(GroupVersion::gv(group, version)),
    }
}

/// The legacy core group as served under `/api`.
fn core_group(versions: &[String]) -> APIGroup {
    let versions: Vec<GroupVersionForDiscovery> = versions
        .iter()
        .map(|v| GroupVersionForDiscovery {
            group_version: v.clone(),
            version: v.clone(),
        })
        .collect();

    APIGroup {
        name: String::new(),
        preferred_version: versions.first().cloned(),
        versions,
        ..Default::default()
    }
}

/// Fetch the core group followed by every named API group
pub async fn fetch_server_groups(client: &Client) -> Result<Vec<APIGroup>> {
    let core = client.list_core_api_versions().await?;
    let named = client.list_api_groups().await?;

    let mut groups = Vec::with_capacity(named.groups.len() + 1);
    groups.push(core_group(&core.versions));
    groups.extend(named.groups);

    debug!("Discovered {} API group(s)", groups.len());
    Ok(groups)
}

/// Fetch the resources served for a single group version
pub async fn fetch_resource_list(client: &Client, gv: &GroupVersion) -> Result<APIResourceList> {
    let list = if gv.group.is_empty() {
        client.list_core_api_resources(&gv.version).await?
    } else {
        client.list_api_group_resources(&gv.api_version()).await?
    };

    debug!(
        "Discovered {} resource(s) in {}",
        list.resources.len(),
        list.group_version
    );
    Ok(list)
}

/// Fetch all groups and the resources of every version they serve.
///
/// A group version that fails to load is skipped with a warning.
pub async fn fetch_server_groups_and_resources(client: &Client) -> Result<ServerResources> {
    let groups = fetch_server_groups(client).await?;
    let mut resource_lists = Vec::new();

    for group in &groups {
        for version in &group.versions {
            let gv = GroupVersion::gv(&group.name, &version.version);
            match fetch_resource_list(client, &gv).await {
                Ok(list) => resource_lists.push(list),
                Err(e) => warn!(
                    "Skipping group version {}: {:#}",
                    version.group_version, e
                ),
            }
        }
    }

    Ok(ServerResources {
        groups,
        resource_lists,
    })
}
