use std::fmt::Write;

use kube::core::GroupVersion;

use crate::core::client::kube_resources::{APIGroup, APIResource, APIResourceList, Deployment, Pod};

pub const SEPARATOR_WIDTH: usize = 110;

pub fn separator() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}

/// `namespace  status  name` table, one row per pod.
pub fn pod_table(pods: &[Pod]) -> String {
    let mut out = String::from("namespace\t\tstatus\t\tname\n");
    for pod in pods {
        let phase = pod
            .status
            .as_ref()
            .and_then(|s| s.phase.as_deref())
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{}\t\t{}\t\t{}",
            pod.metadata.namespace.as_deref().unwrap_or_default(),
            phase,
            pod.metadata.name.as_deref().unwrap_or_default()
        );
    }
    out
}

pub fn namespace_lines(names: &[String]) -> Vec<String> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| format!("Cluster namespace {} : {}", i, name))
        .collect()
}

fn replicas(deployment: &Deployment) -> i32 {
    deployment
        .spec
        .as_ref()
        .and_then(|s| s.replicas)
        .unwrap_or_default()
}

pub fn deployment_line(deployment: &Deployment) -> String {
    format!(
        "namespace = {}, name = {}({} replicas)",
        deployment.metadata.namespace.as_deref().unwrap_or_default(),
        deployment.metadata.name.as_deref().unwrap_or_default(),
        replicas(deployment)
    )
}

pub fn deployment_bullet(deployment: &Deployment) -> String {
    format!(
        " * namespace = {}, name = {}, replicas = {}",
        deployment.metadata.namespace.as_deref().unwrap_or_default(),
        deployment.metadata.name.as_deref().unwrap_or_default(),
        replicas(deployment)
    )
}

fn group_summary(group: &APIGroup) -> String {
    let versions: Vec<&str> = group
        .versions
        .iter()
        .map(|v| v.group_version.as_str())
        .collect();
    let preferred = group
        .preferred_version
        .as_ref()
        .map(|p| p.group_version.as_str())
        .unwrap_or_default();

    format!(
        "{{Name:{}, Versions:[{}], PreferredVersion:{}}}",
        group.name,
        versions.join(" "),
        preferred
    )
}

pub fn groups_line(groups: &[APIGroup]) -> String {
    let summaries: Vec<String> = groups.iter().map(group_summary).collect();
    format!("apiGroups: [{}]", summaries.join(" "))
}

pub fn group_version_line(raw: &str, gv: &GroupVersion) -> String {
    format!(
        "groupVersionStr: {}, groupVersionStruct: GroupVersion{{Group:{:?}, Version:{:?}}}",
        raw, gv.group, gv.version
    )
}

pub fn resource_line(resource: &APIResource) -> String {
    let short_names = resource
        .short_names
        .as_deref()
        .unwrap_or_default()
        .join(" ");
    format!(
        "apiResource Name: {}, Shortname: [{}], Kind: {}",
        resource.name, short_names, resource.kind
    )
}

/// Separator, parsed group version and the resources of one list.
pub fn resource_list_block(list: &APIResourceList, gv: &GroupVersion) -> String {
    let mut out = separator();
    out.push('\n');
    out.push_str(&group_version_line(&list.group_version, gv));
    out.push('\n');
    for resource in &list.resources {
        out.push_str(&resource_line(resource));
        out.push('\n');
    }
    out
}
