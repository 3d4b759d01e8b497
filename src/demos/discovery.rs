use std::io::Write;

use anyhow::Result;
use kube::Client;
use tracing::debug;

use crate::config::DiscoveryArgs;
use crate::core::client::discovery::{
    fetch_server_groups, fetch_server_groups_and_resources, parse_group_version,
};
use crate::domain::format::{groups_line, resource_list_block};

/// Print the API groups, then every resource of every served group version.
pub async fn run<W: Write>(client: &Client, args: &DiscoveryArgs, out: &mut W) -> Result<()> {
    debug!("Starting discovery demo...");

    if args.groups_only {
        let groups = fetch_server_groups(client).await?;
        writeln!(out, "{}", groups_line(&groups))?;
        return Ok(());
    }

    let server = fetch_server_groups_and_resources(client).await?;
    writeln!(out, "{}", groups_line(&server.groups))?;

    for list in &server.resource_lists {
        let gv = parse_group_version(&list.group_version)?;
        write!(out, "{}", resource_list_block(list, &gv))?;
    }
    Ok(())
}
