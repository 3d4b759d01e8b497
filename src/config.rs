use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::client::kube_client::{resolve_kubeconfig_path, ClientSettings};
use crate::domain::manifests::{
    DEPLOYMENT_NAME, KUBE_SYSTEM_NAMESPACE, NGINX_NAMESPACE, NODE_PORT, SERVICE_NAME,
    UPDATED_NODE_PORT,
};

pub const DEFAULT_LIST_LIMIT: u32 = 100;

#[derive(Debug, Parser)]
#[command(name = "kubeclient-demos")]
#[command(about = "Four ways to talk to a Kubernetes API server", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Kubeconfig file, or a list joined by the path separator as in
    /// `KUBECONFIG` (default: ~/.kube/config)
    #[arg(long, env = "KUBECONFIG", global = true)]
    pub kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use instead of the current one
    #[arg(long, env = "KUBEDEMO_CONTEXT", global = true)]
    pub context: Option<String>,

    /// Also write logs to a daily rolling file in this directory
    #[arg(long, env = "KUBEDEMO_LOG_DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Typed client: namespaces, deployments and services CRUD
    Clientset(ClientsetArgs),

    /// Discovery client: list API groups, versions and resources
    Discovery(DiscoveryArgs),

    /// Dynamic client: list pods as unstructured objects
    Dynamic(ListArgs),

    /// REST client: list pods with a hand-built GET request
    Rest(ListArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ClientsetArgs {
    /// Namespace the demo deployment and service are created in
    #[arg(long, default_value = NGINX_NAMESPACE)]
    pub namespace: String,

    /// Namespace whose deployments and pods are listed first
    #[arg(long, default_value = KUBE_SYSTEM_NAMESPACE)]
    pub system_namespace: String,

    #[arg(long, default_value = DEPLOYMENT_NAME)]
    pub deployment_name: String,

    #[arg(long, default_value = SERVICE_NAME)]
    pub service_name: String,

    #[arg(long, default_value_t = NODE_PORT)]
    pub node_port: i32,

    #[arg(long, default_value_t = UPDATED_NODE_PORT)]
    pub updated_node_port: i32,

    /// Maximum number of pods listed
    #[arg(long, default_value_t = DEFAULT_LIST_LIMIT)]
    pub limit: u32,

    /// Do not pause between steps
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Debug, Clone, Args)]
pub struct DiscoveryArgs {
    /// Print the group list only
    #[arg(long)]
    pub groups_only: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    #[arg(long, default_value = KUBE_SYSTEM_NAMESPACE)]
    pub namespace: String,

    /// Maximum number of objects returned by the API server
    #[arg(long, default_value_t = DEFAULT_LIST_LIMIT)]
    pub limit: u32,
}

impl Cli {
    /// Client settings with the kubeconfig path resolved against `home`.
    ///
    /// A missing `~/.kube/config` leaves the path unset so the client can
    /// fall back to in-cluster configuration. An explicit path is kept as is.
    pub fn client_settings(&self, home: Option<PathBuf>) -> ClientSettings {
        let explicit = self.kubeconfig.is_some();
        let kubeconfig = resolve_kubeconfig_path(self.kubeconfig.clone(), home)
            .filter(|path| explicit || path.exists());

        ClientSettings {
            kubeconfig,
            context: self.context.clone(),
        }
    }
}

/// Home directory of the current user, if known.
pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

/// Load `.env` from the working directory, if present.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}
