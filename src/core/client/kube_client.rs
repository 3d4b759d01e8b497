use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use tracing::debug;

use crate::errors::DemoError;

/// Where to find cluster credentials.
#[derive(Debug, Clone, Default)]
pub struct ClientSettings {
    /// Kubeconfig file, already resolved against the home directory.
    pub kubeconfig: Option<PathBuf>,
    /// Context to use instead of the kubeconfig's `current-context`.
    pub context: Option<String>,
}

/// Explicit path first, then `<home>/.kube/config`.
pub fn resolve_kubeconfig_path(
    explicit: Option<PathBuf>,
    home: Option<PathBuf>,
) -> Option<PathBuf> {
    explicit.or_else(|| home.map(|h| h.join(".kube").join("config")))
}

/// Load a client configuration from a kubeconfig file, or infer one
/// (in-cluster service account, `KUBECONFIG`) when no file was given.
pub async fn load_config(settings: &ClientSettings) -> Result<Config> {
    let options = KubeConfigOptions {
        context: settings.context.clone(),
        ..Default::default()
    };

    match &settings.kubeconfig {
        Some(path) => {
            debug!("Loading kubeconfig from {}", path.display());
            let kubeconfig = read_kubeconfig(path)?;
            Config::from_custom_kubeconfig(kubeconfig, &options)
                .await
                .map_err(DemoError::from)
                .with_context(|| format!("invalid kubeconfig {}", path.display()))
        }
        None if settings.context.is_some() => {
            debug!("Using default kubeconfig with context override");
            Ok(Config::from_kubeconfig(&options)
                .await
                .map_err(DemoError::from)?)
        }
        None => {
            debug!("No kubeconfig path, inferring configuration");
            Ok(Config::infer().await.map_err(DemoError::from)?)
        }
    }
}

/// Read a kubeconfig path, which may be a list joined by the platform path
/// separator as in `KUBECONFIG`.
///
/// Missing entries of a list are skipped and the rest are merged in order,
/// earlier files winning. A single path, or a list where nothing exists,
/// fails with the read error of its first entry.
fn read_kubeconfig(path: &Path) -> Result<Kubeconfig> {
    let entries: Vec<PathBuf> = std::env::split_paths(path.as_os_str())
        .filter(|p| !p.as_os_str().is_empty())
        .collect();

    let (first, rest) = match entries.split_first() {
        Some((first, rest)) if !rest.is_empty() => (first, rest),
        _ => return read_single_kubeconfig(path),
    };

    let mut existing = std::iter::once(first).chain(rest).filter(|p| p.exists());
    let Some(base) = existing.next() else {
        return read_single_kubeconfig(first);
    };

    let mut merged = read_single_kubeconfig(base)?;
    for next in existing {
        debug!("Merging kubeconfig {}", next.display());
        let kubeconfig = read_single_kubeconfig(next)?;
        merged = merged
            .merge(kubeconfig)
            .map_err(DemoError::from)
            .with_context(|| format!("failed to merge kubeconfig {}", next.display()))?;
    }
    Ok(merged)
}

fn read_single_kubeconfig(path: &Path) -> Result<Kubeconfig> {
    Kubeconfig::read_from(path)
        .map_err(DemoError::from)
        .with_context(|| format!("failed to read kubeconfig {}", path.display()))
}

/// Creates a Kubernetes client from the given settings
pub async fn build_kube_client(settings: &ClientSettings) -> Result<Client> {
    let config = load_config(settings).await?;
    debug!(
        "Connecting to {} (default namespace '{}')",
        config.cluster_url, config.default_namespace
    );

    let client = Client::try_from(config).map_err(DemoError::from)?;

    debug!("Kubernetes client initialized successfully");
    Ok(client)
}
