use anyhow::Result;
use kube::api::{GetParams, ListParams};
use kube::core::{GroupVersion, Request};
use kube::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::DemoError;

/// A low-level client pinned to one API path and group version.
///
/// Requests are assembled by hand and sent through the kube client, so
/// authentication and TLS are still handled by the kubeconfig.
#[derive(Clone)]
pub struct RestClient {
    client: Client,
    api_path: String,
    group_version: GroupVersion,
}

impl RestClient {
    /// `api_path` is `api` for the core group and `apis` for named groups.
    pub fn new(client: Client, api_path: &str, group_version: GroupVersion) -> Self {
        Self {
            client,
            api_path: api_path.trim_matches('/').to_string(),
            group_version,
        }
    }

    /// Client for `/api/v1`
    pub fn for_core_v1(client: Client) -> Self {
        Self::new(client, "api", GroupVersion::gv("", "v1"))
    }

    pub fn base_path(&self) -> String {
        let mut path = format!("/{}", self.api_path);
        if !self.group_version.group.is_empty() {
            path.push('/');
            path.push_str(&self.group_version.group);
        }
        path.push('/');
        path.push_str(&self.group_version.version);
        path
    }

    pub fn get(&self) -> RestRequest<'_> {
        RestRequest {
            rest: self,
            namespace: None,
            resource: None,
            name: None,
            params: None,
        }
    }
}

/// A GET request under construction
pub struct RestRequest<'a> {
    rest: &'a RestClient,
    namespace: Option<String>,
    resource: Option<String>,
    name: Option<String>,
    params: Option<ListParams>,
}

impl RestRequest<'_> {
    pub fn namespace(mut self, namespace: &str) -> Self {
        self.namespace = Some(namespace.to_string());
        self
    }

    pub fn resource(mut self, resource: &str) -> Self {
        self.resource = Some(resource.to_string());
        self
    }

    /// Address a single object instead of the collection.
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Query parameters for collection requests (limit, selectors).
    ///
    /// Not valid together with [`RestRequest::name`]; `build` rejects the pair.
    pub fn params(mut self, params: &ListParams) -> Self {
        self.params = Some(params.clone());
        self
    }

    /// Collection path, without the object name.
    pub fn url_path(&self) -> String {
        let mut path = self.rest.base_path();
        if let Some(ns) = &self.namespace {
            path.push_str("/namespaces/");
            path.push_str(ns);
        }
        if let Some(resource) = &self.resource {
            path.push('/');
            path.push_str(resource);
        }
        path
    }

    pub fn build(&self) -> Result<http::Request<Vec<u8>>> {
        let request = Request::new(self.url_path());
        let built = match (&self.name, &self.params) {
            (Some(name), None) => request.get(name, &GetParams::default())?,
            (None, Some(params)) => request.list(params)?,
            (None, None) => request.list(&ListParams::default())?,
            (Some(name), Some(_)) => {
                return Err(DemoError::InvalidRequest(format!(
                    "list parameters cannot be sent with a single object GET ({})",
                    name
                ))
                .into())
            }
        };
        Ok(built)
    }

    /// Send the request and decode the JSON response into `T`
    pub async fn send_into<T: DeserializeOwned>(self) -> Result<T> {
        let request = self.build()?;
        debug!("GET {}", request.uri());

        let decoded = self.rest.client.request::<T>(request).await?;
        Ok(decoded)
    }
}
