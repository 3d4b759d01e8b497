pub mod format;
pub mod manifests;
