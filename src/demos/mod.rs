//! One runner per way of talking to the API server.
//!
//! Results go to the given writer; progress goes to the log.

pub mod clientset;
pub mod discovery;
pub mod dynamic;
pub mod rest;
