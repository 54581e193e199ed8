//! REST client for the scan server
//!
//! Every dashboard action and the update poller's status check go through
//! [`ApiClient`].

pub(crate) mod client;
pub(crate) mod types;

pub(crate) use client::{ApiClient, StatusEndpoint};
pub(crate) use types::{Laptop, ScanReport};
