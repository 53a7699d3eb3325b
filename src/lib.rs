//! The `dekaplet` marketing-site backend: health, status checks, contact
//! form inbox and newsletter subscriptions over a document store.

pub mod app;
pub mod domain;
pub mod routes;
pub mod store;
