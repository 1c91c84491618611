//! esa document store access

pub mod client;

pub use client::{DocumentSource, EsaClient, resolve_post_number};
