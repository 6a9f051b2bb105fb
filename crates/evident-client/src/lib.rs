//! # evident-client — Caching Metadata Client
//!
//! Fronts a remote metadata source with a local, no-expiry cache keyed by
//! policy rule id.
//!
//! ## Static vs. Dynamic
//!
//! Compliance metadata for a rule is immutable for the life of the process,
//! so it is fetched once and cached forever. The compliance verdict depends
//! on the evidence in hand, so it is recomputed locally on every
//! [`CachedMetadataClient::retrieve`] and never cached.
//!
//! ## Prefetch
//!
//! [`CachedMetadataClient::prefetch`] warms the cache in chunks through the
//! batch endpoint. It is best-effort: a failed chunk is logged and skipped,
//! and per-item errors are simply not cached.
//!
//! ## Layout
//!
//! - [`MetadataSource`]: the outbound seam; [`HttpMetadataClient`] is the
//!   HTTP implementation.
//! - [`MetadataCache`]: concurrent `rule id → outcome` map.
//! - [`CachedMetadataClient`]: retrieve and prefetch over a source.
//! - [`Enricher`]: applies enrichment to key/value attribute records.

pub mod cache;
pub mod cacheable;
pub mod config;
pub mod enricher;
pub mod error;
pub mod http;
pub(crate) mod retry;
pub mod source;

pub use cache::MetadataCache;
pub use cacheable::{CachedMetadataClient, PrefetchReport};
pub use config::{ClientConfig, ConfigError};
pub use enricher::{AttributeRecord, AttributeValue, EnrichmentSummary, Enricher};
pub use error::ClientError;
pub use http::HttpMetadataClient;
pub use source::MetadataSource;
