//! Node records produced by ingestion and held by the registry.
//!
//! Types here are plain data with no back-reference to the registry; the
//! parsers build them and the registry owns them once swapped in.

pub mod identity;
pub mod model;

pub use identity::{NodeId, Uri, UriSyntaxError};
pub use model::{Capability, LegalEntity, Node, NodeSummary, load_nodes_json};
