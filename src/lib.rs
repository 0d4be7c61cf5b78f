//! Shared library for the federated node registry.
//!
//! The crate ingests delimited node records, keeps the resulting node set in
//! memory, and answers lookups by id or by offered capability. Public items
//! here form the contract an outer layer (HTTP handlers, the bundled CLI)
//! calls into: `ingest` to load a source, and a `NodeRegistry` instance for
//! initialize, replace, and lookups.
//!
//! Node lines look like:
//!
//! ```text
//! id,name,logoURI,pid,[legalEntityName;rorURI],endpointURI,[type;endpoint;version];[...]
//! ```

pub mod config;
pub mod ingest;
pub mod logging;
pub mod node;
pub mod registry;

pub use config::RegistryConfig;
pub use ingest::{
    FIELDS_PER_LINE, IngestError, IngestReport, InvalidUri, SkipReason, SkippedLine, SourceOrigin,
    UriField, ingest, ingest_report, ingest_str, parse_capabilities, parse_legal_entity,
    parse_line, resolve_source,
};
pub use node::{
    Capability, LegalEntity, Node, NodeId, NodeSummary, Uri, UriSyntaxError, load_nodes_json,
};
pub use registry::{Generation, NodeRegistry, RegistryState};

/// Load `identifier` into a freshly constructed, `Ready` registry.
///
/// Hosts call this once at startup and share the returned registry.
pub fn bootstrap(identifier: &str) -> Result<NodeRegistry, IngestError> {
    let nodes = ingest(identifier)?;
    Ok(NodeRegistry::with_nodes(nodes))
}
