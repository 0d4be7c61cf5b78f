//! Decoders for the bracketed sub-blocks embedded in a node line.
//!
//! A legal-entity block is `[name;rorURI]`; a capability block is one or more
//! `[type;endpoint;version]` triples joined by `];[`. Wrong-arity pieces are
//! tolerated (an empty legal entity, an omitted triple), but an unparsable URI
//! is returned as an error so the caller can drop the whole node.

use crate::node::{Capability, LegalEntity, Uri, UriSyntaxError};
use std::fmt;
use thiserror::Error;
use tracing::debug;

const ELEMENTS_PER_LEGAL_ENTITY: usize = 2;
const ELEMENTS_PER_CAPABILITY: usize = 3;
const CAPABILITY_SEPARATOR: &str = "];[";
const PART_SEPARATOR: &str = ";";

/// Which URI-shaped position in a node line failed to parse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UriField {
    Logo,
    Endpoint,
    LegalEntityRegistryId,
    CapabilityEndpoint,
}

impl UriField {
    pub fn as_str(&self) -> &'static str {
        match self {
            UriField::Logo => "logo",
            UriField::Endpoint => "endpoint",
            UriField::LegalEntityRegistryId => "legal entity registry id",
            UriField::CapabilityEndpoint => "capability endpoint",
        }
    }
}

impl fmt::Display for UriField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("invalid {field} URI '{value}': {source}")]
pub struct InvalidUri {
    pub field: UriField,
    pub value: String,
    #[source]
    pub source: UriSyntaxError,
}

/// Parse one URI-shaped field exactly as given. Callers decide what to trim.
pub fn parse_uri(field: UriField, raw: &str) -> Result<Uri, InvalidUri> {
    Uri::parse(raw).map_err(|source| InvalidUri {
        field,
        value: raw.to_string(),
        source,
    })
}

/// Split on `separator`, dropping trailing empty pieces.
///
/// `"a,b,"` yields two pieces and `""` yields one empty piece, so field counts
/// ignore a dangling separator at the end of a line or block.
pub(crate) fn split_pieces<'a>(input: &'a str, separator: &str) -> Vec<&'a str> {
    let mut pieces: Vec<&str> = input.split(separator).collect();
    while pieces.len() > 1 && pieces.last().is_some_and(|piece| piece.is_empty()) {
        pieces.pop();
    }
    pieces
}

fn strip_brackets(input: &str) -> String {
    input.chars().filter(|c| !matches!(c, '[' | ']')).collect()
}

/// Decode a `[name;rorURI]` block.
///
/// Anything other than exactly two parts yields an empty `LegalEntity` rather
/// than an error. The name and the registry id are kept verbatim, so a
/// registry id with surrounding whitespace is rejected.
pub fn parse_legal_entity(block: &str) -> Result<LegalEntity, InvalidUri> {
    let cleaned = strip_brackets(block);
    let parts = split_pieces(&cleaned, PART_SEPARATOR);
    if parts.len() != ELEMENTS_PER_LEGAL_ENTITY {
        debug!(parts = parts.len(), "legal entity block incomplete");
        return Ok(LegalEntity::default());
    }
    let registry_id = parse_uri(UriField::LegalEntityRegistryId, parts[1])?;
    Ok(LegalEntity::new(parts[0], registry_id))
}

/// Decode `[type;endpoint;version];[type;endpoint;version]...` in input order.
///
/// Triples without exactly three parts, or with a blank type, are omitted.
/// Type and version are trimmed; the endpoint is not. A bad endpoint URI
/// fails the entire block.
pub fn parse_capabilities(block: &str) -> Result<Vec<Capability>, InvalidUri> {
    let mut capabilities = Vec::new();
    for chunk in split_pieces(block, CAPABILITY_SEPARATOR) {
        let cleaned = strip_brackets(chunk);
        let parts = split_pieces(&cleaned, PART_SEPARATOR);
        if parts.len() != ELEMENTS_PER_CAPABILITY {
            debug!(parts = parts.len(), chunk, "skipping capability triple");
            continue;
        }
        let capability_type = parts[0].trim();
        if capability_type.is_empty() {
            debug!(chunk, "skipping capability triple with blank type");
            continue;
        }
        let endpoint = parse_uri(UriField::CapabilityEndpoint, parts[1])?;
        capabilities.push(Capability::new(capability_type, endpoint, parts[2].trim()));
    }
    debug!(count = capabilities.len(), "capabilities decoded");
    Ok(capabilities)
}
