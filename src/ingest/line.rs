//! Decoder for one top-level node line.
//!
//! A line is `id,name,logo,pid,[entity;ror],endpoint,[type;url;ver];[...]`.
//! The result is tagged: a full `Node`, or a `SkipReason` explaining why the
//! line contributes nothing. Partially populated nodes are never produced.

use crate::ingest::blocks::{
    InvalidUri, UriField, parse_capabilities, parse_legal_entity, parse_uri, split_pieces,
};
use crate::node::{Node, NodeId};
use thiserror::Error;

/// Number of comma-separated fields a node line must carry.
pub const FIELDS_PER_LINE: usize = 7;

const FIELD_SEPARATOR: &str = ",";

const ID_FIELD: usize = 0;
const NAME_FIELD: usize = 1;
const LOGO_FIELD: usize = 2;
const PID_FIELD: usize = 3;
const LEGAL_ENTITY_FIELD: usize = 4;
const ENDPOINT_FIELD: usize = 5;
const CAPABILITIES_FIELD: usize = 6;

/// Why a line was dropped from the load.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SkipReason {
    #[error("expected 7 comma-separated fields, found {found}")]
    FieldCount { found: usize },
    #[error(transparent)]
    InvalidUri(#[from] InvalidUri),
}

/// Parse one raw line into a node.
///
/// This is the only place the field-count gate is applied.
pub fn parse_line(line: &str) -> Result<Node, SkipReason> {
    let fields = split_pieces(line, FIELD_SEPARATOR);
    if fields.len() != FIELDS_PER_LINE {
        return Err(SkipReason::FieldCount {
            found: fields.len(),
        });
    }
    parse_fields(&fields)
}

fn parse_fields(fields: &[&str]) -> Result<Node, SkipReason> {
    let id = NodeId(fields[ID_FIELD].trim().to_string());
    let name = fields[NAME_FIELD].trim().to_string();
    let logo = parse_uri(UriField::Logo, fields[LOGO_FIELD].trim())?;
    let pid = fields[PID_FIELD].trim().to_string();
    let legal_entity = parse_legal_entity(fields[LEGAL_ENTITY_FIELD].trim())?;
    let endpoint = parse_uri(UriField::Endpoint, fields[ENDPOINT_FIELD].trim())?;
    let capabilities = parse_capabilities(fields[CAPABILITIES_FIELD].trim())?;

    Ok(Node {
        id,
        name,
        logo,
        pid,
        legal_entity,
        endpoint,
        capabilities,
    })
}
