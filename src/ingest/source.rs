//! Resolution of an ingestion source identifier to text.
//!
//! A concrete file on disk wins; otherwise the identifier is looked up among
//! the resources compiled into the crate (full identifier first, then its last
//! path component, so `src/resources/nodes.csv` still finds `nodes.csv`).

use crate::ingest::IngestError;
use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

const BUNDLED_RESOURCES: &[(&str, &str)] =
    &[("nodes.csv", include_str!("../../resources/nodes.csv"))];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceOrigin {
    File(PathBuf),
    Bundled(&'static str),
}

impl fmt::Display for SourceOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceOrigin::File(path) => write!(f, "file {}", path.display()),
            SourceOrigin::Bundled(name) => write!(f, "bundled resource {name}"),
        }
    }
}

/// Text of a resolved source plus where it came from.
#[derive(Clone, Debug)]
pub struct SourceText {
    pub origin: SourceOrigin,
    pub contents: Cow<'static, str>,
}

/// Read `identifier` from disk, falling back to a bundled resource.
pub fn resolve_source(identifier: &str) -> Result<SourceText, IngestError> {
    let path = Path::new(identifier);
    if path.is_file() {
        let contents = fs::read_to_string(path).map_err(|source| IngestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        return Ok(SourceText {
            origin: SourceOrigin::File(path.to_path_buf()),
            contents: Cow::Owned(contents),
        });
    }

    if let Some((name, contents)) = bundled_resource(identifier) {
        return Ok(SourceText {
            origin: SourceOrigin::Bundled(name),
            contents: Cow::Borrowed(contents),
        });
    }

    Err(IngestError::SourceNotFound(identifier.to_string()))
}

fn bundled_resource(identifier: &str) -> Option<(&'static str, &'static str)> {
    let file_name = Path::new(identifier)
        .file_name()
        .and_then(|name| name.to_str());
    BUNDLED_RESOURCES
        .iter()
        .find(|(name, _)| *name == identifier)
        .or_else(|| {
            let file_name = file_name?;
            BUNDLED_RESOURCES.iter().find(|(name, _)| *name == file_name)
        })
        .copied()
}
