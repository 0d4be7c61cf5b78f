use iri_string::types::UriReferenceStr;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Identifier of a registered node (e.g., `"1"`, `"eosc-beyond-01"`).
///
/// Ids are expected to be unique within one registry generation, but nothing
/// enforces it: lookups return the first node in storage order.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        NodeId(value.to_string())
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// A URI reference kept exactly as written.
///
/// Construction checks RFC 3986 syntax, so absolute URIs and relative
/// references (`/static/logo.png`) are both accepted. Nothing is normalized:
/// `http://x` stays `http://x` and case is preserved.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Uri(String);

/// Rejected URI syntax, carrying the validator's description.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct UriSyntaxError(String);

impl Uri {
    pub fn parse(raw: &str) -> Result<Self, UriSyntaxError> {
        Uri::try_from(raw.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Uri {
    type Error = UriSyntaxError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        UriReferenceStr::new(&value).map_err(|err| UriSyntaxError(err.to_string()))?;
        Ok(Uri(value))
    }
}

impl From<Uri> for String {
    fn from(value: Uri) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_serializes_as_plain_string() {
        let id = NodeId::from("node-7");
        let serialized = serde_json::to_string(&id).unwrap();
        assert_eq!(serialized, "\"node-7\"");
        let parsed: NodeId = serde_json::from_str(&serialized).unwrap();
        assert_eq!(parsed, id);
        assert_eq!(parsed.as_str(), "node-7");
    }

    #[test]
    fn uri_keeps_original_text() {
        assert_eq!(Uri::parse("http://x").unwrap().as_str(), "http://x");
        assert_eq!(
            Uri::parse("HTTP://Example.COM/Logo.png").unwrap().as_str(),
            "HTTP://Example.COM/Logo.png"
        );
    }

    #[test]
    fn uri_accepts_relative_references() {
        assert_eq!(Uri::parse("/static/logo.png").unwrap().as_str(), "/static/logo.png");
        assert!(Uri::parse("logo.png").is_ok());
    }

    #[test]
    fn uri_rejects_bad_syntax() {
        for raw in ["not a uri", " http://x", "http://x/a b", "::nope", "http://x/{id}"] {
            assert!(Uri::parse(raw).is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn uri_deserialization_validates() {
        let parsed: Uri = serde_json::from_str("\"http://x\"").unwrap();
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"http://x\"");
        assert!(serde_json::from_str::<Uri>("\"not a uri\"").is_err());
    }
}
