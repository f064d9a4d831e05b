//! Stubs manifest model and loader.
//!
//! The manifest is a JSON object mapping dot-separated namespace paths to
//! stub definitions, e.g.
//!
//! ```json
//! { "tabs": { "functions": [ { "name": "create", "successCallbackIndex": 1 } ] } }
//! ```
//!
//! Key order in the manifest decides emission order, so the loader goes
//! through serde_json's order-preserving map and produces an explicit
//! `Vec<NamespaceStub>` rather than handing out a hash map.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::validate::{GeneratorError, ERR_BAD_NAMESPACE_PATH, ERR_IO};

// ═══════════════════════════════════════════════════════════════════════════════
// MANIFEST TYPES
// ═══════════════════════════════════════════════════════════════════════════════

/// One method stub. Callback indices are opaque to the generator and are
/// forwarded verbatim into the bridge metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodStub {
    pub name: String,
    #[serde(default)]
    pub success_callback_index: Option<i64>,
    #[serde(default)]
    pub failure_callback_index: Option<i64>,
}

/// Raw per-namespace JSON shape. A namespace entry without a `functions`
/// array is tolerated and treated as having no methods.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceDef {
    #[serde(default)]
    pub functions: Vec<MethodStub>,
}

/// A namespace entry with its path pre-split into segments.
#[derive(Debug, Clone)]
pub struct NamespaceStub {
    pub path: String,
    pub segments: Vec<String>,
    pub functions: Vec<MethodStub>,
}

impl NamespaceStub {
    pub fn new(path: String, functions: Vec<MethodStub>) -> Result<Self, GeneratorError> {
        let segments: Vec<String> = path.split('.').map(|s| s.to_string()).collect();
        if path.is_empty() || segments.iter().any(|s| s.is_empty()) {
            return Err(GeneratorError::new(
                ERR_BAD_NAMESPACE_PATH,
                format!("invalid namespace path \"{}\" in manifest", path),
            ));
        }
        Ok(NamespaceStub {
            path,
            segments,
            functions,
        })
    }
}

/// The whole manifest, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct StubManifest {
    pub namespaces: Vec<NamespaceStub>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// LOADING
// ═══════════════════════════════════════════════════════════════════════════════

pub fn parse_manifest(source: &str) -> Result<StubManifest, GeneratorError> {
    let entries: serde_json::Map<String, serde_json::Value> = serde_json::from_str(source)
        .map_err(|e| GeneratorError::new(ERR_IO, format!("manifest is not a JSON object: {}", e)))?;

    let mut namespaces = Vec::with_capacity(entries.len());
    for (path, value) in entries {
        let def: NamespaceDef = serde_json::from_value(value).map_err(|e| {
            GeneratorError::new(
                ERR_IO,
                format!("malformed manifest entry for \"{}\": {}", path, e),
            )
        })?;
        namespaces.push(NamespaceStub::new(path, def.functions)?);
    }

    Ok(StubManifest { namespaces })
}

pub fn load_manifest(path: &Path) -> Result<StubManifest, GeneratorError> {
    let source = fs::read_to_string(path)
        .map_err(|e| GeneratorError::io(&format!("failed to read manifest {:?}", path), e))?;
    parse_manifest(&source)
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════
