//! Codegen for the bridged API stubs.
//!
//! Turns one manifest namespace at a time into content-script statements:
//! `createObjectIn` calls that build the nested namespace objects under the
//! global `chrome` root, and `exportFunction` calls that expose each method
//! as a proxy bound to the `chromeAPIBridge` entry point with its routing
//! metadata.
//!
//! Everything here is pure string construction; the only failure modes are
//! the pre-emission identifier checks in [`crate::validate`].

use serde::Serialize;
use std::collections::HashMap;

use crate::manifest::{MethodStub, NamespaceStub};
use crate::validate::{GeneratorError, IdentifierRegistry, ERR_IO};

/// Global name of the root object every namespace hangs off.
pub const ROOT_OBJECT: &str = "chrome";

/// The single external entry point all method proxies forward to. Referenced
/// by the generated statements, never defined by them; the hand-written
/// fragment scripts provide the implementation.
pub const BRIDGE_ENTRY_POINT: &str = "chromeAPIBridge";

// ═══════════════════════════════════════════════════════════════════════════════
// RESERVED NAMES
// ═══════════════════════════════════════════════════════════════════════════════

/// Substitution table for path segments that would collide with reserved
/// words when used as part of a flattened identifier. The substitution only
/// affects the internal binding name; the externally visible property keeps
/// the original segment text.
#[derive(Debug, Clone)]
pub struct ReservedNames {
    map: HashMap<String, String>,
}

impl Default for ReservedNames {
    fn default() -> Self {
        let mut map = HashMap::new();
        map.insert("debugger".to_string(), "_debugger".to_string());
        ReservedNames { map }
    }
}

impl ReservedNames {
    pub fn empty() -> Self {
        ReservedNames {
            map: HashMap::new(),
        }
    }

    pub fn insert(&mut self, segment: impl Into<String>, substitute: impl Into<String>) {
        self.map.insert(segment.into(), substitute.into());
    }

    /// Exact-match lookup; unmatched segments pass through unchanged.
    pub fn substitute<'a>(&'a self, segment: &'a str) -> &'a str {
        self.map.get(segment).map(|s| s.as_str()).unwrap_or(segment)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// IDENTIFIER FLATTENER
// ═══════════════════════════════════════════════════════════════════════════════

/// Flatten a namespace path into a single identifier by concatenating its
/// segments with reserved-name substitution applied and no separator.
///
/// `upto` is an inclusive truncation index: `Some(i)` keeps segments `0..=i`,
/// `None` keeps the whole path. Pure and total: any non-empty path yields a
/// non-empty identifier.
pub fn flatten_identifier(
    segments: &[String],
    upto: Option<usize>,
    reserved: &ReservedNames,
) -> String {
    segments
        .iter()
        .enumerate()
        .filter(|(i, _)| upto.map_or(true, |limit| *i <= limit))
        .map(|(_, segment)| reserved.substitute(segment))
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════════
// NAMESPACE EMITTER
// ═══════════════════════════════════════════════════════════════════════════════

/// Emit one object-creation statement per path depth, root first, so every
/// ancestor object exists before its children are declared.
///
/// Shared prefixes are re-emitted once per namespace occurrence; dedup is the
/// runtime's concern (`createObjectIn` tolerates re-invocation on an existing
/// name). Each depth's identifier is claimed with the registry first, so a
/// cross-path collision aborts before any corrupt statement is produced.
pub fn emit_namespace_objects(
    ns: &NamespaceStub,
    reserved: &ReservedNames,
    registry: &mut IdentifierRegistry,
) -> Result<String, GeneratorError> {
    let mut output = String::new();

    for depth in 0..ns.segments.len() {
        let identifier = flatten_identifier(&ns.segments, Some(depth), reserved);
        registry.claim(&identifier, &ns.segments[..=depth].join("."))?;

        let name = &ns.segments[depth];
        let owner = if depth == 0 {
            ROOT_OBJECT.to_string()
        } else {
            flatten_identifier(&ns.segments, Some(depth - 1), reserved)
        };
        output.push_str(&format!(
            "var {} = createObjectIn({}, {{ defineAs: \"{}\" }});\n",
            identifier, owner, name
        ));
    }

    Ok(output)
}

// ═══════════════════════════════════════════════════════════════════════════════
// METHOD EMITTER
// ═══════════════════════════════════════════════════════════════════════════════

/// Routing metadata carried as the bound first argument of every proxy.
///
/// The bridge depends on this exact four-key shape; absent callback indices
/// serialize as `null`, never as a missing key.
#[derive(Debug, Serialize)]
struct BridgeMetadata<'a> {
    namespace: &'a str,
    method: &'a str,
    success: Option<i64>,
    failure: Option<i64>,
}

/// Emit one proxy-binding statement per method: the bridge entry point is
/// partially applied with the metadata record, and the bound function is
/// exported on the namespace object under the method's literal name.
pub fn emit_method_bindings(
    ns: &NamespaceStub,
    reserved: &ReservedNames,
) -> Result<String, GeneratorError> {
    let owner = flatten_identifier(&ns.segments, None, reserved);
    let mut output = String::new();

    for method in &ns.functions {
        output.push_str(&emit_method_binding(ns, method, &owner)?);
    }

    Ok(output)
}

fn emit_method_binding(
    ns: &NamespaceStub,
    method: &MethodStub,
    owner: &str,
) -> Result<String, GeneratorError> {
    let metadata = BridgeMetadata {
        namespace: &ns.path,
        method: &method.name,
        success: method.success_callback_index,
        failure: method.failure_callback_index,
    };
    let params = serde_json::to_string(&metadata).map_err(|e| {
        GeneratorError::new(
            ERR_IO,
            format!(
                "failed to serialize metadata for {}.{}: {}",
                ns.path, method.name, e
            ),
        )
    })?;

    Ok(format!(
        "exportFunction({}.bind(null,{}),{},{{ defineAs:\"{}\"}});\n",
        BRIDGE_ENTRY_POINT, params, owner, method.name
    ))
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════
