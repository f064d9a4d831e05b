//! Final assembly of the generated content script.
//!
//! Concatenation order is part of the output contract: header comment, root
//! bootstrap, then for each namespace in manifest order its object-creation
//! block immediately followed by its method bindings, then the auxiliary
//! fragments. Assembly is pure; the one terminal write happens only after
//! the whole buffer was built, so a failed run leaves no partial output.

use std::fs;
use std::path::Path;

use crate::codegen::{
    emit_method_bindings, emit_namespace_objects, ReservedNames, ROOT_OBJECT,
};
use crate::discovery::{discover_fragments, FragmentFile};
use crate::manifest::{load_manifest, StubManifest};
use crate::validate::{GeneratorError, IdentifierRegistry};

// Well-known paths, relative to the invocation directory.
pub const MANIFEST_PATH: &str = "definitions/stubs.json";
pub const FRAGMENTS_DIR: &str = "scripts/chrome-api-child";
pub const OUTPUT_PATH: &str = "data/chrome-api-child.js";

const HEADER: &str = "/**\n * THIS FILE GENERATED BY stubgen.\n * DO NOT EDIT MANUALLY.\n */\n\n";

// ═══════════════════════════════════════════════════════════════════════════════
// ASSEMBLY
// ═══════════════════════════════════════════════════════════════════════════════

/// Root bootstrap: create the global `chrome` object in the page window, and
/// the callback-id counter the hand-written bridge fragments increment.
fn bootstrap() -> String {
    format!(
        "var {root} = createObjectIn(unsafeWindow, {{ defineAs: \"{root}\" }});\nvar INC_ID = 0;\n",
        root = ROOT_OBJECT
    )
}

/// Build the complete content script as one string.
pub fn assemble(
    manifest: &StubManifest,
    reserved: &ReservedNames,
    fragments: &[FragmentFile],
) -> Result<String, GeneratorError> {
    let mut output = String::new();
    let mut registry = IdentifierRegistry::new();

    output.push_str(HEADER);
    output.push_str(&bootstrap());

    for ns in &manifest.namespaces {
        output.push_str(&emit_namespace_objects(ns, reserved, &mut registry)?);
        output.push_str(&emit_method_bindings(ns, reserved)?);
    }

    for fragment in fragments {
        output.push_str(&fragment.contents);
    }

    Ok(output)
}

// ═══════════════════════════════════════════════════════════════════════════════
// PIPELINE
// ═══════════════════════════════════════════════════════════════════════════════

/// Run the whole generation pipeline: load the manifest, discover fragments,
/// assemble, and write the output file in a single terminal write.
pub fn generate_content_script(
    manifest_path: &Path,
    fragments_dir: &Path,
    dest: &Path,
) -> Result<(), GeneratorError> {
    let manifest = load_manifest(manifest_path)?;
    let fragments = discover_fragments(fragments_dir)?;
    let output = assemble(&manifest, &ReservedNames::default(), &fragments)?;

    fs::write(dest, output)
        .map_err(|e| GeneratorError::io(&format!("failed to write {:?}", dest), e))
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::parse_manifest;

    fn fragment(name: &str, contents: &str) -> FragmentFile {
        FragmentFile {
            name: name.to_string(),
            contents: contents.to_string(),
        }
    }

    #[test]
    fn test_assemble_order_bootstrap_blocks_fragments() {
        let manifest = parse_manifest(
            r#"{ "tabs": { "functions": [ { "name": "create", "successCallbackIndex": 1 } ] } }"#,
        )
        .unwrap();
        let fragments = vec![fragment("init.js", "// fragment init\n")];

        let output = assemble(&manifest, &ReservedNames::default(), &fragments).unwrap();

        let bootstrap_at = output
            .find("var chrome = createObjectIn(unsafeWindow, { defineAs: \"chrome\" });")
            .unwrap();
        let inc_at = output.find("var INC_ID = 0;").unwrap();
        let tabs_at = output
            .find("var tabs = createObjectIn(chrome, { defineAs: \"tabs\" });")
            .unwrap();
        let method_at = output.find("exportFunction(").unwrap();
        let fragment_at = output.find("// fragment init").unwrap();

        assert!(output.starts_with("/**\n * THIS FILE GENERATED BY stubgen.\n"));
        assert!(bootstrap_at < inc_at);
        assert!(inc_at < tabs_at);
        assert!(tabs_at < method_at);
        assert!(method_at < fragment_at);
    }

    #[test]
    fn test_assemble_metadata_literal() {
        let manifest = parse_manifest(
            r#"{ "tabs": { "functions": [ { "name": "create", "successCallbackIndex": 1 } ] } }"#,
        )
        .unwrap();

        let output = assemble(&manifest, &ReservedNames::default(), &[]).unwrap();
        assert!(output.contains(
            "exportFunction(chromeAPIBridge.bind(null,\
             {\"namespace\":\"tabs\",\"method\":\"create\",\"success\":1,\"failure\":null}),\
             tabs,{ defineAs:\"create\"});"
        ));
    }

    #[test]
    fn test_assemble_nested_namespace_ordering() {
        let manifest = parse_manifest(
            r#"{ "a.b": { "functions": [ { "name": "go" } ] } }"#,
        )
        .unwrap();

        let output = assemble(&manifest, &ReservedNames::default(), &[]).unwrap();
        let a_at = output
            .find("var a = createObjectIn(chrome, { defineAs: \"a\" });")
            .unwrap();
        let ab_at = output
            .find("var ab = createObjectIn(a, { defineAs: \"b\" });")
            .unwrap();
        let go_at = output.find(",ab,{ defineAs:\"go\"});").unwrap();
        assert!(a_at < ab_at);
        assert!(ab_at < go_at);
    }

    #[test]
    fn test_assemble_is_deterministic() {
        let manifest = parse_manifest(
            r#"{
                "tabs": { "functions": [ { "name": "create", "successCallbackIndex": 1 } ] },
                "devtools.inspectedWindow": { "functions": [ { "name": "eval" } ] }
            }"#,
        )
        .unwrap();
        let fragments = vec![fragment("init.js", "// init\n")];

        let first = assemble(&manifest, &ReservedNames::default(), &fragments).unwrap();
        let second = assemble(&manifest, &ReservedNames::default(), &fragments).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_assemble_collision_aborts() {
        let manifest = parse_manifest(
            r#"{ "ab": { "functions": [] }, "a.b": { "functions": [] } }"#,
        )
        .unwrap();

        let err = assemble(&manifest, &ReservedNames::default(), &[]).unwrap_err();
        assert_eq!(err.code, crate::validate::ERR_IDENT_COLLISION);
    }
}
