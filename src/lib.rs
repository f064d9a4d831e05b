//! # Bridged API Stub Generator
//!
//! Build-time generator for the content-process side of the API bridge.
//! The stubs manifest (`definitions/stubs.json`) declares a hierarchy of API
//! namespaces and methods; this crate compiles it into one content script
//! that
//!
//! 1. creates the global `chrome` object and every namespace object beneath
//!    it (`createObjectIn`, ancestors before children),
//! 2. exposes every method as a proxy bound to the `chromeAPIBridge` entry
//!    point carrying a `{ namespace, method, success, failure }` routing
//!    record (`exportFunction`), and
//! 3. appends the hand-written fragment scripts that implement the bridge.
//!
//! Generation is a deterministic pure function of (manifest, reserved-name
//! table, fragment set); identical inputs produce byte-identical output, and
//! nothing is written unless the whole pipeline succeeds.

mod codegen;
mod discovery;
mod finalize;
mod manifest;
mod validate;

pub use codegen::{
    emit_method_bindings, emit_namespace_objects, flatten_identifier, ReservedNames,
    BRIDGE_ENTRY_POINT, ROOT_OBJECT,
};
pub use discovery::{discover_fragments, is_fragment_name, FragmentFile};
pub use finalize::{
    assemble, generate_content_script, FRAGMENTS_DIR, MANIFEST_PATH, OUTPUT_PATH,
};
pub use manifest::{load_manifest, parse_manifest, MethodStub, NamespaceStub, StubManifest};
pub use validate::{GeneratorError, IdentifierRegistry};
