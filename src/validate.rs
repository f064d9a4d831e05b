//! Validation and error types for the stub generator.
//!
//! Flattened identifiers live in a single global namespace inside the
//! generated script. The registry here claims every identifier before its
//! statement is emitted, so a manifest whose paths flatten to the same name
//! fails with a diagnostic instead of silently overwriting a binding.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;

// ═══════════════════════════════════════════════════════════════════════════════
// ERROR CODES
// ═══════════════════════════════════════════════════════════════════════════════

pub const ERR_IDENT_COLLISION: &str = "STUB001";
pub const ERR_BAD_NAMESPACE_PATH: &str = "STUB002";
pub const ERR_BAD_IDENTIFIER: &str = "STUB003";
pub const ERR_IO: &str = "STUB-IO";

fn get_guarantee(code: &str) -> &'static str {
    match code {
        ERR_IDENT_COLLISION => {
            "Every flattened identifier is bound by exactly one namespace path."
        }
        ERR_BAD_NAMESPACE_PATH => {
            "Namespace paths are non-empty sequences of non-empty segments."
        }
        ERR_BAD_IDENTIFIER => {
            "Every generated binding name is a valid JavaScript identifier."
        }
        ERR_IO => "Generation either writes a complete output file or nothing at all.",
        _ => "Unknown guarantee.",
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// GENERATOR ERROR
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct GeneratorError {
    pub code: String,
    pub message: String,
    pub guarantee: String,
    pub hints: Vec<String>,
}

impl GeneratorError {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self::with_hints(code, message, vec![])
    }

    pub fn with_hints(code: &str, message: impl Into<String>, hints: Vec<String>) -> Self {
        GeneratorError {
            code: code.to_string(),
            message: message.into(),
            guarantee: get_guarantee(code).to_string(),
            hints,
        }
    }

    /// Wrap a file-system failure, keeping the path in the message.
    pub fn io(context: &str, err: std::io::Error) -> Self {
        Self::new(ERR_IO, format!("{}: {}", context, err))
    }
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        for hint in &self.hints {
            write!(f, "\n  hint: {}", hint)?;
        }
        Ok(())
    }
}

impl std::error::Error for GeneratorError {}

// ═══════════════════════════════════════════════════════════════════════════════
// IDENTIFIER REGISTRY
// ═══════════════════════════════════════════════════════════════════════════════

lazy_static! {
    static ref JS_IDENT_RE: Regex = Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap();
}

/// Tracks which namespace-path prefix owns each flattened identifier.
///
/// Shared ancestor chains re-claim the same identifier once per namespace in
/// the manifest; that is legal as long as the owning prefix is identical.
#[derive(Debug, Default)]
pub struct IdentifierRegistry {
    bindings: HashMap<String, String>,
}

impl IdentifierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `identifier` for the namespace-path prefix `owner_path`.
    ///
    /// Fails if the identifier is not a valid JavaScript identifier, or if a
    /// different path prefix already claimed it.
    pub fn claim(&mut self, identifier: &str, owner_path: &str) -> Result<(), GeneratorError> {
        if !JS_IDENT_RE.is_match(identifier) {
            return Err(GeneratorError::new(
                ERR_BAD_IDENTIFIER,
                format!(
                    "namespace \"{}\" flattens to \"{}\", which is not a valid identifier",
                    owner_path, identifier
                ),
            ));
        }

        match self.bindings.get(identifier) {
            Some(existing) if existing != owner_path => Err(GeneratorError::with_hints(
                ERR_IDENT_COLLISION,
                format!(
                    "namespace paths \"{}\" and \"{}\" both flatten to identifier \"{}\"",
                    existing, owner_path, identifier
                ),
                vec![
                    "rename one of the colliding namespaces in the stubs manifest".to_string(),
                ],
            )),
            Some(_) => Ok(()),
            None => {
                self.bindings
                    .insert(identifier.to_string(), owner_path.to_string());
                Ok(())
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════
