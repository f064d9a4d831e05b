//! Discovery of auxiliary fragment scripts.
//!
//! Hand-written helpers (the bridge implementation, callback plumbing) live
//! as plain `.js` files next to the generator and are appended verbatim after
//! the generated statements. Only top-level `.js` files count; dotfiles such
//! as editor swap files are skipped. The listing is sorted by file name so
//! output is reproducible across platforms, never OS directory order.

use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::validate::{GeneratorError, ERR_IO};

#[derive(Debug, Clone)]
pub struct FragmentFile {
    pub name: String,
    pub contents: String,
}

/// Fragment filter: `.js` extension, not hidden.
pub fn is_fragment_name(name: &str) -> bool {
    name.ends_with(".js") && !name.starts_with('.')
}

/// List and read every fragment in `dir`, sorted by file name.
///
/// A missing or unreadable fragment directory is fatal: the generated script
/// is incomplete without the bridge fragments.
pub fn discover_fragments(dir: &Path) -> Result<Vec<FragmentFile>, GeneratorError> {
    if !dir.is_dir() {
        return Err(GeneratorError::new(
            ERR_IO,
            format!("fragment directory {:?} does not exist", dir),
        ));
    }

    let mut fragments = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry =
            entry.map_err(|e| GeneratorError::new(ERR_IO, format!("failed to list {:?}: {}", dir, e)))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if !is_fragment_name(&name) {
            continue;
        }

        let contents = fs::read_to_string(entry.path())
            .map_err(|e| GeneratorError::io(&format!("failed to read fragment {:?}", entry.path()), e))?;
        fragments.push(FragmentFile { name, contents });
    }

    Ok(fragments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_dir(label: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "stubgen-discovery-{}-{}",
            label,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_fragment_name_filter() {
        assert!(is_fragment_name("init.js"));
        assert!(is_fragment_name("bridge.helper.js"));
        assert!(!is_fragment_name(".hidden.js"));
        assert!(!is_fragment_name(".init.js.swp"));
        assert!(!is_fragment_name("notes.txt"));
        assert!(!is_fragment_name("script.json"));
    }

    #[test]
    fn test_discover_filters_and_sorts() {
        let dir = scratch_dir("filter");
        fs::write(dir.join("zz-last.js"), "// zz").unwrap();
        fs::write(dir.join(".hidden.js"), "// hidden").unwrap();
        fs::write(dir.join("init.js"), "// init").unwrap();
        fs::write(dir.join("notes.txt"), "notes").unwrap();

        let fragments = discover_fragments(&dir).unwrap();
        let names: Vec<&str> = fragments.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["init.js", "zz-last.js"]);
        assert_eq!(fragments[0].contents, "// init");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_directory_is_fatal() {
        let dir = std::env::temp_dir().join("stubgen-discovery-nonexistent");
        let err = discover_fragments(&dir).unwrap_err();
        assert_eq!(err.code, ERR_IO);
    }
}
