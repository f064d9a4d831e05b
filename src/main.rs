//! Zero-argument build tool: reads the stubs manifest and fragment scripts
//! from their well-known locations and writes the generated content script.

use std::path::Path;
use std::process;

use stubgen_native::{generate_content_script, FRAGMENTS_DIR, MANIFEST_PATH, OUTPUT_PATH};

fn main() {
    let result = generate_content_script(
        Path::new(MANIFEST_PATH),
        Path::new(FRAGMENTS_DIR),
        Path::new(OUTPUT_PATH),
    );

    match result {
        Ok(()) => {
            eprintln!("[stubgen] wrote {}", OUTPUT_PATH);
        }
        Err(e) => {
            eprintln!("[stubgen] {}", e);
            process::exit(1);
        }
    }
}
