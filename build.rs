use std::env;
use std::path::PathBuf;

const LIB_DIR_VAR: &str = "LATEX_SNIPPET_LIB_DIR";

fn main() {
    println!("cargo:rerun-if-env-changed={LIB_DIR_VAR}");

    if env::var_os("CARGO_FEATURE_NATIVE").is_none() {
        return;
    }

    if let Some(dir) = env::var_os(LIB_DIR_VAR) {
        let dir = PathBuf::from(dir);
        if !dir.is_dir() {
            panic!("{LIB_DIR_VAR} does not name a directory: {}", dir.display());
        }
        println!("cargo:rustc-link-search=native={}", dir.display());
    }
}
