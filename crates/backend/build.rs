use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Place the workspace config.toml beside the academy-backend binary,
/// where `load_config` looks for it first.
fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    let source = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config.toml");
    let Some(dest_dir) = profile_dir() else {
        println!("cargo:warning=target profile dir not found; config.toml not copied");
        return;
    };

    if !source.exists() {
        println!("cargo:warning=no config.toml at {}; embedded defaults apply", source.display());
        return;
    }
    if let Err(e) = fs::copy(&source, dest_dir.join("config.toml")) {
        println!("cargo:warning=copying config.toml failed: {}", e);
    }
}

/// `target/<profile>`, found by walking up from OUT_DIR
fn profile_dir() -> Option<PathBuf> {
    let out_dir = PathBuf::from(env::var_os("OUT_DIR")?);
    let profile = env::var("PROFILE").ok()?;
    out_dir
        .ancestors()
        .find(|p| p.ends_with(&profile))
        .map(Path::to_path_buf)
}
