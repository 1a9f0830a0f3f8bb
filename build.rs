//! Build script - copies the linker script into the output directory
//! so that the linker can find it at link time.
//!
//! Host builds (library + tests) never link for the target, so the
//! script only runs its copy step when the `embedded` feature is on.

use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    if env::var_os("CARGO_FEATURE_EMBEDDED").is_none() {
        return;
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to OUT_DIR
    fs::copy("memory.x", out_dir.join("memory.x")).unwrap();

    // Tell cargo to look for linker scripts in OUT_DIR
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Rebuild if the linker script changes
    println!("cargo:rerun-if-changed=memory.x");

    // cortex-m-rt and defmt linker scripts for the demo binary
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}
