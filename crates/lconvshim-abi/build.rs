fn main() {
    // Symbols are only unmangled without debug_assertions, so the version
    // script is only meaningful for release cdylibs.
    let release = std::env::var("PROFILE").is_ok_and(|p| p == "release");
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let version_script = format!("{manifest_dir}/version_scripts/liblocale.map");
    if release && std::path::Path::new(&version_script).exists() {
        println!("cargo:rustc-cdylib-link-arg=-Wl,--version-script={version_script}");
    }
    println!("cargo:rerun-if-changed=version_scripts/liblocale.map");
}
