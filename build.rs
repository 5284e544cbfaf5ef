use std::process::Command;

/// Prefer an explicit override from the build environment, else `fallback()`.
fn stamp(key: &str, fallback: impl FnOnce() -> String) {
    let value = std::env::var(key).unwrap_or_else(|_| fallback());
    println!("cargo:rustc-env={key}={value}");
    println!("cargo:rerun-if-env-changed={key}");
}

fn short_head() -> String {
    Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn main() {
    // Both end up in the daemon's startup banner.
    stamp("MODAL_LOADER_VERSION", || {
        std::env::var("CARGO_PKG_VERSION").unwrap_or_default()
    });
    stamp("MODAL_LOADER_COMMIT", short_head);

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads/");
}
