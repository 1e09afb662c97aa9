// Build script to embed version and git metadata for the version endpoint.
// Every value can be overridden from the CI/CD pipeline via environment variables.

use chrono::Utc;
use std::env;
use std::process::Command;

fn main() {
    // Get version from Cargo.toml
    let version = env::var("CARGO_PKG_VERSION").expect("CARGO_PKG_VERSION not set");

    // Parse version into parts
    let parts: Vec<&str> = version.split('.').collect();
    if parts.len() != 3 {
        panic!("Invalid version format in Cargo.toml: {}", version);
    }

    // Check if CI/CD pipeline wants to override patch version
    let final_patch = env::var("VR_PATCH_VERSION").unwrap_or_else(|_| parts[2].to_string());
    let final_version = override_or("VR_VERSION", || {
        format!("{}.{}.{}", parts[0], parts[1], final_patch)
    });

    let git_commit = override_or("VR_GIT_COMMIT", || {
        git(&["rev-parse", "HEAD"]).unwrap_or_else(|| "unknown".to_string())
    });
    let git_branch = override_or("VR_GIT_BRANCH", || {
        git(&["rev-parse", "--abbrev-ref", "HEAD"]).unwrap_or_else(|| "unknown".to_string())
    });
    let build_date = override_or("VR_BUILD_DATE", || Utc::now().to_rfc3339());
    let rustc_version = rustc_version().unwrap_or_else(|| "unknown".to_string());

    // Emit as environment variables for compile-time embedding
    println!("cargo:rustc-env=VR_VERSION={}", final_version);
    println!("cargo:rustc-env=VR_GIT_COMMIT={}", git_commit);
    println!("cargo:rustc-env=VR_GIT_BRANCH={}", git_branch);
    println!("cargo:rustc-env=VR_BUILD_DATE={}", build_date);
    println!("cargo:rustc-env=VR_RUSTC_VERSION={}", rustc_version);

    println!("cargo:rerun-if-changed=Cargo.toml");
    println!("cargo:rerun-if-changed=../.git/HEAD");
    println!("cargo:rerun-if-changed=../.git/refs/heads");
    for var in [
        "VR_PATCH_VERSION",
        "VR_VERSION",
        "VR_GIT_COMMIT",
        "VR_GIT_BRANCH",
        "VR_BUILD_DATE",
    ] {
        println!("cargo:rerun-if-env-changed={}", var);
    }
}

fn override_or(var: &str, fallback: impl FnOnce() -> String) -> String {
    env::var(var)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(fallback)
}

fn git(args: &[&str]) -> Option<String> {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .filter(|s| !s.is_empty())
}

fn rustc_version() -> Option<String> {
    let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    Command::new(rustc)
        .arg("--version")
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
}
