use std::process::Command;

const HASH_LEN: usize = 12;

fn main() {
    println!("cargo::rerun-if-changed=../../.git/HEAD");
    println!("cargo::rerun-if-changed=../../.git/refs/heads/");
    println!("cargo::rerun-if-env-changed=TODO_BUILD_COMMIT");

    let commit = std::env::var("TODO_BUILD_COMMIT")
        .ok()
        .filter(|hash| !hash.trim().is_empty())
        .or_else(git_head)
        .map(|hash| hash.trim().chars().take(HASH_LEN).collect::<String>())
        .unwrap_or_else(|| "unknown".to_string());

    let version = std::env::var("CARGO_PKG_VERSION").unwrap_or_default();
    println!("cargo::rustc-env=TODO_LONG_VERSION={} ({})", version, commit);
}

fn git_head() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout).ok()
}
