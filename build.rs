//! Embeds the commit and the cargo profile for `hearth_cli version`.

use std::{env, process::Command};

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");

    let commit = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|hash| hash.trim().to_owned())
        .filter(|hash| !hash.is_empty());
    if let Some(commit) = commit {
        println!("cargo:rustc-env=HEARTH_COMMIT={commit}");
    }

    if let Ok(profile) = env::var("PROFILE") {
        println!("cargo:rustc-env=HEARTH_PROFILE={profile}");
    }
}
