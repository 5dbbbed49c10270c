// build.rs
use chrono::{FixedOffset, Utc};
use std::process::Command;

fn short_revision() -> String {
    Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

fn main() {
    // Asia/Taipei, UTC+8
    let taipei = FixedOffset::east_opt(8 * 3600).expect("valid offset");
    let built_at = Utc::now().with_timezone(&taipei);
    let stamp = format!(
        "v{} - {}",
        short_revision(),
        built_at.format("%Y/%-m/%-d %H:%M:%S")
    );

    println!("cargo:rustc-env=SHEETBOARD_BUILD={}", stamp);
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=build.rs");
}
