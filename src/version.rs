/// `v<short-rev> - <build time, Asia/Taipei>`, stamped by `build.rs`.
pub const BUILD: &str = env!("SHEETBOARD_BUILD");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_stamp_has_revision_and_time() {
        assert!(BUILD.starts_with('v'));
        assert!(BUILD.contains(" - "));
    }
}
