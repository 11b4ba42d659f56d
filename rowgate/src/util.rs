use std::{
    env,
    path::{Path, PathBuf},
};

/// Best-effort workspace root, taken as the parent of `CARGO_MANIFEST_DIR`.
///
/// Only valid for member crates sitting directly under the workspace root.
pub fn workspace_dir() -> PathBuf {
    Path::new(&env::var("CARGO_MANIFEST_DIR").unwrap())
        .parent()
        .unwrap()
        .to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_dir() {
        let workspace_dir = workspace_dir();
        assert!(workspace_dir.join("Cargo.toml").exists());
        assert!(workspace_dir.join("configs").is_dir());
    }
}
