use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Ensures that the directory for the given file path exists, creating
/// it (and any missing parents) when needed.
pub fn ensure_directory_exists(file_path: &str) -> Result<()> {
    if let Some(parent) = Path::new(file_path).parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory: {}", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_missing_parent_directories() -> Result<()> {
        let base = std::env::temp_dir().join(format!("gitscout-utils-{}", std::process::id()));
        let file = base.join("nested").join("app.db");

        ensure_directory_exists(file.to_str().unwrap())?;
        assert!(file.parent().unwrap().exists());

        fs::remove_dir_all(base).ok();
        Ok(())
    }

    #[test]
    fn test_bare_file_name_is_a_noop() -> Result<()> {
        ensure_directory_exists("app.db")
    }
}
