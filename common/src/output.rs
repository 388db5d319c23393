use anyhow::{Context, Result};
use std::{fs, path::Path};
use tracing::info;

/// Writes `count` as decimal text to `path`, creating missing parent
/// directories first.
pub fn write_count(path: &Path, count: u64) -> Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("create directory {}", dir.display()))?;
    }
    fs::write(path, count.to_string()).with_context(|| format!("write output {}", path.display()))?;
    info!("output written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_count_creates_dirs() {
        let root = std::env::temp_dir().join(format!("wc-output-{}", uuid::Uuid::new_v4()));
        let path = root.join("nested").join("count.txt");
        write_count(&path, 42).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "42");
        write_count(&path, 7).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "7");
        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn test_write_count_into_file_parent() {
        let root = std::env::temp_dir().join(format!("wc-output-{}", uuid::Uuid::new_v4()));
        fs::write(&root, "not a directory").unwrap();
        let err = write_count(&root.join("count.txt"), 1).unwrap_err();
        assert!(format!("{err:#}").contains("create directory"));
        fs::remove_file(root).unwrap();
    }
}
