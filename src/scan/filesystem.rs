use crate::error::Result;
use serde_json::Value;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const MAX_DEPTH: usize = 3;

/// `*.json` files under `root`, in sorted path order.
pub fn list_json_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .max_depth(MAX_DEPTH)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().to_path_buf())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("json"))
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    files
}

pub fn read_json(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn lists_only_json_files_sorted() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::create_dir_all(dir.path().join("nested")).expect("nested dir should be created");
        fs::write(dir.path().join("b.json"), "{}").expect("b should write");
        fs::write(dir.path().join("a.JSON"), "{}").expect("a should write");
        fs::write(dir.path().join("notes.txt"), "x").expect("txt should write");
        fs::write(dir.path().join("nested/c.json"), "[]").expect("c should write");

        let files = list_json_files(dir.path());
        let names: Vec<_> = files
            .iter()
            .map(|path| path.strip_prefix(dir.path()).expect("prefix").to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("a.JSON"),
                PathBuf::from("b.json"),
                PathBuf::from("nested/c.json"),
            ]
        );
    }

    #[test]
    fn read_json_rejects_invalid_content() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("broken.json");
        fs::write(&path, "{not json").expect("file should write");
        assert!(read_json(&path).is_err());
    }
}
