//! Live filesystem adapter using `std::fs`.

use std::path::Path;

use crate::ports::filesystem::FileSystem;
use crate::ports::PortError;

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    /// Invalid UTF-8 sequences are replaced with U+FFFD rather than rejected.
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        let bytes = std::fs::read(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)
            .map_err(|e| format!("failed to write {}: {e}", path.display()).into())
    }

    fn list_files(&self, dir: &Path) -> Result<Vec<String>, PortError> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_creates_parent_directories() {
        let dir = std::env::temp_dir().join("repodoc_live_fs_write");
        let _ = std::fs::remove_dir_all(&dir);
        let target = dir.join("docs").join("index.md");

        LiveFileSystem.write(&target, "# Index").unwrap();

        assert!(target.is_file());
        assert_eq!(LiveFileSystem.read_to_string(&target).unwrap(), "# Index");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn list_files_skips_directories_and_sorts() {
        let dir = std::env::temp_dir().join("repodoc_live_fs_list");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(dir.join("nested.js")).unwrap();
        std::fs::write(dir.join("b.html"), "<p></p>").unwrap();
        std::fs::write(dir.join("a.gs"), "function a() {}").unwrap();

        let names = LiveFileSystem.list_files(&dir).unwrap();
        assert_eq!(names, vec!["a.gs", "b.html"]);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn read_decodes_invalid_utf8_lossily() {
        let dir = std::env::temp_dir().join("repodoc_live_fs_latin1");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("legacy.js");
        std::fs::write(&path, b"caf\xe9").unwrap();

        assert_eq!(LiveFileSystem.read_to_string(&path).unwrap(), "caf\u{fffd}");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn read_missing_file_names_the_path() {
        let err = LiveFileSystem
            .read_to_string(Path::new("/definitely/not/here.gs"))
            .unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.gs"));
    }
}
