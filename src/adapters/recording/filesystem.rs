//! Recording adapter for the `FileSystem` port.

use std::path::Path;

use serde::Serialize;

use super::record_result;
use crate::cassette::session::SharedRecorder;
use crate::ports::{FileSystem, PortError};

/// Records filesystem interactions while delegating to an inner implementation.
pub struct RecordingFileSystem {
    inner: Box<dyn FileSystem>,
    recorder: SharedRecorder,
}

impl RecordingFileSystem {
    /// Creates a new recording filesystem wrapping the given implementation.
    pub fn new(inner: Box<dyn FileSystem>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct PathInput {
    path: String,
}

impl PathInput {
    fn of(path: &Path) -> Self {
        Self { path: path.display().to_string() }
    }
}

#[derive(Serialize)]
struct WriteInput<'a> {
    path: String,
    contents: &'a str,
}

impl FileSystem for RecordingFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        let result = self.inner.read_to_string(path);
        record_result(&self.recorder, "fs", "read_to_string", &PathInput::of(path), &result);
        result
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        let result = self.inner.write(path, contents);
        let input = WriteInput { path: path.display().to_string(), contents };
        record_result(&self.recorder, "fs", "write", &input, &result);
        result
    }

    fn list_files(&self, dir: &Path) -> Result<Vec<String>, PortError> {
        let result = self.inner.list_files(dir);
        record_result(&self.recorder, "fs", "list_files", &PathInput::of(dir), &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::adapters::live::LiveFileSystem;
    use crate::cassette::recorder::CassetteRecorder;
    use serde_json::json;

    #[test]
    fn records_writes_with_contents() {
        let dir = std::env::temp_dir().join("repodoc_rec_fs_test");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let recorder =
            Arc::new(Mutex::new(CassetteRecorder::new(dir.join("fs.cassette.yaml"), "t", "abc")));
        {
            let fs = RecordingFileSystem::new(Box::new(LiveFileSystem), Arc::clone(&recorder));
            fs.write(&dir.join("README.md"), "# Hi").unwrap();
            assert_eq!(fs.read_to_string(&dir.join("README.md")).unwrap(), "# Hi");
        }

        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        let interactions = recorder.interactions();
        assert_eq!(interactions.len(), 2);
        assert_eq!(interactions[0].method, "write");
        assert_eq!(interactions[0].input["contents"], json!("# Hi"));
        assert_eq!(interactions[0].output, json!({"ok": null}));
        assert_eq!(interactions[1].method, "read_to_string");
        assert_eq!(interactions[1].output, json!({"ok": "# Hi"}));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
