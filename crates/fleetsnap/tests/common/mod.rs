use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A scratch working directory with an optional settings file
pub struct TestProject {
    pub root: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        Self { root }
    }

    pub fn write_settings(&self, content: &str) {
        fs::write(self.root.path().join("fleetsnap.yaml"), content).unwrap();
    }

    #[allow(dead_code)]
    pub fn write_project_settings(&self, content: &str) {
        let dir = self.root.path().join(".fleetsnap");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.yaml"), content).unwrap();
    }

    pub fn path(&self) -> PathBuf {
        self.root.path().to_path_buf()
    }
}
