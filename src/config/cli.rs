use crate::core::Workspace;
use crate::utils::error::Result;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalWorkspace {
    base_path: PathBuf,
}

impl LocalWorkspace {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Workspace for LocalWorkspace {
    fn root(&self) -> &Path {
        &self.base_path
    }

    fn resolve(&self, name: &str) -> PathBuf {
        self.base_path.join(name)
    }

    fn exists(&self, name: &str) -> bool {
        self.resolve(name).exists()
    }

    async fn remove_file(&self, name: &str) -> Result<bool> {
        match fs::remove_file(self.resolve(name)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn remove_dir(&self, name: &str) -> Result<bool> {
        match fs::remove_dir_all(self.resolve(name)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
