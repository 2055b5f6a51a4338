use crate::domain::model::{EnvReport, ExtractReport, FetchReport, LaunchReport};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub trait Workspace: Send + Sync {
    fn root(&self) -> &Path;
    fn resolve(&self, name: &str) -> PathBuf;
    fn exists(&self, name: &str) -> bool;
    /// Returns whether the file existed. Absence is not an error.
    fn remove_file(&self, name: &str) -> impl std::future::Future<Output = Result<bool>> + Send;
    /// Returns whether the directory existed. Absence is not an error.
    fn remove_dir(&self, name: &str) -> impl std::future::Future<Output = Result<bool>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn archive_url(&self) -> &str;
    fn archive_name(&self) -> &str;
    fn work_dir(&self) -> &str;
    fn program(&self) -> &str;
    fn script(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    fn describe(&self, path_var: &str, host: Option<String>) -> EnvReport;
    async fn fetch(&self) -> Result<FetchReport>;
    async fn extract(&self, fetched: &FetchReport) -> Result<ExtractReport>;
    async fn launch(&self, extracted: &ExtractReport) -> Result<LaunchReport>;
    async fn cleanup(&self);
}
