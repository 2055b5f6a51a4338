use httpmock::prelude::*;
use small_runner::{CliConfig, LocalWorkspace, RunnerEngine, RunnerError, SamplePipeline};
use std::io::Write;
use tempfile::TempDir;
use zip::write::{FileOptions, ZipWriter};

// Builds a zip shaped like a branch archive: a top-level directory holding a
// small shell script that writes to both stdout and stderr.
fn fixture_zip(top_dir: &str) -> Vec<u8> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

    zip.add_directory::<_, ()>(format!("{}/", top_dir), FileOptions::default())
        .unwrap();
    zip.start_file::<_, ()>(format!("{}/hello.sh", top_dir), FileOptions::default())
        .unwrap();
    zip.write_all(b"echo out\necho oops >&2\n").unwrap();

    zip.finish().unwrap().into_inner()
}

fn test_config(archive_url: String, work_dir: String) -> CliConfig {
    CliConfig {
        archive_url,
        archive_name: "sample.zip".to_string(),
        work_dir,
        program: "sh".to_string(),
        script: "hello.sh".to_string(),
        verbose: false,
        monitor: false,
    }
}

#[cfg(unix)]
#[tokio::test]
async fn test_end_to_end_run_with_real_http() {
    let temp_dir = TempDir::new().unwrap();
    let work_dir = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let archive_mock = server.mock(|when, then| {
        when.method(GET).path("/archive/master.zip");
        then.status(200)
            .header("Content-Type", "application/zip")
            .body(fixture_zip("sample-master"));
    });

    let config = test_config(server.url("/archive/master.zip"), work_dir.clone());
    let workspace = LocalWorkspace::new(work_dir.clone());
    let pipeline = SamplePipeline::new(workspace, config);
    let engine = RunnerEngine::new(pipeline);

    let report = engine.run("/usr/bin:/bin").await.unwrap();

    archive_mock.assert();
    assert_eq!(report.fetch.archive_name, "sample.zip");
    assert_eq!(report.extract.dir_name, "sample-master");
    assert_eq!(report.launch.exit_code, Some(0));
    assert_eq!(report.env.path_entries, vec!["/usr/bin", "/bin"]);

    // Nothing may survive the run: archive, extracted tree, stderr log.
    assert!(!temp_dir.path().join("sample.zip").exists());
    assert!(!temp_dir.path().join("sample-master").exists());
    assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_download_failure_leaves_workspace_clean() {
    let temp_dir = TempDir::new().unwrap();
    let work_dir = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let archive_mock = server.mock(|when, then| {
        when.method(GET).path("/archive/master.zip");
        then.status(500);
    });

    let config = test_config(server.url("/archive/master.zip"), work_dir.clone());
    let workspace = LocalWorkspace::new(work_dir.clone());
    let pipeline = SamplePipeline::new(workspace, config);
    let engine = RunnerEngine::new(pipeline);

    let err = engine.run("/usr/bin:/bin").await.unwrap_err();

    archive_mock.assert();
    assert!(matches!(
        err,
        RunnerError::DownloadStatusError { status: 500, .. }
    ));

    // Extraction never ran and cleanup left the workspace empty.
    assert!(!temp_dir.path().join("sample.zip").exists());
    assert!(!temp_dir.path().join("sample-master").exists());
    assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_precancelled_run_spawns_nothing_and_cleans_up() {
    let temp_dir = TempDir::new().unwrap();
    let work_dir = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    // No expectation on calls: a cancelled run must never hit the server.
    let archive_mock = server.mock(|when, then| {
        when.method(GET).path("/archive/master.zip");
        then.status(200).body(fixture_zip("sample-master"));
    });

    let config = test_config(server.url("/archive/master.zip"), work_dir.clone());
    let workspace = LocalWorkspace::new(work_dir.clone());
    let pipeline = SamplePipeline::new(workspace, config);
    let engine = RunnerEngine::new(pipeline);

    engine.cancel_token().cancel();
    let err = engine.run("/usr/bin:/bin").await.unwrap_err();

    assert!(matches!(err, RunnerError::Cancelled));
    archive_mock.assert_hits(0);
    assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[cfg(unix)]
#[tokio::test]
async fn test_run_with_failing_child_still_cleans_up() {
    let temp_dir = TempDir::new().unwrap();
    let work_dir = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let archive_mock = server.mock(|when, then| {
        when.method(GET).path("/archive/master.zip");
        then.status(200)
            .header("Content-Type", "application/zip")
            .body(fixture_zip("sample-master"));
    });

    let mut config = test_config(server.url("/archive/master.zip"), work_dir.clone());
    config.script = "missing.sh".to_string();
    let workspace = LocalWorkspace::new(work_dir.clone());
    let pipeline = SamplePipeline::new(workspace, config);
    let engine = RunnerEngine::new(pipeline);

    let report = engine.run("/usr/bin:/bin").await.unwrap();

    archive_mock.assert();
    // `sh missing.sh` exits nonzero; the run itself still completes and cleans up.
    assert_ne!(report.launch.exit_code, Some(0));
    assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}
