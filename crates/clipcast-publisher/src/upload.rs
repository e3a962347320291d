//! Upload-tool invocation with a single reduced-argument fallback.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{info, warn};

use clipcast_core::config::PublishConfig;

use crate::metadata::PublishMetadata;

/// Terminal result of the two-attempt publish policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The tool exited successfully; `fallback` records whether the reduced
    /// second attempt was the one that landed.
    Published { fallback: bool },
    /// Both attempts failed; `detail` carries the last attempt's diagnosis.
    Failed { detail: String },
}

/// The publish seam the orchestrator depends on.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, video: &Path, meta: &PublishMetadata) -> PublishOutcome;
}

/// Invokes the external upload command and judges it by exit status.
pub struct UploadTool {
    command: String,
    client_secrets: PathBuf,
    credentials_file: PathBuf,
}

impl UploadTool {
    pub fn new(cfg: &PublishConfig) -> Self {
        Self {
            command: cfg.command.clone(),
            client_secrets: PathBuf::from(&cfg.client_secrets),
            credentials_file: PathBuf::from(&cfg.credentials_file),
        }
    }

    fn build_command(
        &self,
        video: &Path,
        meta: &PublishMetadata,
        include_category: bool,
    ) -> Command {
        let mut cmd = Command::new(&self.command);
        cmd.arg("--client-secrets")
            .arg(&self.client_secrets)
            .arg("--credentials-file")
            .arg(&self.credentials_file)
            .arg("--title")
            .arg(&meta.title)
            .arg("--description")
            .arg(&meta.description)
            .arg("--tags")
            .arg(meta.tags.join(","))
            .arg("--privacy")
            .arg(&meta.privacy);
        if include_category {
            if let Some(ref category) = meta.category {
                cmd.arg("--category").arg(category);
            }
        }
        cmd.arg(video);
        cmd
    }

    /// One invocation; `Err` carries the exit diagnosis for the log.
    async fn attempt(
        &self,
        video: &Path,
        meta: &PublishMetadata,
        include_category: bool,
    ) -> std::result::Result<(), String> {
        let output = self
            .build_command(video, meta, include_category)
            .output()
            .await
            .map_err(|e| format!("failed to spawn {}: {e}", self.command))?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let tail: String = stderr
            .lines()
            .rev()
            .take(3)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect::<Vec<_>>()
            .join(" | ");
        Err(format!(
            "exit status {}: {}",
            output.status.code().unwrap_or(-1),
            tail
        ))
    }
}

#[async_trait]
impl Publisher for UploadTool {
    async fn publish(&self, video: &Path, meta: &PublishMetadata) -> PublishOutcome {
        info!(command = %self.command, title = %meta.title, "invoking upload tool");

        match self.attempt(video, meta, true).await {
            Ok(()) => PublishOutcome::Published { fallback: false },
            Err(first) => {
                warn!(error = %first, "upload failed — retrying once without the category argument");
                match self.attempt(video, meta, false).await {
                    Ok(()) => PublishOutcome::Published { fallback: true },
                    Err(detail) => PublishOutcome::Failed { detail },
                }
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    /// Write an executable stub script and return an `UploadTool` that
    /// invokes it in place of the real upload command.
    fn stub_tool(dir: &tempfile::TempDir, script: &str) -> UploadTool {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.path().join("upload-stub.sh");
        std::fs::write(&path, script).expect("write stub");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("chmod stub");

        let cfg = PublishConfig {
            command: path.to_string_lossy().into_owned(),
            ..PublishConfig::default()
        };
        UploadTool::new(&cfg)
    }

    fn meta() -> PublishMetadata {
        PublishMetadata {
            title: "clip".to_string(),
            description: "desc #Shorts".to_string(),
            tags: vec!["shorts".to_string()],
            privacy: "public".to_string(),
            category: Some("22".to_string()),
        }
    }

    #[tokio::test]
    async fn successful_first_attempt_needs_no_fallback() {
        let dir = tempfile::tempdir().expect("tempdir");
        let tool = stub_tool(&dir, "#!/bin/sh\nexit 0\n");

        let outcome = tool.publish(Path::new("video.mp4"), &meta()).await;
        assert_eq!(outcome, PublishOutcome::Published { fallback: false });
    }

    #[tokio::test]
    async fn category_sensitive_failure_lands_on_the_fallback() {
        let dir = tempfile::tempdir().expect("tempdir");
        // Fails whenever --category is passed, succeeds otherwise.
        let tool = stub_tool(
            &dir,
            "#!/bin/sh\nfor arg in \"$@\"; do\n  [ \"$arg\" = \"--category\" ] && exit 2\ndone\nexit 0\n",
        );

        let outcome = tool.publish(Path::new("video.mp4"), &meta()).await;
        assert_eq!(outcome, PublishOutcome::Published { fallback: true });
    }

    #[tokio::test]
    async fn two_failures_yield_a_failed_outcome() {
        let dir = tempfile::tempdir().expect("tempdir");
        let tool = stub_tool(&dir, "#!/bin/sh\necho \"quota exceeded\" >&2\nexit 1\n");

        let outcome = tool.publish(Path::new("video.mp4"), &meta()).await;
        match outcome {
            PublishOutcome::Failed { detail } => {
                assert!(detail.contains("exit status 1"));
                assert!(detail.contains("quota exceeded"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_command_yields_a_failed_outcome() {
        let cfg = PublishConfig {
            command: "/nonexistent/upload-tool".to_string(),
            ..PublishConfig::default()
        };
        let tool = UploadTool::new(&cfg);

        let outcome = tool.publish(Path::new("video.mp4"), &meta()).await;
        assert!(matches!(outcome, PublishOutcome::Failed { .. }));
    }

    #[tokio::test]
    async fn arguments_reach_the_tool_in_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        // Record argv, then succeed.
        let capture = dir.path().join("argv.txt");
        let script = format!(
            "#!/bin/sh\nprintf '%s\\n' \"$@\" > {}\nexit 0\n",
            capture.display()
        );
        let tool = stub_tool(&dir, &script);

        let outcome = tool.publish(Path::new("video.mp4"), &meta()).await;
        assert_eq!(outcome, PublishOutcome::Published { fallback: false });

        let argv = std::fs::read_to_string(&capture).expect("argv");
        let lines: Vec<&str> = argv.lines().collect();
        assert_eq!(lines[0], "--client-secrets");
        assert!(lines.contains(&"--title"));
        assert!(lines.contains(&"clip"));
        assert!(lines.contains(&"--category"));
        assert!(lines.contains(&"22"));
        assert_eq!(*lines.last().unwrap(), "video.mp4");
    }
}
