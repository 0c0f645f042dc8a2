//! Scene analysis seam
//!
//! A remote vision service can describe a captured artifact in free text. The
//! capture pipeline never waits on it: callers hand over an artifact that
//! already exists and receive either the description or
//! [`ANALYSIS_UNAVAILABLE`].

use async_trait::async_trait;
use tracing::{info, warn};

use crate::image_pipeline::session::CapturedArtifact;

/// Returned in place of a description whenever analysis cannot be performed.
pub const ANALYSIS_UNAVAILABLE: &str = "Scene analysis unavailable";

#[async_trait]
pub trait SceneAnalyzer: Send + Sync {
    /// Describes an encoded image. `mime_type` names the payload encoding.
    async fn analyze(&self, payload: &[u8], mime_type: &str) -> anyhow::Result<String>;
}

/// Analyzer used when no service credentials are configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineAnalyzer;

#[async_trait]
impl SceneAnalyzer for OfflineAnalyzer {
    async fn analyze(&self, _payload: &[u8], _mime_type: &str) -> anyhow::Result<String> {
        anyhow::bail!("no scene analysis credentials configured")
    }
}

/// Runs `analyzer` on an artifact, mapping any failure to [`ANALYSIS_UNAVAILABLE`].
pub async fn describe_artifact<A>(analyzer: &A, artifact: &CapturedArtifact) -> String
where
    A: SceneAnalyzer + ?Sized,
{
    match analyzer
        .analyze(artifact.payload(), artifact.format().mime_type())
        .await
    {
        Ok(description) if !description.trim().is_empty() => {
            info!(id = %artifact.id(), "Scene analysis received");
            description
        }
        Ok(_) => {
            warn!(id = %artifact.id(), "Scene analysis returned an empty description");
            ANALYSIS_UNAVAILABLE.to_string()
        }
        Err(e) => {
            warn!(id = %artifact.id(), error = %e, "Scene analysis failed");
            ANALYSIS_UNAVAILABLE.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::buffer::PixelBuffer;
    use crate::image_pipeline::session::{CaptureMode, CaptureSession, CaptureSettings, SessionConfig};
    use std::time::Duration;

    struct EchoAnalyzer;

    #[async_trait]
    impl SceneAnalyzer for EchoAnalyzer {
        async fn analyze(&self, payload: &[u8], mime_type: &str) -> anyhow::Result<String> {
            Ok(format!("{} bytes of {}", payload.len(), mime_type))
        }
    }

    async fn artifact() -> CapturedArtifact {
        let config = SessionConfig::builder().frame_interval(Duration::ZERO).build();
        let session: CaptureSession = CaptureSession::new(config);
        let mut source = || PixelBuffer::filled(8, 8, [100, 100, 100, 255]);
        session
            .capture(CaptureMode::Standard, &mut source, CaptureSettings::default())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_offline_analyzer_yields_sentinel() {
        let artifact = artifact().await;
        assert_eq!(describe_artifact(&OfflineAnalyzer, &artifact).await, ANALYSIS_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_description_passed_through() {
        let artifact = artifact().await;
        let description = describe_artifact(&EchoAnalyzer, &artifact).await;
        assert_eq!(
            description,
            format!("{} bytes of image/jpeg", artifact.payload().len())
        );
    }
}
