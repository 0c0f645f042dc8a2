use std::sync::Arc;
use std::time::Duration;

use photon_stack_rs::image_pipeline::{
    describe_artifact, CaptureMode, CaptureSession, CaptureSettings, OfflineAnalyzer,
    SceneAnalyzer, SessionConfig, SyntheticFrameSource, WhiteBalance,
};
use photon_stack_rs::logger;

use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init();

    info!("Starting photon_stack...");

    let config = SessionConfig::builder()
        .frame_count(6)
        .frame_interval(Duration::from_millis(50))
        .jpeg_quality(95)
        .build();
    let session: CaptureSession = CaptureSession::new(config);

    info!("Capture session initialized");
    info!("Stacked frames: {}", session.config().frame_count);
    info!("JPEG quality: {}", session.encoder().quality());

    let mut camera = SyntheticFrameSource::new(640, 480, 24, 42)?;
    let analyzer: Arc<dyn SceneAnalyzer> = Arc::new(OfflineAnalyzer);

    let settings = CaptureSettings {
        iso: 800,
        shutter_speed: "1/60".to_string(),
        aperture: "f/1.8".to_string(),
        white_balance: WhiteBalance::Daylight,
        exposure_compensation: 0.3,
    };

    let mut analyses = Vec::new();

    for mode in [CaptureMode::Standard, CaptureMode::Enhanced] {
        match session.capture(mode, &mut camera, settings.clone()).await {
            Ok(artifact) => {
                info!(
                    "{} capture: {}",
                    mode,
                    serde_json::to_string(&artifact.metadata())?
                );

                // Analysis runs on its own task and never holds up the next capture.
                let analyzer = analyzer.clone();
                analyses.push(tokio::spawn(async move {
                    let description = describe_artifact(analyzer.as_ref(), &artifact).await;
                    info!(id = %artifact.id(), "Scene: {}", description);
                }));
            }
            Err(e) => error!("{} capture failed: {}", mode, e),
        }
    }

    for analysis in analyses {
        analysis.await?;
    }

    info!("Session holds {} artifacts", session.artifacts().len());

    Ok(())
}
