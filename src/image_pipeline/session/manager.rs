use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::image_pipeline::{
    common::error::{PipelineError, Result},
    encoding::{ArtifactEncoder, JpegArtifactEncoder},
    look::LookProcessor,
    session::config::SessionConfig,
    session::types::{CaptureMode, CaptureOutcome, CaptureSettings, CaptureState, CapturedArtifact},
    stacking::{FrameSource, FrameStacker},
};

#[derive(Debug)]
struct SessionState {
    current: CaptureState,
    last_outcome: Option<CaptureOutcome>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Marks the session as capturing for as long as it lives.
///
/// Dropping the guard without calling `finish` (a cancelled capture future)
/// records a failure and returns the session to `Idle`.
struct CaptureGuard<'a> {
    state: &'a Mutex<SessionState>,
    finished: bool,
}

impl CaptureGuard<'_> {
    fn finish(mut self, outcome: CaptureOutcome) {
        let mut state = lock(self.state);
        debug!(from = ?state.current, to = ?outcome.state(), "Capture state transition");
        state.current = CaptureState::Idle;
        state.last_outcome = Some(outcome);
        self.finished = true;
    }
}

impl Drop for CaptureGuard<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        warn!("Capture abandoned before completion");
        let mut state = lock(self.state);
        state.current = CaptureState::Idle;
        state.last_outcome = Some(CaptureOutcome::Failed("capture cancelled".to_string()));
    }
}

/// One camera session: runs captures one at a time and keeps their artifacts.
///
/// ```text
/// Idle -> Capturing -> Completed | Failed -> Idle
/// ```
///
/// A capture requested while another is running is rejected with
/// `CaptureInProgress` rather than queued.
pub struct CaptureSession<E: ArtifactEncoder = JpegArtifactEncoder> {
    stacker: FrameStacker,
    encoder: E,
    config: SessionConfig,
    state: Mutex<SessionState>,
    gallery: Mutex<Vec<CapturedArtifact>>,
}

impl CaptureSession<JpegArtifactEncoder> {
    pub fn new(config: SessionConfig) -> Self {
        let encoder = JpegArtifactEncoder::with_quality(config.jpeg_quality);
        Self::with_encoder(encoder, config)
    }
}

impl Default for CaptureSession<JpegArtifactEncoder> {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl<E: ArtifactEncoder> CaptureSession<E> {
    pub fn with_encoder(encoder: E, config: SessionConfig) -> Self {
        let stacker = FrameStacker::new(
            config.stack_config(),
            LookProcessor::new(config.look.clone()),
        );

        Self {
            stacker,
            encoder,
            config,
            state: Mutex::new(SessionState {
                current: CaptureState::Idle,
                last_outcome: None,
            }),
            gallery: Mutex::new(Vec::new()),
        }
    }

    /// Captures one artifact from `source`.
    ///
    /// Enhanced mode stacks `frame_count` samples; standard mode takes a single
    /// sample. Both paths apply the look once and encode the result. On failure
    /// no artifact is produced and the session is ready for another attempt.
    #[instrument(skip(self, source, settings))]
    pub async fn capture<S>(
        &self,
        mode: CaptureMode,
        source: &mut S,
        settings: CaptureSettings,
    ) -> Result<CapturedArtifact>
    where
        S: FrameSource + ?Sized,
    {
        let guard = self.begin_capture()?;

        let result = self.run_capture(mode, source, settings).await;

        match &result {
            Ok(artifact) => {
                let (width, height) = artifact.dimensions();
                info!(
                    id = %artifact.id(),
                    width,
                    height,
                    bytes = artifact.payload().len(),
                    "Capture complete"
                );
                lock(&self.gallery).push(artifact.clone());
                guard.finish(CaptureOutcome::Completed(artifact.id()));
            }
            Err(e) => {
                error!(kind = e.kind(), error = %e, "Capture failed");
                guard.finish(CaptureOutcome::Failed(e.to_string()));
            }
        }

        result
    }

    fn begin_capture(&self) -> Result<CaptureGuard<'_>> {
        let mut state = lock(&self.state);
        if state.current == CaptureState::Capturing {
            warn!("Capture requested while another is in progress");
            return Err(PipelineError::CaptureInProgress);
        }
        debug!(from = ?state.current, to = ?CaptureState::Capturing, "Capture state transition");
        state.current = CaptureState::Capturing;

        Ok(CaptureGuard {
            state: &self.state,
            finished: false,
        })
    }

    async fn run_capture<S>(
        &self,
        mode: CaptureMode,
        source: &mut S,
        settings: CaptureSettings,
    ) -> Result<CapturedArtifact>
    where
        S: FrameSource + ?Sized,
    {
        let captured_at = Utc::now();
        let frame_count = match mode {
            CaptureMode::Enhanced => self.config.frame_count,
            CaptureMode::Standard => 1,
        };

        let image = self.stacker.stack(source, frame_count).await?;
        let (width, height) = image.dimensions();

        let mut payload = Vec::new();
        {
            let _span = tracing::info_span!("encode_artifact",
                format = ?self.encoder.format(),
                width,
                height
            ).entered();
            self.encoder.encode(&image, &mut payload)?;
        }
        drop(image);

        Ok(CapturedArtifact::new(
            Uuid::new_v4(),
            payload.into(),
            self.encoder.format(),
            captured_at,
            width,
            height,
            mode,
            settings,
        ))
    }

    /// `Capturing` while a capture runs, otherwise `Idle`.
    pub fn state(&self) -> CaptureState {
        lock(&self.state).current
    }

    pub fn last_outcome(&self) -> Option<CaptureOutcome> {
        lock(&self.state).last_outcome.clone()
    }

    /// Completed artifacts, oldest first.
    pub fn artifacts(&self) -> Vec<CapturedArtifact> {
        lock(&self.gallery).clone()
    }

    pub fn artifact(&self, id: Uuid) -> Option<CapturedArtifact> {
        lock(&self.gallery).iter().find(|a| a.id() == id).cloned()
    }

    /// Removes an artifact from the session. Returns false if it was not present.
    pub fn discard(&self, id: Uuid) -> bool {
        let mut gallery = lock(&self.gallery);
        let before = gallery.len();
        gallery.retain(|a| a.id() != id);
        let removed = gallery.len() != before;
        if removed {
            debug!(%id, "Artifact discarded");
        }
        removed
    }

    pub fn clear(&self) {
        lock(&self.gallery).clear();
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn encoder(&self) -> &E {
        &self.encoder
    }
}
