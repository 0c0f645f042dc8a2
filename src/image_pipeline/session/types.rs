//! Capture session types

use std::fmt;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::image_pipeline::encoding::EncodingFormat;

/// Which pipeline path a capture takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureMode {
    /// One frame, look applied directly
    Standard,
    /// Several frames stacked before the look is applied
    Enhanced,
}

impl CaptureMode {
    pub fn is_enhanced(&self) -> bool {
        matches!(self, CaptureMode::Enhanced)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CaptureMode::Standard => "standard",
            CaptureMode::Enhanced => "enhanced",
        }
    }
}

impl fmt::Display for CaptureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WhiteBalance {
    #[default]
    Auto,
    Daylight,
    Cloudy,
    Tungsten,
    Fluorescent,
}

/// Simulated exposure parameters, snapshotted when a capture starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureSettings {
    /// Sensor sensitivity
    pub iso: u32,
    /// Shutter speed label such as "1/125"
    pub shutter_speed: String,
    /// Aperture label such as "f/1.8"
    pub aperture: String,
    pub white_balance: WhiteBalance,
    /// Exposure compensation in EV
    pub exposure_compensation: f32,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            iso: 100,
            shutter_speed: "1/125".to_string(),
            aperture: "f/1.8".to_string(),
            white_balance: WhiteBalance::Auto,
            exposure_compensation: 0.0,
        }
    }
}

/// Where a session is in its capture lifecycle.
///
/// `CaptureSession::state()` only reports `Idle` or `Capturing`; the terminal
/// `Completed`/`Failed` state of the last capture comes from `last_outcome()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Capturing,
    Completed,
    Failed,
}

/// How the most recent capture ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    Completed(Uuid),
    Failed(String),
}

impl CaptureOutcome {
    pub fn state(&self) -> CaptureState {
        match self {
            CaptureOutcome::Completed(_) => CaptureState::Completed,
            CaptureOutcome::Failed(_) => CaptureState::Failed,
        }
    }
}

/// The encoded result of one completed capture.
///
/// Artifacts never change after creation. Cloning is cheap because the payload
/// is reference counted.
#[derive(Debug, Clone)]
pub struct CapturedArtifact {
    id: Uuid,
    payload: Arc<[u8]>,
    format: EncodingFormat,
    captured_at: DateTime<Utc>,
    width: u32,
    height: u32,
    mode: CaptureMode,
    settings: CaptureSettings,
}

impl CapturedArtifact {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: Uuid,
        payload: Arc<[u8]>,
        format: EncodingFormat,
        captured_at: DateTime<Utc>,
        width: u32,
        height: u32,
        mode: CaptureMode,
        settings: CaptureSettings,
    ) -> Self {
        Self {
            id,
            payload,
            format,
            captured_at,
            width,
            height,
            mode,
            settings,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn format(&self) -> EncodingFormat {
        self.format
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn mode(&self) -> CaptureMode {
        self.mode
    }

    /// True when the stacked path produced this artifact.
    pub fn is_enhanced(&self) -> bool {
        self.mode.is_enhanced()
    }

    pub fn settings(&self) -> &CaptureSettings {
        &self.settings
    }

    /// The payload as a base64 `data:` URL, ready for display or upload.
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.format.mime_type(),
            BASE64.encode(&self.payload)
        )
    }

    pub fn metadata(&self) -> ArtifactMetadata {
        ArtifactMetadata {
            id: self.id,
            timestamp: self.captured_at,
            width: self.width,
            height: self.height,
            is_enhanced: self.is_enhanced(),
            settings: SettingsMetadata {
                iso: self.settings.iso,
                shutter_speed: self.settings.shutter_speed.clone(),
                aperture: self.settings.aperture.clone(),
                mode: self.mode.as_str().to_string(),
                white_balance: self.settings.white_balance,
                exposure_compensation: self.settings.exposure_compensation,
            },
        }
    }
}

/// Serialisable description of an artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactMetadata {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub width: u32,
    pub height: u32,
    pub is_enhanced: bool,
    pub settings: SettingsMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsMetadata {
    pub iso: u32,
    pub shutter_speed: String,
    pub aperture: String,
    pub mode: String,
    pub white_balance: WhiteBalance,
    pub exposure_compensation: f32,
}
