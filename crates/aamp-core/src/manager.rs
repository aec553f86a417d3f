// ── AudioManager facade ──
//
// Composes the documented API client and, when a web account is configured,
// the web API client. Reads go straight to the server on every call; the
// facade holds no inventory between calls.

use std::sync::Arc;

use aamp_api::webapi::models::CalibrationScope;
use aamp_api::{OfficialClient, WebApiClient};
use tracing::{debug, info};

use crate::config::ManagerConfig;
use crate::error::CoreError;
use crate::model::{
    AudioDevice, AudioFile, AudioTarget, DeviceHardware, PhysicalZone, PlayOptions, SessionId,
    Site, TargetId, TargetKind, VolumeCalibration, VolumeSelection,
};

/// Default test tone length in seconds.
pub const DEFAULT_TONE_SECS: u32 = 2;

// ── ZoneSelector ─────────────────────────────────────────────────────

/// A zone named by value, by web API number, or by `zon_N` target id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneSelector {
    Number(u64),
    Id(TargetId),
}

impl ZoneSelector {
    fn number(&self) -> Option<u64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Id(id) => id.number(),
        }
    }
}

impl From<u64> for ZoneSelector {
    fn from(n: u64) -> Self {
        Self::Number(n)
    }
}

impl From<TargetId> for ZoneSelector {
    fn from(id: TargetId) -> Self {
        Self::Id(id)
    }
}

impl From<&PhysicalZone> for ZoneSelector {
    fn from(zone: &PhysicalZone) -> Self {
        Self::Id(zone.id().clone())
    }
}

// ── AudioManager ─────────────────────────────────────────────────────

/// Entry point for controlling one AAMP server.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AudioManager {
    inner: Arc<ManagerInner>,
}

struct ManagerInner {
    config: ManagerConfig,
    official: OfficialClient,
    web: Option<WebApiClient>,
}

impl AudioManager {
    /// Build both clients from `config`. No request is sent until the first
    /// operation.
    pub fn new(config: ManagerConfig) -> Result<Self, CoreError> {
        let transport = config.transport();
        let http = transport.build_client()?;

        let official =
            OfficialClient::from_reqwest(config.url.as_str(), http.clone(), config.api.clone())?;
        let web = config
            .web
            .clone()
            .map(|creds| WebApiClient::with_client(http, config.url.as_str(), creds))
            .transpose()?;

        debug!(
            url = %config.url,
            web_api = web.is_some(),
            "audio manager configured"
        );

        Ok(Self {
            inner: Arc::new(ManagerInner {
                config,
                official,
                web,
            }),
        })
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.inner.config
    }

    /// Whether web API credentials are configured.
    pub fn unofficial_features_enabled(&self) -> bool {
        self.inner.web.is_some()
    }

    fn web(&self, operation: &str) -> Result<&WebApiClient, CoreError> {
        self.inner
            .web
            .as_ref()
            .ok_or_else(|| CoreError::web_api_required(operation))
    }

    // ── Targets ──────────────────────────────────────────────────────

    /// Every target the server lists, cast to its kind. Entries without a
    /// type are skipped.
    pub async fn audio_targets(&self) -> Result<Vec<AudioTarget>, CoreError> {
        let raw = self.inner.official.list_targets().await?;
        Ok(raw.into_iter().filter_map(AudioTarget::from_response).collect())
    }

    /// Load one target. `None` when the server does not know it.
    pub async fn audio_target(&self, id: &TargetId) -> Result<Option<AudioTarget>, CoreError> {
        let raw = self.inner.official.get_target(id.as_str()).await?;
        Ok(raw.and_then(AudioTarget::from_response))
    }

    pub async fn audio_zones(&self) -> Result<Vec<PhysicalZone>, CoreError> {
        let raw = self.inner.official.list_zones().await?;
        Ok(raw
            .into_iter()
            .filter_map(AudioTarget::from_response)
            .filter_map(AudioTarget::into_zone)
            .collect())
    }

    pub async fn audio_sites(&self) -> Result<Vec<Site>, CoreError> {
        Ok(self
            .audio_targets()
            .await?
            .into_iter()
            .filter_map(AudioTarget::into_site)
            .collect())
    }

    pub async fn audio_devices(&self) -> Result<Vec<AudioDevice>, CoreError> {
        Ok(self
            .audio_targets()
            .await?
            .into_iter()
            .filter_map(AudioTarget::into_device)
            .collect())
    }

    /// Load each child of `target`. Children the server no longer knows are
    /// skipped.
    pub async fn children(&self, target: &AudioTarget) -> Result<Vec<AudioTarget>, CoreError> {
        let mut out = Vec::with_capacity(target.children().len());
        for child in target.children() {
            match self.audio_target(child).await? {
                Some(loaded) => out.push(loaded),
                None => debug!(parent = %target.id(), %child, "child target not found"),
            }
        }
        Ok(out)
    }

    pub async fn children_zones(
        &self,
        target: &AudioTarget,
    ) -> Result<Vec<PhysicalZone>, CoreError> {
        Ok(self
            .children(target)
            .await?
            .into_iter()
            .filter_map(AudioTarget::into_zone)
            .collect())
    }

    pub async fn children_devices(
        &self,
        target: &AudioTarget,
    ) -> Result<Vec<AudioDevice>, CoreError> {
        Ok(self
            .children(target)
            .await?
            .into_iter()
            .filter_map(AudioTarget::into_device)
            .collect())
    }

    // ── Audio files and playback ─────────────────────────────────────

    pub async fn audio_files(&self) -> Result<Vec<AudioFile>, CoreError> {
        let raw = self.inner.official.list_audio_files().await?;
        Ok(raw.into_iter().map(AudioFile::from).collect())
    }

    /// Play one file once-off on `target`.
    pub async fn play_audio_file(
        &self,
        target: &TargetId,
        file: &str,
        options: PlayOptions,
    ) -> Result<Option<SessionId>, CoreError> {
        self.play_audio_files(std::slice::from_ref(target), &[file.to_owned()], options)
            .await
    }

    /// Play `files` in one session on every target in `targets`.
    ///
    /// Returns `None` without contacting the server when either list is
    /// empty.
    pub async fn play_audio_files(
        &self,
        targets: &[TargetId],
        files: &[String],
        options: PlayOptions,
    ) -> Result<Option<SessionId>, CoreError> {
        let targets: Vec<String> = targets.iter().map(ToString::to_string).collect();
        let session = self
            .inner
            .official
            .play_audio_files(&targets, files, options.repeat, options.priority)
            .await?;
        if let Some(ref session) = session {
            info!(session = %session.id, targets = targets.len(), "audio session started");
        }
        Ok(session.map(SessionId::from))
    }

    // ── Hardware (web API) ───────────────────────────────────────────

    /// Hardware listing from the web interface. Empty when no web account
    /// is configured.
    pub async fn hardware_devices(&self) -> Result<Vec<DeviceHardware>, CoreError> {
        let Some(web) = self.inner.web.as_ref() else {
            return Ok(Vec::new());
        };
        let raw = web.list_devices().await?;
        Ok(raw.into_iter().map(DeviceHardware::from).collect())
    }

    /// Hardware entry whose sinks include `device`'s sink.
    pub async fn device_hardware(
        &self,
        device: &AudioDevice,
    ) -> Result<Option<DeviceHardware>, CoreError> {
        let web = self.web("device hardware")?;
        let sink = sink_of(device)?;
        let raw = web.list_devices().await?;
        Ok(raw
            .into_iter()
            .find(|d| d.has_sink(sink))
            .map(DeviceHardware::from))
    }

    /// The zone `device` plays in: the first zone of its first sink.
    pub async fn parent_zone(&self, device: &AudioDevice) -> Result<PhysicalZone, CoreError> {
        let hardware = self
            .device_hardware(device)
            .await?
            .ok_or_else(|| CoreError::not_found("Device hardware", device.id()))?;
        let zone_number = hardware
            .primary_zone()
            .ok_or_else(|| CoreError::not_found("Parent zone", device.id()))?;
        let zone_id = TargetId::zone(zone_number);

        self.audio_target(&zone_id)
            .await?
            .and_then(AudioTarget::into_zone)
            .ok_or_else(|| CoreError::not_found("Zone", zone_id))
    }

    /// Move `device` into `zone`. Returns whether the server accepted the
    /// assignment.
    pub async fn assign_to_zone(
        &self,
        device: &AudioDevice,
        zone: impl Into<ZoneSelector>,
    ) -> Result<bool, CoreError> {
        let web = self.web("zone assignment")?;
        let zone = zone.into();
        let zone_number = zone.number().ok_or_else(|| CoreError::ValidationFailed {
            message: format!("{zone:?} does not name a numbered zone"),
        })?;
        let sink = sink_of(device)?;

        let assigned = web.assign_sink_to_zone(zone_number, sink).await?;
        info!(device = %device.id(), zone = zone_number, assigned, "zone assignment");
        Ok(assigned)
    }

    /// Play the test tone on `device` for `seconds`.
    pub async fn ding(&self, device: &AudioDevice, seconds: u32) -> Result<(), CoreError> {
        let web = self.web("test tone")?;
        let sink = sink_of(device)?;
        web.start_test_tone(sink, seconds).await?;
        Ok(())
    }

    // ── Volume calibration (web API) ─────────────────────────────────

    /// Calibration levels of a zone or site, limited to `selection`.
    pub async fn volume_calibration(
        &self,
        target: &AudioTarget,
        selection: VolumeSelection,
    ) -> Result<VolumeCalibration, CoreError> {
        let web = self.web("volume calibration")?;
        let (scope, number) = calibration_scope(target)?;

        let mut levels = web.get_volume_calibration(scope, number).await?;
        if let VolumeSelection::Category(category) = selection {
            let key = category.to_string();
            levels.retain(|name, _| *name == key);
        }
        Ok(levels)
    }

    /// Set the calibration level of a zone or site. `All` issues one request
    /// per category and stops at the first failure.
    pub async fn set_volume_calibration(
        &self,
        target: &AudioTarget,
        level: i32,
        selection: VolumeSelection,
    ) -> Result<(), CoreError> {
        let web = self.web("volume calibration")?;
        let (scope, number) = calibration_scope(target)?;

        for category in selection.categories() {
            web.set_volume_calibration(scope, number, category, level)
                .await?;
        }
        info!(target = %target.id(), level, %selection, "volume calibration set");
        Ok(())
    }
}

impl std::fmt::Debug for AudioManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioManager")
            .field("url", &self.inner.config.url.as_str())
            .field("web_api", &self.inner.web.is_some())
            .finish_non_exhaustive()
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

fn sink_of(device: &AudioDevice) -> Result<u64, CoreError> {
    device.sink_id().ok_or_else(|| CoreError::ValidationFailed {
        message: format!("device id {} has no numeric sink id", device.id()),
    })
}

fn calibration_scope(target: &AudioTarget) -> Result<(CalibrationScope, u64), CoreError> {
    let scope = match target.kind() {
        TargetKind::PhysicalZone => CalibrationScope::Zones,
        TargetKind::Device => {
            return Err(CoreError::ValidationFailed {
                message: format!(
                    "{} is a device; only zones and sites are calibrated",
                    target.id()
                ),
            });
        }
        TargetKind::Site | TargetKind::Other(_) => CalibrationScope::Sites,
    };
    let number = target
        .id()
        .number()
        .ok_or_else(|| CoreError::ValidationFailed {
            message: format!("target id {} has no numeric part", target.id()),
        })?;
    Ok((scope, number))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_selector_accepts_every_form() {
        assert_eq!(ZoneSelector::from(4_u64).number(), Some(4));
        assert_eq!(ZoneSelector::from(TargetId::from("zon_9")).number(), Some(9));
        assert_eq!(ZoneSelector::from(TargetId::from("lobby")).number(), None);
    }
}
