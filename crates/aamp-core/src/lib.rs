//! Domain layer between `aamp-api` and consumers (the `aamp` CLI or other
//! programs controlling an Axis Audio Manager Pro server).
//!
//! - **[`AudioManager`]**: facade over the documented API client and the
//!   optional web API client. Lists targets, zones, sites, devices and audio
//!   files; plays one-shot sessions; and, with a web account, assigns
//!   devices to zones, plays test tones and reads or sets volume
//!   calibration.
//!
//! - **Domain model** ([`model`]): [`AudioTarget`] cast to [`PhysicalZone`],
//!   [`Site`] or [`AudioDevice`], plus [`DeviceHardware`] from the web
//!   interface.
//!
//! - **[`CoreError`]**: user-facing errors mapped from `aamp_api::Error`.

pub mod config;
pub mod convert;
pub mod error;
pub mod manager;
pub mod model;

// ── Primary re-exports ──────────────────────────────────────────────
pub use aamp_api::Credentials;
pub use config::{ManagerConfig, TlsVerification};
pub use error::CoreError;
pub use manager::{AudioManager, DEFAULT_TONE_SECS, ZoneSelector};
pub use model::{
    AudioDevice, AudioFile, AudioTarget, DeviceHardware, PhysicalZone, PlayOptions, Priority,
    SessionId, SinkInfo, Site, TargetId, TargetInfo, TargetKind, VOLUME_RANGE, VolumeCalibration,
    VolumeCategory, VolumeSelection, VolumeSetting,
};
