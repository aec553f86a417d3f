// ── Domain model ──
//
// Canonical types presented to consumers. Built from aamp-api wire types in
// `crate::convert`; none of them are persisted.

pub mod audio_file;
pub mod hardware;
pub mod target;
pub mod target_id;
pub mod volume;

pub use audio_file::{AudioFile, PlayOptions, Priority, SessionId};
pub use hardware::{DeviceHardware, SinkInfo};
pub use target::{AudioDevice, AudioTarget, PhysicalZone, Site, TargetInfo, TargetKind};
pub use target_id::TargetId;
pub use volume::{VOLUME_RANGE, VolumeCalibration, VolumeCategory, VolumeSelection, VolumeSetting};
