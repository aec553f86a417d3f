// ── Volume calibration selection ──

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

pub use aamp_api::webapi::models::{VolumeCalibration, VolumeCategory, VolumeSetting};
pub use aamp_api::webapi::volumes::VOLUME_RANGE;

/// Which calibration categories an operation applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum VolumeSelection {
    /// Every category, in PAGING, ANNOUNCEMENT, MUSIC order.
    #[default]
    All,
    Category(VolumeCategory),
}

impl VolumeSelection {
    /// The categories this selection covers, in request order.
    pub fn categories(self) -> Vec<VolumeCategory> {
        match self {
            Self::All => VolumeCategory::ALL.to_vec(),
            Self::Category(category) => vec![category],
        }
    }
}

impl From<VolumeCategory> for VolumeSelection {
    fn from(category: VolumeCategory) -> Self {
        Self::Category(category)
    }
}

impl fmt::Display for VolumeSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("ALL"),
            Self::Category(category) => write!(f, "{category}"),
        }
    }
}

impl FromStr for VolumeSelection {
    type Err = strum::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Category)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn all_expands_in_request_order() {
        assert_eq!(
            VolumeSelection::All.categories(),
            vec![
                VolumeCategory::Paging,
                VolumeCategory::Announcement,
                VolumeCategory::Music
            ]
        );
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("all".parse::<VolumeSelection>().unwrap(), VolumeSelection::All);
        assert_eq!(
            "Music".parse::<VolumeSelection>().unwrap(),
            VolumeSelection::Category(VolumeCategory::Music)
        );
        assert!("bass".parse::<VolumeSelection>().is_err());
    }
}
