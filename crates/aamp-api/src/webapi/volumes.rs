// Web API volume calibration endpoints
//
// Calibration is the base gain offset of a zone or site, set separately for
// music, announcements and paging.

use std::ops::RangeInclusive;

use reqwest::{Method, StatusCode};
use serde_json::json;
use tracing::debug;

use crate::error::Error;
use crate::webapi::client::WebApiClient;
use crate::webapi::models::{
    CalibrationScope, DataEnvelope, VolumeCalibration, VolumeCategory, VolumesPayload,
};

/// Gain offsets the server accepts.
pub const VOLUME_RANGE: RangeInclusive<i32> = -100_000..=100_000;

impl WebApiClient {
    /// Read the calibration levels of a zone or site.
    ///
    /// `GET /webapi/v1/{zones|sites}/{id}/volumes`, unwrapping `data.volumes`.
    pub async fn get_volume_calibration(
        &self,
        scope: CalibrationScope,
        id: u64,
    ) -> Result<VolumeCalibration, Error> {
        let url = self.api_url(&format!("{scope}/{id}/volumes"))?;
        debug!(%scope, id, "reading volume calibration");
        let envelope: DataEnvelope<VolumesPayload> = self.get(url).await?;
        Ok(envelope.data.volumes)
    }

    /// Set the calibration level of one category on a zone or site.
    ///
    /// `PUT /webapi/v1/{zones|sites}/{id}/volumes/{CATEGORY}` with
    /// `{"defaultGainOffset": level}`, answered with `204 No Content`.
    pub async fn set_volume_calibration(
        &self,
        scope: CalibrationScope,
        id: u64,
        category: VolumeCategory,
        level: i32,
    ) -> Result<(), Error> {
        if !VOLUME_RANGE.contains(&level) {
            return Err(Error::InvalidArgument(format!(
                "volume level {level} outside {}..={}",
                VOLUME_RANGE.start(),
                VOLUME_RANGE.end()
            )));
        }

        let url = self.api_url(&format!("{scope}/{id}/volumes/{category}"))?;
        debug!(%scope, id, %category, level, "setting volume calibration");
        self.call(
            Method::PUT,
            url,
            &json!({ "defaultGainOffset": level }),
            StatusCode::NO_CONTENT,
        )
        .await?;
        Ok(())
    }
}
