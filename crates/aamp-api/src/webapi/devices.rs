// Web API device endpoints
//
// Hardware inventory and the test tone ("ding"). Both address a device by
// the numeric id of its audio sink.

use reqwest::{Method, StatusCode};
use serde_json::json;
use tracing::debug;

use crate::error::Error;
use crate::webapi::client::WebApiClient;
use crate::webapi::models::{DeviceListing, HardwareDevice};

/// The web UI asks for one page big enough to hold every device.
const DEVICE_PAGE_SIZE: i32 = i32::MAX;

impl WebApiClient {
    /// List all hardware devices with MAC, IP, model and firmware details.
    ///
    /// `GET /webapi/v1/devices?size=2147483647`
    pub async fn list_devices(&self) -> Result<Vec<HardwareDevice>, Error> {
        let url = self.api_url(&format!("devices?size={DEVICE_PAGE_SIZE}"))?;
        debug!("listing hardware devices");
        let listing: DeviceListing = self.get(url).await?;
        Ok(listing.into_devices())
    }

    /// Play the test tone on a device's sink for `length_secs` seconds.
    ///
    /// `POST /webapi/v1/testTone` with `{"sinkId": N, "toneLength": S}`,
    /// answered with `201 Created`.
    pub async fn start_test_tone(&self, sink_id: u64, length_secs: u32) -> Result<(), Error> {
        let url = self.api_url("testTone")?;
        debug!(sink_id, length_secs, "starting test tone");
        self.call(
            Method::POST,
            url,
            &json!({
                "sinkId": sink_id,
                "toneLength": length_secs,
            }),
            StatusCode::CREATED,
        )
        .await?;
        Ok(())
    }
}
