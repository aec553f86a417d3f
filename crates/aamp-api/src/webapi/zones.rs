// Web API zone endpoints

use reqwest::{Method, StatusCode};
use serde_json::json;
use tracing::debug;

use crate::error::Error;
use crate::webapi::client::{WebApiClient, decode};
use crate::webapi::models::SinkAssignmentResponse;

impl WebApiClient {
    /// Move a device's sink into another physical zone.
    ///
    /// `POST /webapi/v1/zones/{zone}/sinksAssignment` with `{"sinkIds": [N]}`.
    /// Returns whether the server lists the sink among `successfulIds`.
    pub async fn assign_sink_to_zone(&self, zone_id: u64, sink_id: u64) -> Result<bool, Error> {
        let url = self.api_url(&format!("zones/{zone_id}/sinksAssignment"))?;
        debug!(zone_id, sink_id, "assigning sink to zone");
        let resp = self
            .call(
                Method::POST,
                url,
                &json!({ "sinkIds": [sink_id] }),
                StatusCode::OK,
            )
            .await?;
        let result: SinkAssignmentResponse = decode(resp).await?;
        Ok(result.successful_ids.contains(&sink_id))
    }
}
