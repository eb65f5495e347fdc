//! DTOs for the ip-api.com style JSON lookup response.

use serde::Deserialize;
use tracing::debug;

use crate::domain::ports::GeoLocation;

const SUCCESS_STATUS: &str = "success";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct LookupResponseDto {
    pub(super) status: String,
    #[serde(default)]
    pub(super) message: Option<String>,
    #[serde(default)]
    pub(super) city: Option<String>,
    #[serde(default)]
    pub(super) region_name: Option<String>,
}

impl LookupResponseDto {
    /// `None` when the service reports the address as unknown or reserved.
    pub(super) fn into_location(self) -> Option<GeoLocation> {
        if self.status != SUCCESS_STATUS {
            debug!(
                status = %self.status,
                reason = self.message.as_deref().unwrap_or_default(),
                "geolocation service had no answer"
            );
            return None;
        }
        Some(GeoLocation {
            city: non_blank(self.city),
            region: non_blank(self.region_name),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
