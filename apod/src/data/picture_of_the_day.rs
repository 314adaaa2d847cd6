use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
    #[serde(other)]
    Other,
}

/// One entry of the Astronomy Picture of the Day archive.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct PictureOfTheDay {
    pub date: NaiveDate,
    pub title: String,
    pub explanation: String,
    pub url: String,
    pub hdurl: Option<String>,
    pub media_type: MediaType,
    pub copyright: Option<String>,
    pub service_version: Option<String>,
    pub thumbnail_url: Option<String>,
}
