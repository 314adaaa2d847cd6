use crate::{data::apod_response::ApodResponse, error::Error, query::ApodQuery};
use reqwest::{self};
use serde_json::Value;
use tracing::debug;
type ReqwestClient = reqwest::blocking::Client;

pub const DEFAULT_BASE_URL: &str = "https://api.nasa.gov/planetary/apod";

/// Builder used to build an ApodApiClient instance
#[derive(Debug, Clone, Default)]
pub struct ApodApiClientBuilder {
    base_url: Option<String>,
    http_client: Option<ReqwestClient>,
}

impl ApodApiClientBuilder {
    /// Create a new ApodApiClientBuilder instance.
    pub fn new() -> Self {
        Self {
            base_url: None,
            http_client: None,
        }
    }

    /// Use the given endpoint URL when building an ApodApiClient instance.
    ///
    /// # Arguments
    /// `base_url` - the full URL of the APOD endpoint, e.g. `https://api.nasa.gov/planetary/apod`.
    ///
    /// # Returns
    /// This builder.
    pub fn with_base_url<T: Into<String>>(mut self, base_url: T) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Use the given blocking reqwest client when building an ApodApiClient instance.
    ///
    /// # Arguments
    /// `client` - a pre-configured blocking reqwest client.
    ///
    /// # Returns
    /// This builder.
    pub fn with_http_client(mut self, client: ReqwestClient) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Consume the builder and create an ApodApiClient instance using all of the previously
    /// configured values or their defaults.
    pub fn build(mut self) -> ApodApiClient {
        ApodApiClient {
            http: self.http_client.take().unwrap_or_default(),
            base_url: self
                .base_url
                .take()
                .unwrap_or_else(|| String::from(DEFAULT_BASE_URL)),
        }
    }
}

/// Struct that represents a NASA Astronomy Picture of the Day API client.
///
/// The client doesn't interpret status codes: error responses of the service are returned like
/// successful ones so that callers can inspect them.
#[derive(Debug, Clone)]
pub struct ApodApiClient {
    http: ReqwestClient,
    base_url: String,
}

impl ApodApiClient {
    /// Create an ApodApiClient for the public endpoint with the default reqwest client.
    pub fn new() -> Self {
        ApodApiClient {
            http: ReqwestClient::new(),
            base_url: String::from(DEFAULT_BASE_URL),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Calls the APOD endpoint with the given query parameters.
    ///
    /// # Returns
    /// The status code and the JSON body, whatever the status. A body that isn't JSON is an
    /// error.
    pub fn get_picture(&self, query: &ApodQuery) -> Result<ApodResponse, Error> {
        let response = self.http.get(&self.base_url).query(query.pairs()).send()?;
        let status_code = response.status().as_u16();

        debug!(
            url = %self.base_url,
            params = ?query.names(),
            status = status_code,
            "APOD request completed"
        );

        let body: Value = response.json()?;

        Ok(ApodResponse { status_code, body })
    }

    /// Requests `url` and returns the status code. The body is dropped unread.
    pub fn get_status<T: AsRef<str>>(&self, url: T) -> Result<u16, Error> {
        let response = self.http.get(url.as_ref()).send()?;
        let status_code = response.status().as_u16();

        debug!(url = url.as_ref(), status = status_code, "Resource request completed");

        Ok(status_code)
    }
}

impl Default for ApodApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(non_snake_case)]
mod tests {
    use crate::{
        data::picture_of_the_day::MediaType, dates, error::Error, query::ApodQuery, ApodApiClient,
        ApodApiClientBuilder, DEFAULT_BASE_URL,
    };
    use apod_playback::{playback_test, PlaybackConfiguration};
    use chrono::NaiveDate;

    fn playback_configure(config: &mut PlaybackConfiguration) {
        config.rewrite_origin("https://apod.nasa.gov");
    }

    fn playback_client(base_url: &str) -> ApodApiClient {
        ApodApiClientBuilder::new()
            .with_base_url(format!("{}/planetary/apod", base_url))
            .with_http_client(
                reqwest::blocking::Client::builder()
                    .no_proxy()
                    .build()
                    .unwrap(),
            )
            .build()
    }

    #[test]
    fn test_builderDefaultsToThePublicEndpoint() {
        assert_eq!(ApodApiClientBuilder::new().build().base_url(), DEFAULT_BASE_URL);
        assert_eq!(ApodApiClient::new().base_url(), DEFAULT_BASE_URL);
    }

    #[playback_test("playback_data/fixed_date_picture.md", playback_configure)]
    fn test_pictureForMarch5th2020IsDecoded_playback(base_url: &str) {
        let client = playback_client(base_url);
        let date = NaiveDate::from_ymd_opt(2020, 3, 5).unwrap();

        let response = client
            .get_picture(&ApodQuery::new().api_key("DEMO_KEY").date(date))
            .unwrap();
        assert_eq!(response.status_code, 200);

        let picture = response.picture().unwrap();
        assert_eq!(picture.date, date);
        assert_eq!(dates::format_iso(picture.date), response.str_field("/date").unwrap());
        assert!(picture.url.starts_with(base_url));
    }

    #[playback_test("playback_data/request_without_api_key.md", playback_configure)]
    fn test_errorResponsesAreReturnedWithTheirStatus_playback(base_url: &str) {
        let response = playback_client(base_url)
            .get_picture(&ApodQuery::new())
            .unwrap();

        assert_eq!(response.status_code, 403);
        assert!(response.picture().is_err());
    }

    #[playback_test("playback_data/image_url.md", playback_configure)]
    fn test_statusOfLinkedImageIsReturned_playback(base_url: &str) {
        let client = playback_client(base_url);
        let response = client
            .get_picture(&ApodQuery::new().api_key("DEMO_KEY"))
            .unwrap();

        let status = client.get_status(response.str_field("/url").unwrap()).unwrap();
        assert_eq!(status, 200);
    }

    #[playback_test("playback_data/count.md", playback_configure)]
    fn test_picturesForCountAreDecoded_playback(base_url: &str) {
        let response = playback_client(base_url)
            .get_picture(&ApodQuery::new().api_key("DEMO_KEY").count(3))
            .unwrap();

        let pictures = response.pictures().unwrap();
        assert_eq!(pictures.len(), 3);
        assert_eq!(pictures[1].title, "Recorded Comet");
        assert_eq!(pictures[1].date, NaiveDate::from_ymd_opt(2019, 11, 2).unwrap());
        assert!(pictures
            .iter()
            .all(|picture| picture.media_type == MediaType::Image));
    }

    #[playback_test("playback_data/html_error_page.md", playback_configure)]
    fn test_bodyThatIsNotJsonIsAnError_playback(base_url: &str) {
        match playback_client(base_url).get_picture(&ApodQuery::new().api_key("DEMO_KEY")) {
            Err(Error::ReqwestError(e)) => assert!(e.is_decode()),
            other => panic!("Expected a decoding error, got {:?}", other),
        }
    }
}
