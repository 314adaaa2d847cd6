//! Conformance checks of the APOD endpoint.
//!
//! Every check sends one or two requests and verifies the documented contract of the service.
//! A check returns `Ok(())` when all of its expectations hold, [`Error::ExpectationFailed`] when
//! one doesn't, and any transport, decoding or field lookup error unchanged. Nothing is retried.

use crate::{
    apod_api_client::{ApodApiClient, ApodApiClientBuilder},
    data::picture_of_the_day::MediaType,
    dates,
    error::Error,
    query::ApodQuery,
    settings::Settings,
};
use chrono::NaiveDate;
use tracing::info;

pub const API_KEY_MISSING: &str = "API_KEY_MISSING";
pub const DATE_FORMAT_MISMATCH: &str = "does not match format '%Y-%m-%d";

/// Values fixed once when the suite starts, so that every check sees the same "today".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteContext {
    api_key: String,
    today: NaiveDate,
}

impl SuiteContext {
    pub fn new<T: Into<String>>(api_key: T, today: NaiveDate) -> Self {
        Self {
            api_key: api_key.into(),
            today,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.api_key(), dates::today())
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Today as `YYYY-MM-DD`.
    pub fn current_date(&self) -> String {
        dates::format_iso(self.today)
    }

    /// The API key and today's date.
    pub fn default_params(&self) -> ApodQuery {
        self.keyed_params().date(self.today)
    }

    fn keyed_params(&self) -> ApodQuery {
        ApodQuery::new().api_key(self.api_key.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct ConformanceSuite {
    client: ApodApiClient,
    context: SuiteContext,
}

impl ConformanceSuite {
    pub fn new(client: ApodApiClient, context: SuiteContext) -> Self {
        Self { client, context }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let client = ApodApiClientBuilder::new()
            .with_base_url(settings.base_url())
            .build();

        Self::new(client, SuiteContext::from_settings(settings))
    }

    pub fn context(&self) -> &SuiteContext {
        &self.context
    }

    /// Without an API key the service refuses the request with 403 and `API_KEY_MISSING`.
    pub fn request_without_api_key(&self) -> Result<(), Error> {
        info!(check = "request_without_api_key", "Running check");
        let response = self.client.get_picture(&ApodQuery::new())?;
        let code = response.str_field("/error/code")?;

        expect(
            "request_without_api_key",
            response.status_code == 403 && code == API_KEY_MISSING,
            || {
                format!(
                    "expected 403 {}, got {} {}",
                    API_KEY_MISSING, response.status_code, code
                )
            },
        )
    }

    /// A `DD-MM-YY` date is refused with 400 and a message naming the expected format.
    pub fn invalid_date_format(&self) -> Result<(), Error> {
        info!(check = "invalid_date_format", "Running check");
        let query = self
            .context
            .keyed_params()
            .param("date", dates::format_short(self.context.today));
        let response = self.client.get_picture(&query)?;
        let message = response.str_field("/msg")?;

        expect(
            "invalid_date_format",
            response.status_code == 400 && message.contains(DATE_FORMAT_MISMATCH),
            || {
                format!(
                    "expected 400 with a format error, got {} {:?}",
                    response.status_code, message
                )
            },
        )
    }

    /// The `url` of today's picture can be downloaded.
    pub fn url_for_image_is_reachable(&self) -> Result<(), Error> {
        info!(check = "url_for_image_is_reachable", "Running check");
        self.linked_resource_is_reachable("url_for_image_is_reachable", "/url")
    }

    /// The `hdurl` of today's picture can be downloaded.
    pub fn url_for_hd_image_is_reachable(&self) -> Result<(), Error> {
        info!(check = "url_for_hd_image_is_reachable", "Running check");
        self.linked_resource_is_reachable("url_for_hd_image_is_reachable", "/hdurl")
    }

    fn linked_resource_is_reachable(
        &self,
        check: &'static str,
        pointer: &str,
    ) -> Result<(), Error> {
        let response = self.client.get_picture(&self.context.default_params())?;
        let resource_url = response.str_field(pointer)?;
        let status_code = self.client.get_status(resource_url)?;

        expect(check, status_code == 200, || {
            format!("{} answered {}", resource_url, status_code)
        })
    }

    /// Today's picture and the picture of `random_date` have different URLs.
    ///
    /// Fails if `random_date` happens to be today.
    pub fn different_pictures_for_different_dates(
        &self,
        random_date: NaiveDate,
    ) -> Result<(), Error> {
        info!(check = "different_pictures_for_different_dates", %random_date, "Running check");
        let current = self.client.get_picture(&self.context.default_params())?;
        let image_for_current_date = current.str_field("/url")?;

        let other = self
            .client
            .get_picture(&self.context.keyed_params().date(random_date))?;
        let image_for_different_date = other.str_field("/url")?;

        expect(
            "different_pictures_for_different_dates",
            image_for_current_date != image_for_different_date,
            || {
                format!(
                    "{} and {} share {}",
                    self.context.current_date(),
                    random_date,
                    image_for_current_date
                )
            },
        )
    }

    /// Sending today's date next to a `start_date` is refused with 400.
    ///
    /// Suspect: today's date goes out under the name `default_params`, which the service doesn't
    /// know, instead of `date`. The request is kept as is.
    pub fn invalid_date_use_with_start_date(&self, random_date: NaiveDate) -> Result<(), Error> {
        info!(check = "invalid_date_use_with_start_date", %random_date, "Running check");
        let query = self
            .context
            .keyed_params()
            .param("default_params", self.context.current_date())
            .start_date(random_date);
        let response = self.client.get_picture(&query)?;

        expect(
            "invalid_date_use_with_start_date",
            response.status_code == 400,
            || format!("expected 400, got {}", response.status_code),
        )
    }

    /// Without a `date` the service answers with today's picture.
    pub fn without_current_date(&self) -> Result<(), Error> {
        info!(check = "without_current_date", "Running check");
        let response = self.client.get_picture(&self.context.keyed_params())?;
        let date = response.str_field("/date")?;
        let current_date = self.context.current_date();

        expect("without_current_date", date == current_date, || {
            format!("expected {}, got {}", current_date, date)
        })
    }

    pub fn explanation_is_not_empty(&self) -> Result<(), Error> {
        info!(check = "explanation_is_not_empty", "Running check");
        let response = self.client.get_picture(&self.context.default_params())?;
        let explanation = response.str_field("/explanation")?;

        expect("explanation_is_not_empty", !explanation.is_empty(), || {
            String::from("explanation is empty")
        })
    }

    /// Named after the documented default, an image.
    ///
    /// Suspect: the assertion expects `video`, so it only holds on days the service returns a
    /// video. Kept as written.
    pub fn media_type_is_image(&self) -> Result<(), Error> {
        info!(check = "media_type_is_image", "Running check");
        let response = self.client.get_picture(&self.context.default_params())?;
        let media_type = response.str_field("/media_type")?;

        expect("media_type_is_image", media_type == "video", || {
            format!("media_type is {:?}", media_type)
        })
    }

    /// Requests `count` random pictures.
    ///
    /// Suspect: the documented behavior is a body of exactly `count` entries, but the assertion
    /// requires the length to differ from `count`. Kept as written.
    pub fn len_of_response_with_count(&self, count: u8) -> Result<(), Error> {
        info!(check = "len_of_response_with_count", count, "Running check");
        let response = self
            .client
            .get_picture(&self.context.keyed_params().count(count))?;
        let len = response.body_len()?;

        expect("len_of_response_with_count", usize::from(count) != len, || {
            format!("count {} and body length {} are equal", count, len)
        })
    }

    /// The picture of `date` decodes, has non-empty `url`, `hdurl` and `explanation`, and is an
    /// image or a video.
    pub fn picture_for_fixed_date(&self, date: NaiveDate) -> Result<(), Error> {
        info!(check = "picture_for_fixed_date", %date, "Running check");
        let response = self
            .client
            .get_picture(&self.context.keyed_params().date(date))?;
        expect("picture_for_fixed_date", response.status_code == 200, || {
            format!("expected 200, got {}", response.status_code)
        })?;

        let picture = response.picture()?;
        let hdurl = picture.hdurl.as_deref().unwrap_or_default();

        expect(
            "picture_for_fixed_date",
            !picture.url.is_empty() && !hdurl.is_empty() && !picture.explanation.is_empty(),
            || format!("picture of {} lacks url, hdurl or explanation", date),
        )?;
        expect(
            "picture_for_fixed_date",
            matches!(picture.media_type, MediaType::Image | MediaType::Video),
            || format!("media_type is {:?}", picture.media_type),
        )
    }
}

fn expect<F: FnOnce() -> String>(
    check: &'static str,
    condition: bool,
    detail: F,
) -> Result<(), Error> {
    if condition {
        Ok(())
    } else {
        Err(Error::ExpectationFailed {
            check,
            detail: detail(),
        })
    }
}
