//! Client and conformance checks for the NASA Astronomy Picture of the Day API.
//!
//! The checks live in [`conformance`]. Each one has a test running it against the live service
//! (ignored by default, run with `cargo test -- --ignored` and `APOD_API_KEY` set) and one
//! running it against interactions recorded under `playback_data/`.

mod apod_api_client;
pub mod conformance;
pub mod data;
pub mod dates;
mod error;
mod query;
pub mod settings;

pub use apod_api_client::{ApodApiClient, ApodApiClientBuilder, DEFAULT_BASE_URL};
pub use conformance::{ConformanceSuite, SuiteContext};
pub use data::{
    apod_response::ApodResponse,
    picture_of_the_day::{MediaType, PictureOfTheDay},
};
pub use error::Error;
pub use query::ApodQuery;
pub use settings::Settings;
