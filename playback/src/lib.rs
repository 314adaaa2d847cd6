//! Offline playback of recorded HTTP interactions.
//!
//! A [`PlaybackServer`] reads a markdown file of recorded interactions and answers requests on a
//! local port with them, in order. Tests usually don't use it directly but through the
//! [`playback_test`] attribute:
//!
//! ```ignore
//! fn configure(config: &mut apod_playback::PlaybackConfiguration) {
//!     config.rewrite_origin("https://apod.nasa.gov");
//! }
//!
//! #[playback_test("playback_data/picture.md", configure)]
//! fn picture_is_replayed(base_url: &str) {
//!     // point the client under test at `base_url`
//! }
//! ```

mod data;
mod error;
pub mod markdown;
mod mutations;
mod playback_configuration;
mod playback_server;
mod util;

pub use apod_playback_codegen::playback_test;
pub use data::{InteractionData, RequestData, ResponseData};
pub use error::Error;
pub use mutations::{BodyMutation, HeadersMutation, MutationsBuilder, ResponseMutation};
pub use playback_configuration::PlaybackConfiguration;
pub use playback_server::PlaybackServer;
