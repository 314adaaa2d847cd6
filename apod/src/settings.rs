use crate::{apod_api_client::DEFAULT_BASE_URL, error::Error};
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;

pub const API_KEY_VARIABLE: &str = "APOD_API_KEY";
pub const URL_VARIABLE: &str = "APOD_URL";
pub const SEED_VARIABLE: &str = "APOD_SEED";

/// Values the suite needs before any request is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    api_key: String,
    base_url: String,
    seed: Option<u64>,
}

impl Settings {
    /// Reads `APOD_API_KEY` (required), `APOD_URL` and `APOD_SEED` from the environment.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self, Error> {
        let api_key = lookup(API_KEY_VARIABLE)
            .filter(|value| !value.trim().is_empty())
            .ok_or(Error::NotConfigured(API_KEY_VARIABLE))?;

        let base_url = lookup(URL_VARIABLE)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| String::from(DEFAULT_BASE_URL));

        let seed = match lookup(SEED_VARIABLE) {
            Some(value) => Some(
                value
                    .trim()
                    .parse()
                    .map_err(|_| Error::InvalidSetting(SEED_VARIABLE, value))?,
            ),
            None => None,
        };

        Ok(Self {
            api_key,
            base_url,
            seed,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Random source for the suite's generated parameters. Without a configured seed one is
    /// drawn and logged, so a failing run can be repeated with `APOD_SEED`.
    pub fn rng(&self) -> StdRng {
        let seed = self.seed.unwrap_or_else(rand::random);
        info!(seed, "Seeding random parameters");

        StdRng::seed_from_u64(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::Settings;
    use crate::{apod_api_client::DEFAULT_BASE_URL, error::Error};
    use std::collections::HashMap;

    fn lookup_in(variables: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let variables: HashMap<String, String> = variables
            .iter()
            .map(|(name, value)| (String::from(*name), String::from(*value)))
            .collect();

        move |name| variables.get(name).cloned()
    }

    #[test]
    fn api_key_is_required() {
        match Settings::from_lookup(lookup_in(&[])) {
            Err(Error::NotConfigured(variable)) => assert_eq!(variable, "APOD_API_KEY"),
            other => panic!("Expected a configuration error, got {:?}", other),
        }
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        assert!(Settings::from_lookup(lookup_in(&[("APOD_API_KEY", "  ")])).is_err());
    }

    #[test]
    fn url_defaults_to_the_public_endpoint() {
        let settings = Settings::from_lookup(lookup_in(&[("APOD_API_KEY", "KEY")])).unwrap();

        assert_eq!(settings.api_key(), "KEY");
        assert_eq!(settings.base_url(), DEFAULT_BASE_URL);
        assert_eq!(settings.seed(), None);
    }

    #[test]
    fn url_and_seed_are_read() {
        let settings = Settings::from_lookup(lookup_in(&[
            ("APOD_API_KEY", "KEY"),
            ("APOD_URL", "http://localhost:8080/apod"),
            ("APOD_SEED", "42"),
        ]))
        .unwrap();

        assert_eq!(settings.base_url(), "http://localhost:8080/apod");
        assert_eq!(settings.seed(), Some(42));
    }

    #[test]
    fn invalid_seed_is_rejected() {
        let result = Settings::from_lookup(lookup_in(&[
            ("APOD_API_KEY", "KEY"),
            ("APOD_SEED", "forty-two"),
        ]));

        match result {
            Err(Error::InvalidSetting(variable, value)) => {
                assert_eq!(variable, "APOD_SEED");
                assert_eq!(value, "forty-two");
            }
            other => panic!("Expected an invalid setting error, got {:?}", other),
        }
    }

    #[test]
    fn seeded_settings_repeat_their_draws() {
        use rand::Rng;

        let settings = Settings::from_lookup(lookup_in(&[
            ("APOD_API_KEY", "KEY"),
            ("APOD_SEED", "42"),
        ]))
        .unwrap();

        let first: u64 = settings.rng().gen();
        let second: u64 = settings.rng().gen();
        assert_eq!(first, second);
    }
}
