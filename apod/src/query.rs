use chrono::NaiveDate;

/// Query string of an APOD request, kept in insertion order.
///
/// Besides the documented parameters, [`ApodQuery::param`] accepts any name so that requests the
/// service doesn't expect can be sent as well.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApodQuery {
    pairs: Vec<(String, String)>,
}

impl ApodQuery {
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    pub fn api_key<T: Into<String>>(self, api_key: T) -> Self {
        self.param("api_key", api_key)
    }

    pub fn date(self, date: NaiveDate) -> Self {
        self.param("date", crate::dates::format_iso(date))
    }

    pub fn start_date(self, date: NaiveDate) -> Self {
        self.param("start_date", crate::dates::format_iso(date))
    }

    pub fn count(self, count: u8) -> Self {
        self.param("count", count.to_string())
    }

    pub fn param<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.pairs.push((name.into(), value.into()));
        self
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Names of the parameters, for logging without leaking the API key.
    pub fn names(&self) -> Vec<&str> {
        self.pairs.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}
