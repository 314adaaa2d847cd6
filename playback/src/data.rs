use std::collections::HashMap;

/// A single recorded request/response pair.
#[derive(Debug, Clone)]
pub struct InteractionData {
    pub interaction_number: u8,
    pub request_data: RequestData,
    pub response_data: ResponseData,
}

#[derive(Debug, Clone)]
pub struct RequestData {
    pub uri: String,
    pub method: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl RequestData {
    /// The URI without its query string.
    pub fn path(&self) -> &str {
        self.uri.split('?').next().unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct ResponseData {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}
