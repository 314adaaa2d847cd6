use std::fmt::Display;

#[derive(Debug)]
pub enum Error {
    NotConfigured(&'static str),
    InvalidSetting(&'static str, String),
    MissingField(String),
    UnexpectedFieldType(String, &'static str),
    ExpectationFailed { check: &'static str, detail: String },
    DeserializationError(serde_json::Error),
    ReqwestError(reqwest::Error),
}

impl std::error::Error for Error {}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::ReqwestError(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::DeserializationError(e)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::NotConfigured(variable) => {
                write!(f, "{} must be set before the suite can run", variable)
            }
            Error::InvalidSetting(variable, value) => {
                write!(f, "{} has an invalid value: {:?}", variable, value)
            }
            Error::MissingField(pointer) => write!(f, "Response has no field {}", pointer),
            Error::UnexpectedFieldType(pointer, expected) => {
                write!(f, "Response field {} is not {}", pointer, expected)
            }
            Error::ExpectationFailed { check, detail } => {
                write!(f, "{} failed: {}", check, detail)
            }
            Error::ReqwestError(e) => write!(f, "{}", e),
            Error::DeserializationError(e) => write!(f, "{}", e),
        }
    }
}
