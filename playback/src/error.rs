use crate::markdown::error::Error as MarkdownError;
use std::{fmt::Display, io, sync};

#[derive(Debug)]
pub enum Error {
    MarkdownParseError(MarkdownError),
    IoError(io::Error),
    PoisonedLock,
    InvalidHeaderName,
    InvalidHeaderValue,
    InvalidBody,
    InvalidStatusCode(u16),
    HyperError(hyper::Error),
    NoMoreInteractions(String),
    UnexpectedRequest {
        interaction_number: u8,
        expected: String,
        actual: String,
    },
    ServerThreadPanicked,
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MarkdownParseError(e) => write!(f, "Markdown parse error: {}", e),
            Error::IoError(e) => write!(f, "IoError: {}", e),
            Error::PoisonedLock => write!(f, "The lock was poisoned"),
            Error::InvalidHeaderName => write!(f, "Invalid header name"),
            Error::InvalidHeaderValue => write!(f, "Invalid header value"),
            Error::InvalidBody => write!(f, "Invalid body"),
            Error::InvalidStatusCode(code) => write!(f, "Invalid recorded status code {}", code),
            Error::HyperError(e) => write!(f, "Hyper error: {}", e),
            Error::NoMoreInteractions(request) => write!(
                f,
                "No recorded interaction is left to answer {}",
                request
            ),
            Error::UnexpectedRequest {
                interaction_number,
                expected,
                actual,
            } => write!(
                f,
                "Interaction {} expected {} but received {}",
                interaction_number, expected, actual
            ),
            Error::ServerThreadPanicked => write!(f, "The playback server thread panicked"),
        }
    }
}

impl From<MarkdownError> for Error {
    fn from(e: MarkdownError) -> Self {
        Error::MarkdownParseError(e)
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::IoError(e)
    }
}

impl<T> From<sync::PoisonError<T>> for Error {
    fn from(_: sync::PoisonError<T>) -> Self {
        Error::PoisonedLock
    }
}

impl From<hyper::header::InvalidHeaderName> for Error {
    fn from(_: hyper::header::InvalidHeaderName) -> Self {
        Error::InvalidHeaderName
    }
}

impl From<hyper::header::InvalidHeaderValue> for Error {
    fn from(_: hyper::header::InvalidHeaderValue) -> Self {
        Error::InvalidHeaderValue
    }
}

impl From<hyper::Error> for Error {
    fn from(e: hyper::Error) -> Self {
        Error::HyperError(e)
    }
}
