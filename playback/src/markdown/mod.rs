pub mod error;

use crate::{InteractionData, RequestData, ResponseData};
use error::Error;
use lazy_static::lazy_static;
use regex::Regex;
use std::{collections::HashMap, fs, path::Path};

lazy_static! {
    static ref HEADER_REGEX: Regex =
        Regex::new(r"(?m)^(?P<header_key>[a-zA-Z0-9\-]+): (?P<header_value>.*?)\r?$").unwrap();
    static ref MARKDOWN_REGEX: Regex = Regex::new(concat!(
        r"(?ms)",
        r"\#\# Interaction (?P<interaction_number>[0-9]+): (?P<http_method>[A-Z]+) (?P<uri>\S*)\s*",
        r"\#\#\# Request headers recorded for playback.*?",
        r"```\s*(?P<request_headers_part>.*?)\s*```.*?",
        r"\#\#\# Request body recorded for playback.*?",
        r"```\s*(?P<request_body_part>.*?)\s*```.*?",
        r"\#\#\# Response headers recorded for playback.*?",
        r"```\s*(?P<response_headers_part>.*?)\s*```.*?",
        r"\#\#\# Response body recorded for playback \((?P<status_code>[0-9]+)[^)]*\).*?",
        r"```\s*(?P<response_body_part>.*?)\s*```",
    ))
    .unwrap();
}

/// Reads every interaction recorded in the markdown file at `filename`.
pub fn load_markdown<P: AsRef<Path>>(filename: P) -> Result<Vec<InteractionData>, Error> {
    let file_contents = fs::read_to_string(filename)?;

    parse_markdown(&file_contents)
}

/// Parses recorded interactions in file order. A document without a single interaction is
/// rejected.
pub fn parse_markdown(contents: &str) -> Result<Vec<InteractionData>, Error> {
    let mut data = Vec::new();

    for captures in MARKDOWN_REGEX.captures_iter(contents) {
        let interaction_number = captures["interaction_number"]
            .parse()
            .map_err(|_| Error::InvalidInteractionNumber)?;
        let status_code = captures["status_code"]
            .parse()
            .map_err(|_| Error::InvalidStatusCode)?;

        data.push(InteractionData {
            interaction_number,
            request_data: RequestData {
                uri: captures["uri"].into(),
                method: captures["http_method"].into(),
                headers: parse_headers(&captures["request_headers_part"]),
                body: captures["request_body_part"].into(),
            },
            response_data: ResponseData {
                status_code,
                headers: parse_headers(&captures["response_headers_part"]),
                body: captures["response_body_part"].into(),
            },
        });
    }

    if data.is_empty() {
        Err(Error::InvalidMarkdownFormat)
    } else {
        Ok(data)
    }
}

fn parse_headers<T: AsRef<str>>(headers_part: T) -> HashMap<String, String> {
    let mut headers = HashMap::new();

    for capture in HEADER_REGEX.captures_iter(headers_part.as_ref()) {
        headers.insert(
            String::from(capture["header_key"].trim()),
            String::from(capture["header_value"].trim()),
        );
    }

    headers
}
