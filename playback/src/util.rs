use crate::error::Error;
use hyper::{
    header::{HeaderName, HeaderValue},
    HeaderMap,
};
use std::collections::HashMap;

// Framing of a replayed body is decided by hyper; a recorded length would be wrong as soon as a
// mutation touches the body.
const FRAMING_HEADERS: [&str; 2] = ["content-length", "transfer-encoding"];

pub fn extract_headers(header_map: &HeaderMap) -> HashMap<String, String> {
    // it currently ignores header values with opaque characters
    header_map
        .iter()
        .map(|(k, v)| (String::from(k.as_str()), v.to_str()))
        .filter_map(|(key, value)| value.ok().map(|v| (key, String::from(v))))
        .collect::<HashMap<_, _>>()
}

pub fn put_replayed_headers<'a, I: IntoIterator<Item = (&'a String, &'a String)>>(
    header_map: &mut HeaderMap<HeaderValue>,
    headers: I,
) -> Result<(), Error> {
    for (key, value) in headers {
        let key = key.to_lowercase();
        if FRAMING_HEADERS.contains(&key.as_str()) {
            continue;
        }

        let header_name = HeaderName::from_lowercase(key.as_bytes())?;
        let header_value = HeaderValue::from_str(value)?;
        header_map.append(header_name, header_value);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::put_replayed_headers;
    use hyper::HeaderMap;
    use std::collections::HashMap;

    #[test]
    fn framing_headers_are_not_replayed() {
        let mut recorded = HashMap::new();
        recorded.insert(String::from("Content-Type"), String::from("application/json"));
        recorded.insert(String::from("Content-Length"), String::from("1024"));
        recorded.insert(String::from("Transfer-Encoding"), String::from("chunked"));

        let mut header_map = HeaderMap::new();
        put_replayed_headers(&mut header_map, &recorded).unwrap();

        assert_eq!(header_map.len(), 1);
        assert_eq!(header_map["content-type"], "application/json");
    }
}
