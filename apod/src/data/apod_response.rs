use crate::{
    data::picture_of_the_day::PictureOfTheDay,
    error::Error,
};
use serde_json::Value;

/// Status code and untyped JSON body of one call to the APOD endpoint.
#[derive(Debug, Clone)]
pub struct ApodResponse {
    pub status_code: u16,
    pub body: Value,
}

impl ApodResponse {
    /// Looks a field up by JSON pointer, e.g. `/error/code`.
    pub fn field(&self, pointer: &str) -> Result<&Value, Error> {
        self.body
            .pointer(pointer)
            .ok_or_else(|| Error::MissingField(String::from(pointer)))
    }

    pub fn str_field(&self, pointer: &str) -> Result<&str, Error> {
        self.field(pointer)?
            .as_str()
            .ok_or_else(|| Error::UnexpectedFieldType(String::from(pointer), "a string"))
    }

    /// Length of the whole body: entries of an array, keys of an object, characters of a string.
    pub fn body_len(&self) -> Result<usize, Error> {
        match &self.body {
            Value::Array(values) => Ok(values.len()),
            Value::Object(fields) => Ok(fields.len()),
            Value::String(text) => Ok(text.chars().count()),
            _ => Err(Error::UnexpectedFieldType(
                String::new(),
                "an array, an object or a string",
            )),
        }
    }

    pub fn picture(&self) -> Result<PictureOfTheDay, Error> {
        Ok(serde_json::from_value(self.body.clone())?)
    }

    pub fn pictures(&self) -> Result<Vec<PictureOfTheDay>, Error> {
        Ok(serde_json::from_value(self.body.clone())?)
    }
}
