use super::HeadersMutation;
use regex::Regex;
use std::collections::HashMap;

#[derive(Debug)]
pub struct RemoveHeadersMutation {
    headers: Vec<String>,
}

impl RemoveHeadersMutation {
    pub fn new<S: Into<String>, I: IntoIterator<Item = S>>(headers: I) -> Self {
        Self {
            headers: headers
                .into_iter()
                .map(|e| e.into().to_lowercase())
                .collect(),
        }
    }
}

impl HeadersMutation for RemoveHeadersMutation {
    fn mutate(&self, headers: &mut HashMap<String, String>) {
        // recorded header names keep whatever case the markdown file used
        headers.retain(|name, _| !self.headers.contains(&name.to_lowercase()));
    }
}

#[derive(Debug)]
pub struct RemoveHeadersRegexMutation {
    patterns: Vec<Regex>,
}

impl RemoveHeadersRegexMutation {
    pub fn new<I: IntoIterator<Item = Regex>>(patterns: I) -> Self {
        Self {
            patterns: patterns.into_iter().collect(),
        }
    }
}

impl HeadersMutation for RemoveHeadersRegexMutation {
    fn mutate(&self, headers: &mut HashMap<String, String>) {
        headers.retain(|name, _| !self.patterns.iter().any(|pattern| pattern.is_match(name)));
    }
}
