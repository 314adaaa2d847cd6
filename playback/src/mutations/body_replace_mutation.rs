use super::BodyMutation;
use regex::Regex;

/// Replaces every occurrence of a literal text in a replayed body.
#[derive(Debug)]
pub struct BodyReplaceMutation {
    text: String,
    substitution: String,
}

impl BodyReplaceMutation {
    pub fn new<S1: Into<String>, S2: Into<String>>(text: S1, substitution: S2) -> Self {
        BodyReplaceMutation {
            text: text.into(),
            substitution: substitution.into(),
        }
    }
}

impl BodyMutation for BodyReplaceMutation {
    fn mutate(&self, body: &mut String) {
        if !self.text.is_empty() && body.contains(&self.text) {
            *body = body.replace(&self.text, &self.substitution);
        }
    }
}

/// Replaces every match of a pattern in a replayed body. The substitution may refer to capture
/// groups (`$1`, `$name`).
#[derive(Debug)]
pub struct BodyReplaceRegexMutation {
    pattern: Regex,
    substitution: String,
}

impl BodyReplaceRegexMutation {
    pub fn new<S: Into<String>>(pattern: Regex, substitution: S) -> Self {
        BodyReplaceRegexMutation {
            pattern,
            substitution: substitution.into(),
        }
    }
}

impl BodyMutation for BodyReplaceRegexMutation {
    fn mutate(&self, body: &mut String) {
        *body = self
            .pattern
            .replace_all(body, self.substitution.as_str())
            .into();
    }
}
