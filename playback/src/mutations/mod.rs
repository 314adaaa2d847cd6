mod body_replace_mutation;
mod remove_headers_mutation;

use crate::ResponseData;
use body_replace_mutation::{BodyReplaceMutation, BodyReplaceRegexMutation};
use regex::Regex;
use remove_headers_mutation::{RemoveHeadersMutation, RemoveHeadersRegexMutation};
use std::{collections::HashMap, fmt::Debug};

pub trait BodyMutation: Debug {
    fn mutate(&self, body: &mut String);
}

pub trait HeadersMutation: Debug {
    fn mutate(&self, headers: &mut HashMap<String, String>);
}

#[derive(Debug)]
enum MutationType {
    Body(Box<dyn BodyMutation + Send + Sync>),
    Headers(Box<dyn HeadersMutation + Send + Sync>),
}

/// A change applied to every recorded response before it is played back.
#[derive(Debug)]
pub struct ResponseMutation {
    mutation_type: MutationType,
}

impl ResponseMutation {
    fn from_mutation_type(mutation_type: MutationType) -> Self {
        Self { mutation_type }
    }

    pub(crate) fn body_replace<S1: Into<String>, S2: Into<String>>(
        text: S1,
        replacement: S2,
    ) -> Self {
        Self::from_mutation_type(MutationType::Body(Box::new(BodyReplaceMutation::new(
            text,
            replacement,
        ))))
    }

    pub fn mutate(&self, response_data: &mut ResponseData) {
        match &self.mutation_type {
            MutationType::Headers(hm) => {
                hm.mutate(&mut response_data.headers);
            }
            MutationType::Body(bm) => {
                bm.mutate(&mut response_data.body);
            }
        }
    }
}

pub struct MutationsBuilder {
    mutations: Vec<MutationType>,
}

impl MutationsBuilder {
    pub(crate) fn new() -> Self {
        Self {
            mutations: Vec::new(),
        }
    }

    pub fn remove_headers<S: Into<String>, I: IntoIterator<Item = S>>(
        &mut self,
        headers: I,
    ) -> &mut Self {
        self.add_headers_mutation(RemoveHeadersMutation::new(headers))
    }

    pub fn remove_headers_regex<I: IntoIterator<Item = Regex>>(
        &mut self,
        patterns: I,
    ) -> &mut Self {
        self.add_headers_mutation(RemoveHeadersRegexMutation::new(patterns))
    }

    pub fn body_replace<S1: Into<String>, S2: Into<String>>(
        &mut self,
        text: S1,
        replacement: S2,
    ) -> &mut Self {
        self.add_body_mutation(BodyReplaceMutation::new(text, replacement))
    }

    pub fn body_replace_regex<S: Into<String>>(
        &mut self,
        pattern: Regex,
        replacement: S,
    ) -> &mut Self {
        self.add_body_mutation(BodyReplaceRegexMutation::new(pattern, replacement))
    }

    pub fn add_headers_mutation<HM: HeadersMutation + Send + Sync + 'static>(
        &mut self,
        mutation: HM,
    ) -> &mut Self {
        self.mutations
            .push(MutationType::Headers(Box::new(mutation)));
        self
    }

    pub fn add_body_mutation<BM: BodyMutation + Send + Sync + 'static>(
        &mut self,
        mutation: BM,
    ) -> &mut Self {
        self.mutations.push(MutationType::Body(Box::new(mutation)));
        self
    }

    pub fn into_response_mutations(self) -> Vec<ResponseMutation> {
        self.mutations
            .into_iter()
            .map(ResponseMutation::from_mutation_type)
            .collect()
    }
}

impl Default for MutationsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
