use crate::mutations::{MutationsBuilder, ResponseMutation};
use std::path::{Path, PathBuf};

/// Describes how a [`PlaybackServer`](crate::PlaybackServer) replays one markdown file.
#[derive(Debug)]
pub struct PlaybackConfiguration {
    markdown_path: PathBuf,
    rewritten_origins: Vec<String>,
    check_request_paths: bool,
    playback_response_mutations: Vec<ResponseMutation>,
}

impl PlaybackConfiguration {
    pub fn new<P: AsRef<Path>>(markdown_path: P) -> Self {
        Self {
            markdown_path: markdown_path.as_ref().to_path_buf(),
            rewritten_origins: Vec::new(),
            check_request_paths: true,
            playback_response_mutations: Vec::new(),
        }
    }

    pub fn markdown_path(&self) -> &Path {
        &self.markdown_path
    }

    /// Replace `origin` (e.g. `https://apod.nasa.gov`) with the playback server's own base URL
    /// in every replayed body, so that links found in responses are served by playback too.
    pub fn rewrite_origin<S: Into<String>>(&mut self, origin: S) {
        self.rewritten_origins.push(origin.into());
    }

    pub fn rewritten_origins(&self) -> &[String] {
        &self.rewritten_origins
    }

    /// When enabled (the default), each request's method and path must match the recorded
    /// interaction it is answered with. Query strings are never compared.
    pub fn set_check_request_paths(&mut self, value: bool) {
        self.check_request_paths = value;
    }

    pub fn check_request_paths(&self) -> bool {
        self.check_request_paths
    }

    pub fn add_playback_response_mutations<
        F: FnOnce(&mut MutationsBuilder) -> &mut MutationsBuilder,
    >(
        &mut self,
        func: F,
    ) {
        let mut mutations = MutationsBuilder::new();
        let _ = func(&mut mutations);
        self.playback_response_mutations
            .extend(mutations.into_response_mutations());
    }

    pub(crate) fn into_response_mutations(self) -> Vec<ResponseMutation> {
        self.playback_response_mutations
    }
}
