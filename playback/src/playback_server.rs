use crate::{
    error::Error, markdown, mutations::ResponseMutation, util, InteractionData,
    PlaybackConfiguration, RequestData, ResponseData,
};
use futures::channel::oneshot;
use hyper::{
    body,
    service::{make_service_fn, service_fn},
    Body, HeaderMap, Request, Response, Server, StatusCode,
};
use std::{
    convert::Infallible,
    net::{SocketAddr, TcpListener},
    sync::{Arc, Mutex},
    thread::{self, JoinHandle},
};
use tokio::runtime::Runtime;
use tracing::{debug, error, warn};

#[derive(Debug)]
struct PlaybackState {
    interactions: Vec<InteractionData>,
    next_interaction: usize,
    check_request_paths: bool,
    response_mutations: Vec<ResponseMutation>,
    error: Option<Error>,
}

impl PlaybackState {
    fn play(&mut self, request_data: &RequestData) -> Result<ResponseData, Error> {
        let interaction = self
            .interactions
            .get(self.next_interaction)
            .ok_or_else(|| Error::NoMoreInteractions(describe_request(request_data)))?;
        self.next_interaction += 1;

        let recorded = &interaction.request_data;
        if self.check_request_paths
            && (recorded.method != request_data.method || recorded.path() != request_data.path())
        {
            return Err(Error::UnexpectedRequest {
                interaction_number: interaction.interaction_number,
                expected: format!("{} {}", recorded.method, recorded.path()),
                actual: format!("{} {}", request_data.method, request_data.path()),
            });
        }

        let mut response_data = interaction.response_data.clone();
        for mutation in &self.response_mutations {
            mutation.mutate(&mut response_data);
        }

        Ok(response_data)
    }

    fn keep_first_error(&mut self, error: Error) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }
}

/// A local HTTP server answering requests with interactions recorded in a markdown file.
///
/// Every server binds its own ephemeral port on 127.0.0.1, so playback tests can run in
/// parallel. Interactions are replayed in the order they were recorded; a request that can't be
/// answered gets a 500 response and the error is reported by [`PlaybackServer::finish`].
#[derive(Debug)]
pub struct PlaybackServer {
    base_url: String,
    state: Arc<Mutex<PlaybackState>>,
    shutdown_sender: Option<oneshot::Sender<()>>,
    join_handle: Option<JoinHandle<()>>,
}

impl PlaybackServer {
    pub fn start(configuration: PlaybackConfiguration) -> Result<Self, Error> {
        let interactions = markdown::load_markdown(configuration.markdown_path())?;

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))?;
        listener.set_nonblocking(true)?;
        let base_url = format!("http://{}", listener.local_addr()?);

        let mut response_mutations: Vec<ResponseMutation> = configuration
            .rewritten_origins()
            .iter()
            .map(|origin| ResponseMutation::body_replace(origin.as_str(), base_url.as_str()))
            .collect();
        let check_request_paths = configuration.check_request_paths();
        response_mutations.extend(configuration.into_response_mutations());

        debug!(
            %base_url,
            interactions = interactions.len(),
            "Starting playback server"
        );

        let state = Arc::new(Mutex::new(PlaybackState {
            interactions,
            next_interaction: 0,
            check_request_paths,
            response_mutations,
            error: None,
        }));

        let runtime = Runtime::new()?;
        let (shutdown_sender, shutdown_receiver) = oneshot::channel::<()>();
        let server_state = Arc::clone(&state);
        let join_handle = thread::Builder::new()
            .name(String::from("apod-playback"))
            .spawn(move || {
                runtime.block_on(serve(listener, server_state, shutdown_receiver));
            })?;

        Ok(Self {
            base_url,
            state,
            shutdown_sender: Some(shutdown_sender),
            join_handle: Some(join_handle),
        })
    }

    /// `http://127.0.0.1:<port>`, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Stops the server and reports the first error met while answering requests.
    pub fn finish(mut self) -> Result<(), Error> {
        self.shutdown()?;

        let error = self.state.lock()?.error.take();
        match error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn shutdown(&mut self) -> Result<(), Error> {
        if let Some(shutdown_sender) = self.shutdown_sender.take() {
            // the receiver is gone when the server already stopped on its own
            let _ = shutdown_sender.send(());
        }

        if let Some(join_handle) = self.join_handle.take() {
            join_handle
                .join()
                .map_err(|_| Error::ServerThreadPanicked)?;
        }

        Ok(())
    }
}

impl Drop for PlaybackServer {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            error!(error = %e, "Couldn't gracefully shut down the playback server");
        }
    }
}

async fn serve(
    listener: TcpListener,
    state: Arc<Mutex<PlaybackState>>,
    shutdown_receiver: oneshot::Receiver<()>,
) {
    let service_state = Arc::clone(&state);
    let make_service = make_service_fn(move |_| {
        let state = Arc::clone(&service_state);
        async move {
            Ok::<_, Infallible>(service_fn(move |request| {
                handle_request(Arc::clone(&state), request)
            }))
        }
    });

    let server = match Server::from_tcp(listener) {
        Ok(builder) => builder.serve(make_service),
        Err(e) => {
            error!(error = %e, "Playback server couldn't listen");
            if let Ok(mut state) = state.lock() {
                state.keep_first_error(e.into());
            }
            return;
        }
    };

    let graceful = server.with_graceful_shutdown(async {
        let _ = shutdown_receiver.await;
    });

    if let Err(e) = graceful.await {
        error!(error = %e, "Playback server error");
    }
}

async fn handle_request(
    state: Arc<Mutex<PlaybackState>>,
    request: Request<Body>,
) -> Result<Response<Body>, Infallible> {
    let result = match read_request_data(request).await {
        Ok(request_data) => replay(&state, &request_data),
        Err(e) => Err(e),
    };

    match result {
        Ok(response) => Ok(response),
        Err(error) => {
            warn!(%error, "Playback couldn't answer a request");
            if let Ok(mut state) = state.lock() {
                state.keep_first_error(error);
            }

            let mut response = Response::new(Body::empty());
            *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            Ok(response)
        }
    }
}

fn replay(
    state: &Mutex<PlaybackState>,
    request_data: &RequestData,
) -> Result<Response<Body>, Error> {
    let response_data = state.lock()?.play(request_data)?;

    debug!(
        request = %describe_request(request_data),
        status = response_data.status_code,
        "Replaying recorded interaction"
    );

    let status = StatusCode::from_u16(response_data.status_code)
        .map_err(|_| Error::InvalidStatusCode(response_data.status_code))?;
    let mut headers = HeaderMap::new();
    util::put_replayed_headers(&mut headers, &response_data.headers)?;

    let mut response = Response::new(Body::from(response_data.body));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}

async fn read_request_data(request: Request<Body>) -> Result<RequestData, Error> {
    let method = request.method().to_string();
    let uri = request.uri().to_string();
    let headers = util::extract_headers(request.headers());

    let body = body::to_bytes(request.into_body())
        .await
        .map_err(|_| Error::InvalidBody)?;

    Ok(RequestData {
        method,
        uri,
        headers,
        body: String::from_utf8_lossy(&body).into(),
    })
}

fn describe_request(request_data: &RequestData) -> String {
    format!("{} {}", request_data.method, request_data.path())
}
