//! Network collaborators behind `wiki` and `joke`.
//!
//! The session never awaits a collaborator. It hands a [`Job`] to the
//! [`Dispatcher`], which runs the [`Service`] on a detached tokio task and
//! reports back through an unbounded channel: zero or more
//! [`Payload::Chunk`]s followed by exactly one [`Payload::Done`]. The shell
//! loop feeds those [`Completion`]s into `Session::apply`.

use crate::config::NetworkConfig;
use crate::error::{Result, ShellError};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

const WIKI_SERVICE: &str = "Wikipedia summary";
const JOKE_SERVICE: &str = "joke";

/// Identifies one collaborator call within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobId(pub u64);

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "job-{}", self.0)
    }
}

/// What a collaborator is asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Summary of a Wikipedia article.
    Wiki(String),
    /// A random dad joke.
    Joke,
}

impl Request {
    /// Name used in "Error fetching ..." messages.
    pub fn service_name(&self) -> &'static str {
        match self {
            Request::Wiki(_) => WIKI_SERVICE,
            Request::Joke => JOKE_SERVICE,
        }
    }

    /// Text shown in the transcript until the call settles.
    pub fn placeholder(&self) -> String {
        match self {
            Request::Wiki(term) => format!("Searching Wikipedia for: {term}"),
            Request::Joke => "Fetching a joke...".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: JobId,
    pub request: Request,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Incremental output; appended to the pending block.
    Chunk(String),
    /// Final result, or the error text to show.
    Done(std::result::Result<String, String>),
}

/// Event delivered back to the session for one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub job: JobId,
    pub payload: Payload,
}

/// Handle a running service uses to stream partial output.
#[derive(Debug, Clone)]
pub struct ChunkSink {
    job: JobId,
    tx: mpsc::UnboundedSender<Completion>,
}

impl ChunkSink {
    pub fn new(job: JobId, tx: mpsc::UnboundedSender<Completion>) -> Self {
        Self { job, tx }
    }

    /// Push a chunk. Returns false once the session has gone away.
    pub fn send(&self, chunk: impl Into<String>) -> bool {
        self.tx
            .send(Completion {
                job: self.job,
                payload: Payload::Chunk(chunk.into()),
            })
            .is_ok()
    }
}

/// An external capability invoked asynchronously.
#[async_trait]
pub trait Service: Send + Sync {
    /// Run `request`, optionally streaming chunks through `sink`, and return
    /// the complete rendered text.
    async fn invoke(&self, request: &Request, sink: ChunkSink) -> Result<String>;
}

/// Spawns service calls and routes their results to the session's queue.
#[derive(Clone)]
pub struct Dispatcher {
    service: Arc<dyn Service>,
    tx: mpsc::UnboundedSender<Completion>,
}

impl Dispatcher {
    pub fn new(service: Arc<dyn Service>, tx: mpsc::UnboundedSender<Completion>) -> Self {
        Self { service, tx }
    }

    /// A dispatcher plus the receiving end of its completion queue.
    pub fn channel(service: Arc<dyn Service>) -> (Self, mpsc::UnboundedReceiver<Completion>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(service, tx), rx)
    }

    /// Run `job` on a detached task. Must be called inside a tokio runtime.
    pub fn spawn(&self, job: Job) -> tokio::task::JoinHandle<()> {
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            debug!(job = %job.id, request = ?job.request, "Dispatching collaborator call");
            let sink = ChunkSink::new(job.id, tx.clone());
            let result = service
                .invoke(&job.request, sink)
                .await
                .map_err(|e| {
                    warn!(job = %job.id, error = %e, "Collaborator call failed");
                    e.to_string()
                });
            if tx
                .send(Completion {
                    job: job.id,
                    payload: Payload::Done(result),
                })
                .is_err()
            {
                debug!(job = %job.id, "Session gone, dropping completion");
            }
        })
    }
}

/// Wikipedia and icanhazdadjoke over HTTP.
pub struct HttpService {
    client: reqwest::Client,
    wiki_endpoint: String,
    joke_endpoint: String,
}

impl HttpService {
    pub fn new(config: &NetworkConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| {
                ShellError::collaborator("HTTP client", format!("failed to build: {}", e))
            })?;
        Ok(Self {
            client,
            wiki_endpoint: config.wiki_endpoint.clone(),
            joke_endpoint: config.joke_endpoint.clone(),
        })
    }

    async fn wiki(&self, term: &str) -> Result<String> {
        let service = WIKI_SERVICE;
        let url = wiki_url(&self.wiki_endpoint, term);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ShellError::collaborator(service, e))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ShellError::collaborator(
                service,
                format!("no article found for '{}'", term.trim()),
            ));
        }
        let response = response
            .error_for_status()
            .map_err(|e| ShellError::collaborator(service, e))?;
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ShellError::collaborator(service, format!("malformed response: {}", e)))?;
        parse_wiki(&body).map_err(|message| ShellError::collaborator(service, message))
    }

    async fn joke(&self) -> Result<String> {
        let service = JOKE_SERVICE;
        let response = self
            .client
            .get(&self.joke_endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| ShellError::collaborator(service, e))?;
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ShellError::collaborator(service, format!("malformed response: {}", e)))?;
        parse_joke(&body).map_err(|message| ShellError::collaborator(service, message))
    }
}

#[async_trait]
impl Service for HttpService {
    async fn invoke(&self, request: &Request, _sink: ChunkSink) -> Result<String> {
        match request {
            Request::Wiki(term) => self.wiki(term).await,
            Request::Joke => self.joke().await,
        }
    }
}

/// REST summary URL for `term`: spaces become underscores, the rest is
/// percent-encoded.
fn wiki_url(endpoint: &str, term: &str) -> String {
    let title = term.trim().replace(' ', "_");
    format!("{}{}", endpoint, urlencoding::encode(&title))
}

fn parse_wiki(body: &serde_json::Value) -> std::result::Result<String, String> {
    let extract = body
        .get("extract")
        .and_then(|v| v.as_str())
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| "response has no summary text".to_string())?;
    match body.get("title").and_then(|v| v.as_str()) {
        Some(title) => Ok(format!("{}\n\n{}", title, extract)),
        None => Ok(extract.to_string()),
    }
}

fn parse_joke(body: &serde_json::Value) -> std::result::Result<String, String> {
    body.get("joke")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| "response has no joke".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Scripted {
        chunks: Vec<&'static str>,
        result: std::result::Result<&'static str, &'static str>,
    }

    #[async_trait]
    impl Service for Scripted {
        async fn invoke(&self, request: &Request, sink: ChunkSink) -> Result<String> {
            for chunk in &self.chunks {
                sink.send(*chunk);
            }
            self.result
                .map(str::to_string)
                .map_err(|m| ShellError::collaborator(request.service_name(), m))
        }
    }

    #[tokio::test]
    async fn test_dispatcher_delivers_chunks_then_done() {
        let service = Arc::new(Scripted {
            chunks: vec!["Rust ", "is fast"],
            result: Ok("Rust is fast"),
        });
        let (dispatcher, mut rx) = Dispatcher::channel(service);
        dispatcher
            .spawn(Job {
                id: JobId(1),
                request: Request::Wiki("rust".into()),
            })
            .await
            .unwrap();

        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        assert_eq!(
            events,
            vec![
                Completion {
                    job: JobId(1),
                    payload: Payload::Chunk("Rust ".into()),
                },
                Completion {
                    job: JobId(1),
                    payload: Payload::Chunk("is fast".into()),
                },
                Completion {
                    job: JobId(1),
                    payload: Payload::Done(Ok("Rust is fast".into())),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_dispatcher_reports_error_text() {
        let service = Arc::new(Scripted {
            chunks: vec![],
            result: Err("connection refused"),
        });
        let (dispatcher, mut rx) = Dispatcher::channel(service);
        dispatcher
            .spawn(Job {
                id: JobId(9),
                request: Request::Joke,
            })
            .await
            .unwrap();

        let event = rx.recv().await.unwrap();
        assert_eq!(
            event.payload,
            Payload::Done(Err("Error fetching joke: connection refused".into()))
        );
    }

    #[tokio::test]
    async fn test_dispatcher_survives_dropped_receiver() {
        let service = Arc::new(Scripted {
            chunks: vec!["late"],
            result: Ok("late"),
        });
        let (dispatcher, rx) = Dispatcher::channel(service);
        drop(rx);
        let handle = dispatcher.spawn(Job {
            id: JobId(2),
            request: Request::Joke,
        });
        assert!(handle.await.is_ok());
    }

    #[test]
    fn test_wiki_url_encoding() {
        assert_eq!(
            wiki_url("https://w/summary/", "  rust lang "),
            "https://w/summary/rust_lang"
        );
        assert_eq!(wiki_url("https://w/", "C++"), "https://w/C%2B%2B");
    }

    #[test]
    fn test_parse_wiki() {
        let body = json!({"title": "Rust", "extract": "Rust is a language."});
        assert_eq!(parse_wiki(&body).unwrap(), "Rust\n\nRust is a language.");
        assert!(parse_wiki(&json!({"title": "x", "extract": ""})).is_err());
        assert!(parse_wiki(&json!({"type": "not_found"})).is_err());
    }

    #[test]
    fn test_parse_joke() {
        let body = json!({
            "id": "a1",
            "joke": "I'm reading a book on anti-gravity.",
            "status": 200
        });
        assert_eq!(
            parse_joke(&body).unwrap(),
            "I'm reading a book on anti-gravity."
        );
        assert!(parse_joke(&json!({"status": 500})).is_err());
    }

    #[test]
    fn test_request_placeholder() {
        assert_eq!(
            Request::Wiki("golang".into()).placeholder(),
            "Searching Wikipedia for: golang"
        );
        assert_eq!(Request::Joke.service_name(), "joke");
    }

    #[test]
    fn test_http_service_builds_from_config() {
        assert!(HttpService::new(&NetworkConfig::default()).is_ok());
    }
}
