use crate::users::models::Record;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/users";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server responded with HTTP {0}")]
    Status(u16),

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Could not start fetch worker: {0}")]
    Spawn(String),

    #[error("Fetch worker exited without a result")]
    Disconnected,
}

/// Where the record collection comes from. The view only ever asks for the
/// whole collection, once per load.
pub trait UserSource: Send + Sync {
    fn fetch_users(&self) -> Result<Vec<Record>, FetchError>;

    fn describe(&self) -> String;
}

pub struct HttpUserSource {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl HttpUserSource {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("userlist/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }
}

impl UserSource for HttpUserSource {
    fn fetch_users(&self) -> Result<Vec<Record>, FetchError> {
        let response = self.client.get(&self.endpoint).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text()?;
        parse_users(&body)
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}

/// Decodes a JSON array of user objects.
pub fn parse_users(body: &str) -> Result<Vec<Record>, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))
}

/// A single in-flight fetch running on a worker thread. Dropping the handle
/// abandons the result: the worker's send fails and is discarded.
pub struct FetchHandle {
    rx: Receiver<Result<Vec<Record>, FetchError>>,
}

impl FetchHandle {
    pub fn spawn(source: Arc<dyn UserSource>) -> Result<Self, FetchError> {
        let (tx, rx) = mpsc::channel();

        thread::Builder::new()
            .name("user-fetch".to_string())
            .spawn(move || {
                let result = source.fetch_users();
                let _ = tx.send(result);
            })
            .map_err(|e| FetchError::Spawn(e.to_string()))?;

        Ok(Self { rx })
    }

    /// Non-blocking check for the result.
    pub fn poll(&self) -> Option<Result<Vec<Record>, FetchError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(FetchError::Disconnected)),
        }
    }
}
