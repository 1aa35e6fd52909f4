use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{ApiError, FileItem, LinkOutcome, ResolveOutcome};

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// The two backend operations. Object-safe so shells and tests can swap in
/// doubles for the HTTP implementation.
#[async_trait::async_trait]
pub trait FileApi: Send + Sync {
    /// Resolves one submitted URL into zero or more items.
    ///
    /// Never panics and never propagates transport errors: every failure
    /// path is folded into [`ResolveOutcome::Failed`].
    async fn resolve(&self, url: &str) -> ResolveOutcome;

    /// Requests a time-limited direct link for one previously resolved item.
    async fn link(&self, domain: &str, id: &str) -> LinkOutcome;
}

#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    settings: ApiSettings,
}

impl HttpApi {
    /// Builds the client with the shared timeout policy.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Build`] when reqwest client construction fails.
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::Build(err.to_string()))?;
        Ok(Self { client, settings })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.settings.base_url.trim_end_matches('/'), path)
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + Sync,
        R: for<'de> Deserialize<'de>,
    {
        let response = self
            .client
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        response
            .json::<R>()
            .await
            .map_err(|err| ApiError::Protocol(err.to_string()))
    }
}

#[derive(Serialize)]
struct ResolveRequest<'a> {
    url: &'a str,
}

#[derive(Serialize)]
struct LinkRequest<'a> {
    domain: &'a str,
    id: &'a str,
}

// Failure bodies from the backend still carry `file: []` / `link: ""`, so
// both payload fields default rather than fail the decode.
#[derive(Deserialize)]
struct ResolveEnvelope {
    status: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    file: Vec<FileItem>,
}

#[derive(Deserialize)]
struct LinkEnvelope {
    status: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    link: String,
}

#[async_trait::async_trait]
impl FileApi for HttpApi {
    async fn resolve(&self, url: &str) -> ResolveOutcome {
        let url = url.trim();
        if url.is_empty() {
            return ResolveOutcome::Failed("empty url".to_string());
        }

        let envelope: ResolveEnvelope = match self
            .post_json("generate_file", &ResolveRequest { url })
            .await
        {
            Ok(envelope) => envelope,
            Err(err) => return ResolveOutcome::Failed(err.to_string()),
        };

        if envelope.status != "success" {
            return ResolveOutcome::Failed(failure_message(envelope.message));
        }

        // Placeholder rows without an id cannot be acted on; drop them here.
        let items: Vec<FileItem> = envelope
            .file
            .into_iter()
            .filter(|item| !item.id.is_empty())
            .collect();
        if items.is_empty() {
            ResolveOutcome::Empty
        } else {
            ResolveOutcome::Resolved(items)
        }
    }

    async fn link(&self, domain: &str, id: &str) -> LinkOutcome {
        if domain.trim().is_empty() || id.trim().is_empty() {
            return LinkOutcome::Failed("missing domain or id".to_string());
        }

        let envelope: LinkEnvelope = match self
            .post_json("generate_link", &LinkRequest { domain, id })
            .await
        {
            Ok(envelope) => envelope,
            Err(err) => return LinkOutcome::Failed(err.to_string()),
        };

        if envelope.status == "success" && !envelope.link.is_empty() {
            LinkOutcome::Issued(envelope.link)
        } else {
            LinkOutcome::Failed(failure_message(envelope.message))
        }
    }
}

fn failure_message(message: String) -> String {
    if message.is_empty() {
        "backend reported failure".to_string()
    } else {
        message
    }
}
