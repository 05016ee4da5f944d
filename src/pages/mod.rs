//! GitHub Pages source configuration.
//!
//! Points the Pages site of a repository at a branch and folder. The first
//! attempt creates the Pages site with that source; if it fails (most often
//! because Pages is already enabled) one fallback call updates the existing
//! source instead. When both fail the caller gets both errors.

pub mod cli;

use std::fmt;
use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, Method, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};
use url::Url;

pub use cli::{RunOutcome, SetPagesArgs, run};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const API_VERSION: &str = "2022-11-28";
const GITHUB_JSON: &str = "application/vnd.github+json";

/// Which call of the two-step configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagesOperation {
    /// `POST /repos/{owner}/{repo}/pages`
    Create,
    /// `PUT /repos/{owner}/{repo}/pages`
    Update,
}

impl PagesOperation {
    fn method(self) -> Method {
        match self {
            Self::Create => Method::POST,
            Self::Update => Method::PUT,
        }
    }
}

impl fmt::Display for PagesOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "POST create pages source"),
            Self::Update => write!(f, "PUT update pages source"),
        }
    }
}

#[derive(Debug, Error)]
pub enum PagesError {
    #[error("invalid API URL '{url}': {reason}")]
    InvalidApiUrl { url: String, reason: String },

    #[error("invalid repository '{owner}/{repo}'")]
    InvalidRepository { owner: String, repo: String },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("{operation} failed: {source}")]
    Request {
        operation: PagesOperation,
        #[source]
        source: reqwest::Error,
    },

    #[error("{operation} returned {status}: {message}")]
    Status {
        operation: PagesOperation,
        status: StatusCode,
        message: String,
    },

    #[error("{primary}; fallback: {fallback}")]
    BothFailed {
        primary: Box<PagesError>,
        fallback: Box<PagesError>,
    },
}

/// Branch and folder GitHub Pages serves from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PagesSource {
    pub branch: String,
    pub path: String,
}

impl Default for PagesSource {
    fn default() -> Self {
        Self {
            branch: "gh-pages".to_string(),
            path: "/".to_string(),
        }
    }
}

impl fmt::Display for PagesSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path == "/" {
            write!(f, "{} (root)", self.branch)
        } else {
            write!(f, "{} ({})", self.branch, self.path)
        }
    }
}

/// Which attempt succeeded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagesOutcome {
    Primary,
    Fallback,
}

#[derive(Serialize)]
struct PagesRequest<'a> {
    source: &'a PagesSource,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Minimal client for the Pages endpoints of the GitHub REST API
pub struct GitHubPagesClient {
    client: Client,
    api_url: Url,
    token: String,
}

impl GitHubPagesClient {
    pub fn new(api_url: &str, token: impl Into<String>) -> Result<Self, PagesError> {
        let parsed = Url::parse(api_url).map_err(|e| PagesError::InvalidApiUrl {
            url: api_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(PagesError::InvalidApiUrl {
                url: api_url.to_string(),
                reason: "not a base URL".to_string(),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self {
            client,
            api_url: parsed,
            token: token.into(),
        })
    }

    /// `{api}/repos/{owner}/{repo}/pages` with each name as one escaped segment
    fn pages_url(&self, owner: &str, repo: &str) -> Result<Url, PagesError> {
        // Url drops dot segments instead of escaping them
        let is_segment = |name: &str| !matches!(name, "" | "." | "..");
        if !is_segment(owner) || !is_segment(repo) {
            return Err(PagesError::InvalidRepository {
                owner: owner.to_string(),
                repo: repo.to_string(),
            });
        }

        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|()| PagesError::InvalidApiUrl {
                url: self.api_url.to_string(),
                reason: "not a base URL".to_string(),
            })?
            .pop_if_empty()
            .extend(["repos", owner, repo, "pages"]);
        Ok(url)
    }

    pub async fn create_pages_source(
        &self,
        owner: &str,
        repo: &str,
        source: &PagesSource,
    ) -> Result<(), PagesError> {
        self.send(PagesOperation::Create, owner, repo, source).await
    }

    pub async fn update_pages_source(
        &self,
        owner: &str,
        repo: &str,
        source: &PagesSource,
    ) -> Result<(), PagesError> {
        self.send(PagesOperation::Update, owner, repo, source).await
    }

    /// Create, falling back to update exactly once.
    pub async fn configure(
        &self,
        owner: &str,
        repo: &str,
        source: &PagesSource,
    ) -> Result<PagesOutcome, PagesError> {
        // A bad name would fail both calls the same way
        self.pages_url(owner, repo)?;

        let primary = match self.create_pages_source(owner, repo, source).await {
            Ok(()) => {
                info!(owner, repo, source = %source, "Pages source created");
                return Ok(PagesOutcome::Primary);
            }
            Err(e) => e,
        };

        warn!(error = %primary, "Creating pages source failed, trying update");

        match self.update_pages_source(owner, repo, source).await {
            Ok(()) => {
                info!(owner, repo, source = %source, "Pages source updated");
                Ok(PagesOutcome::Fallback)
            }
            Err(fallback) => Err(PagesError::BothFailed {
                primary: Box::new(primary),
                fallback: Box::new(fallback),
            }),
        }
    }

    async fn send(
        &self,
        operation: PagesOperation,
        owner: &str,
        repo: &str,
        source: &PagesSource,
    ) -> Result<(), PagesError> {
        let url = self.pages_url(owner, repo)?;
        let response = self
            .client
            .request(operation.method(), url)
            .bearer_auth(&self.token)
            .header(ACCEPT, GITHUB_JSON)
            .header("X-GitHub-Api-Version", API_VERSION)
            .json(&PagesRequest { source })
            .send()
            .await
            .map_err(|source| PagesError::Request { operation, source })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ApiErrorBody>(&body) {
            Ok(parsed) => parsed.message,
            Err(_) if body.trim().is_empty() => "no response body".to_string(),
            Err(_) => body,
        };

        Err(PagesError::Status {
            operation,
            status,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn bad_credentials() -> ResponseTemplate {
        ResponseTemplate::new(401).set_body_json(json!({
            "message": "Bad credentials",
            "documentation_url": "https://docs.github.com/rest"
        }))
    }

    #[tokio::test]
    async fn test_primary_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/repos/octo/site/pages"))
            .and(header("authorization", "Bearer secret"))
            .and(header("accept", GITHUB_JSON))
            .and(header("x-github-api-version", API_VERSION))
            .and(body_json(json!({ "source": { "branch": "gh-pages", "path": "/" } })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = GitHubPagesClient::new(&mock_server.uri(), "secret").unwrap();
        let outcome = client
            .configure("octo", "site", &PagesSource::default())
            .await
            .unwrap();

        assert_eq!(outcome, PagesOutcome::Primary);
    }

    #[tokio::test]
    async fn test_fallback_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/repos/octo/site/pages"))
            .respond_with(
                ResponseTemplate::new(409)
                    .set_body_json(json!({ "message": "GitHub Pages is already enabled." })),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/repos/octo/site/pages"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = GitHubPagesClient::new(&mock_server.uri(), "secret").unwrap();
        let outcome = client
            .configure("octo", "site", &PagesSource::default())
            .await
            .unwrap();

        assert_eq!(outcome, PagesOutcome::Fallback);
    }

    #[tokio::test]
    async fn test_both_attempts_fail() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(bad_credentials())
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("PUT"))
            .respond_with(bad_credentials())
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = GitHubPagesClient::new(&mock_server.uri(), "invalid").unwrap();
        let err = client
            .configure("octo", "site", &PagesSource::default())
            .await
            .unwrap_err();

        let (primary, fallback) = match err {
            PagesError::BothFailed { primary, fallback } => (primary, fallback),
            other => panic!("expected BothFailed, got {other:?}"),
        };
        let primary = primary.to_string();
        let fallback = fallback.to_string();
        assert_ne!(primary, fallback);
        assert!(primary.contains("POST") && primary.contains("Bad credentials"));
        assert!(fallback.contains("PUT") && fallback.contains("Bad credentials"));
    }

    #[tokio::test]
    async fn test_plain_text_error_body_kept() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(502).set_body_string("upstream down"))
            .mount(&mock_server)
            .await;

        let client = GitHubPagesClient::new(&mock_server.uri(), "t").unwrap();
        let err = client
            .update_pages_source("o", "r", &PagesSource::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PagesError::Status { status, ref message, .. }
                if status == StatusCode::BAD_GATEWAY && message == "upstream down"
        ));
    }

    #[tokio::test]
    async fn test_trailing_slash_in_api_url() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/repos/o/r/pages"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = GitHubPagesClient::new(&format!("{}/", mock_server.uri()), "t").unwrap();
        client
            .create_pages_source("o", "r", &PagesSource::default())
            .await
            .unwrap();
    }

    #[test]
    fn test_invalid_api_url() {
        let err = GitHubPagesClient::new("not a url", "t")
            .err()
            .expect("URL must be rejected");
        assert!(matches!(err, PagesError::InvalidApiUrl { .. }));
    }

    #[test]
    fn test_repository_names_are_single_segments() {
        let client = GitHubPagesClient::new("https://api.example.com/v3/", "t").unwrap();

        let url = client.pages_url("octo", "site").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v3/repos/octo/site/pages");

        let url = client.pages_url("octo", "a/b?x#y").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/v3/repos/octo/a%2Fb%3Fx%23y/pages"
        );
    }

    #[test]
    fn test_dot_repository_names_rejected() {
        let client = GitHubPagesClient::new(DEFAULT_API_URL, "t").unwrap();
        for (owner, repo) in [("..", "site"), ("octo", "."), ("octo", "")] {
            assert!(matches!(
                client.pages_url(owner, repo),
                Err(PagesError::InvalidRepository { .. })
            ));
        }
    }

    #[tokio::test]
    async fn test_dot_repository_name_sends_nothing() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = GitHubPagesClient::new(&mock_server.uri(), "t").unwrap();
        let err = client
            .create_pages_source("octo", "..", &PagesSource::default())
            .await
            .unwrap_err();
        assert!(matches!(err, PagesError::InvalidRepository { .. }));
    }

    #[tokio::test]
    async fn test_configure_rejects_dot_repository_before_sending() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&mock_server)
            .await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = GitHubPagesClient::new(&mock_server.uri(), "t").unwrap();
        let err = client
            .configure("..", "site", &PagesSource::default())
            .await
            .unwrap_err();
        assert!(matches!(err, PagesError::InvalidRepository { .. }));
    }

    #[test]
    fn test_non_base_api_url_rejected() {
        let err = GitHubPagesClient::new("mailto:octo@example.com", "t")
            .err()
            .expect("URL must be rejected");
        assert!(matches!(err, PagesError::InvalidApiUrl { .. }));
    }

    #[test]
    fn test_source_display() {
        assert_eq!(PagesSource::default().to_string(), "gh-pages (root)");
        let docs = PagesSource {
            branch: "main".to_string(),
            path: "/docs".to_string(),
        };
        assert_eq!(docs.to_string(), "main (/docs)");
    }
}
