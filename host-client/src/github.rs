//! GitHub REST implementation of [`RepositoryHost`].

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde_json::json;

use crate::context::RunContext;
use crate::error::{HostError, Result};
use crate::{PrMetadata, RepositoryHost};

/// Public GitHub API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";
const PER_PAGE: usize = 100;

/// Connection settings for [`GitHubClient`].
#[derive(Clone, Debug)]
pub struct GitHubConfig {
    pub api_url: String,
    /// Sent as a bearer token when present.
    pub token: Option<String>,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            user_agent: concat!("prgate/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    content: String,
    encoding: String,
}

#[derive(Debug, Deserialize)]
struct PullRequestResponse {
    #[serde(default)]
    labels: Vec<LabelResponse>,
    #[serde(default)]
    changed_files: u64,
}

#[derive(Debug, Deserialize)]
struct LabelResponse {
    name: String,
}

#[derive(Debug, Deserialize)]
struct FileResponse {
    filename: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

/// GitHub REST API client.
pub struct GitHubClient {
    client: reqwest::Client,
    api_url: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(config: GitHubConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("X-GitHub-Api-Version", HeaderValue::from_static(API_VERSION));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .build()?;

        Ok(Self::with_client(client, config.api_url, config.token))
    }

    /// Use a preconfigured HTTP client.
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>, token: Option<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            api_url,
            token,
        }
    }

    fn repo_url(&self, ctx: &RunContext, tail: &str) -> String {
        format!(
            "{}/repos/{}/{}/{tail}",
            self.api_url,
            urlencoding::encode(&ctx.owner),
            urlencoding::encode(&ctx.repo),
        )
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|err| err.message)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
        Err(HostError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, what: &'static str) -> Result<T> {
        let response = self.send(self.request(Method::GET, url)).await?;
        response
            .json::<T>()
            .await
            .map_err(|err| HostError::decode(what, err))
    }

    /// Walk a list endpoint page by page until a short page.
    async fn get_all_pages<T: DeserializeOwned>(&self, url: &str, what: &'static str) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut page = 1usize;
        loop {
            let builder = self
                .request(Method::GET, url)
                .query(&[("per_page", PER_PAGE), ("page", page)]);
            let batch: Vec<T> = self
                .send(builder)
                .await?
                .json()
                .await
                .map_err(|err| HostError::decode(what, err))?;
            let len = batch.len();
            items.extend(batch);
            if len < PER_PAGE {
                break;
            }
            page += 1;
        }
        tracing::debug!("fetched {} {what} over {page} page(s)", items.len());
        Ok(items)
    }
}

fn decode_content(response: ContentResponse) -> Result<String> {
    match response.encoding.as_str() {
        "base64" => {
            let compact: String = response
                .content
                .chars()
                .filter(|c| !c.is_ascii_whitespace())
                .collect();
            let bytes = base64::engine::general_purpose::STANDARD
                .decode(compact)
                .map_err(|err| HostError::decode("file content", err))?;
            String::from_utf8(bytes).map_err(|err| HostError::decode("file content", err))
        }
        "utf-8" | "utf8" => Ok(response.content),
        other => Err(HostError::decode(
            "file content",
            format!("unsupported encoding {other:?}"),
        )),
    }
}

#[async_trait]
impl RepositoryHost for GitHubClient {
    async fn fetch_policy_document(&self, ctx: &RunContext, path: &str) -> Result<Option<String>> {
        let encoded_path = path
            .trim_start_matches('/')
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        let url = self.repo_url(ctx, &format!("contents/{encoded_path}"));
        let mut builder = self.request(Method::GET, &url);
        if let Some(git_ref) = &ctx.git_ref {
            builder = builder.query(&[("ref", git_ref)]);
        }

        let response = match self.send(builder).await {
            Ok(response) => response,
            Err(HostError::Api { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                tracing::debug!("{path} not found in {}/{}", ctx.owner, ctx.repo);
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        let content: ContentResponse = response
            .json()
            .await
            .map_err(|err| HostError::decode("file content", err))?;
        decode_content(content).map(Some)
    }

    async fn fetch_changed_files(&self, ctx: &RunContext) -> Result<Vec<String>> {
        let url = self.repo_url(ctx, &format!("pulls/{}/files", ctx.pr_number));
        let files: Vec<FileResponse> = self.get_all_pages(&url, "changed files").await?;
        Ok(files.into_iter().map(|f| f.filename).collect())
    }

    async fn fetch_review_count(&self, ctx: &RunContext) -> Result<u64> {
        let url = self.repo_url(ctx, &format!("pulls/{}/reviews", ctx.pr_number));
        let reviews: Vec<IgnoredAny> = self.get_all_pages(&url, "reviews").await?;
        Ok(reviews.len() as u64)
    }

    async fn fetch_pr_metadata(&self, ctx: &RunContext) -> Result<PrMetadata> {
        let url = self.repo_url(ctx, &format!("pulls/{}", ctx.pr_number));
        let pr: PullRequestResponse = self.get_json(&url, "pull request").await?;
        Ok(PrMetadata {
            labels: pr.labels.into_iter().map(|l| l.name).collect(),
            reported_changed_file_count: pr.changed_files,
        })
    }

    async fn add_labels(&self, ctx: &RunContext, labels: &[String]) -> Result<()> {
        if labels.is_empty() {
            return Ok(());
        }
        let url = self.repo_url(ctx, &format!("issues/{}/labels", ctx.pr_number));
        let builder = self
            .request(Method::POST, &url)
            .json(&json!({ "labels": labels }));
        self.send(builder).await?;
        tracing::info!("added labels {labels:?} to {ctx}");
        Ok(())
    }

    async fn remove_label(&self, ctx: &RunContext, label: &str) -> Result<()> {
        let url = self.repo_url(
            ctx,
            &format!(
                "issues/{}/labels/{}",
                ctx.pr_number,
                urlencoding::encode(label)
            ),
        );
        match self.send(self.request(Method::DELETE, &url)).await {
            Ok(_) => {
                tracing::info!("removed label {label:?} from {ctx}");
                Ok(())
            }
            Err(HostError::Api { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                tracing::debug!("label {label:?} already absent from {ctx}");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}
