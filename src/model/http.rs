/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 8/10/26
******************************************************************************/

//! Authenticated request executor
//!
//! Every API call goes through [`HttpClient::execute`], which applies one
//! policy regardless of verb or payload:
//! - 2xx: the response is handed back for decoding
//! - 401: the token is refreshed once and the same request is sent again;
//!   a second 401 is fatal
//! - 404: `AppError::NotFound` carrying the requested reference
//! - anything else: `AppError::RequestFailed` with status, URL and body
//!
//! Transport errors are never retried.

use crate::application::auth::Auth;
use crate::application::config::Config;
use crate::constants::{ACCESS_TOKEN_HEADER, MAX_TOKEN_REFRESHES, USER_AGENT};
use crate::error::AppError;
use crate::model::requests::{ApiRequest, Payload, ResponseFormat};
use crate::model::xml::XmlNode;
use futures::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, warn};

/// Result of a single send, before the retry decision
enum Attempt {
    Completed(Response),
    Unauthorized,
}

/// HTTP client that authenticates every request and applies the shared status policy
pub struct HttpClient {
    auth: Arc<Auth>,
    http_client: Client,
    base_url: String,
}

impl HttpClient {
    /// Creates a new client and performs the initial login
    ///
    /// # Returns
    /// * `Ok(HttpClient)` - Authenticated client ready to use
    /// * `Err(AppError)` - If the transport cannot be built or login fails
    pub async fn new(config: &Config) -> Result<Self, AppError> {
        let client = Self::new_lazy(config)?;
        client.auth.login().await?;
        Ok(client)
    }

    /// Creates a new client without logging in; the first request does it
    pub fn new_lazy(config: &Config) -> Result<Self, AppError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(secs) = config.http.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = config.http.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        let http_client = builder.build()?;

        let credentials = Arc::new(config.credentials.clone());
        let auth = Arc::new(Auth::new(credentials.clone(), http_client.clone()));

        Ok(Self {
            auth,
            http_client,
            base_url: credentials.base_url(),
        })
    }

    /// Gets Auth reference
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Base URL every relative path is resolved against
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a request path; absolute paths are used verbatim
    #[must_use]
    pub fn url_for(&self, request: &ApiRequest) -> String {
        if request.is_absolute() {
            request.path.clone()
        } else {
            format!("{}/{}", self.base_url, request.path.trim_start_matches('/'))
        }
    }

    /// Sends a request with the current token, refreshing it at most once on 401
    pub async fn execute(&self, request: &ApiRequest) -> Result<Response, AppError> {
        let url = self.url_for(request);
        let mut token = self.auth.token().await?;
        let mut refreshes = 0;

        loop {
            let response = send_request(&self.http_client, request, &url, Some(&token)).await?;
            match interpret(response, &url, request.reference.as_deref()).await? {
                Attempt::Completed(response) => return Ok(response),
                Attempt::Unauthorized if refreshes < MAX_TOKEN_REFRESHES => {
                    refreshes += 1;
                    warn!("Access token rejected for {}, refreshing and retrying", url);
                    token = self.auth.refresh().await?;
                }
                Attempt::Unauthorized => {
                    error!("Still unauthorized after token refresh: {}", url);
                    return Err(AppError::Unauthorized { url });
                }
            }
        }
    }

    /// Executes a request and decodes a JSON body
    pub async fn json<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T, AppError> {
        let response = self.execute(request).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Executes a request and parses an XML body
    pub async fn xml(&self, request: &ApiRequest) -> Result<XmlNode, AppError> {
        let response = self.execute(request).await?;
        let text = response.text().await?;
        XmlNode::parse(&text)
    }

    /// Executes a request and returns the body as text
    pub async fn text(&self, request: &ApiRequest) -> Result<String, AppError> {
        let response = self.execute(request).await?;
        Ok(response.text().await?)
    }

    /// Executes a request and returns the raw body
    pub async fn bytes(&self, request: &ApiRequest) -> Result<Vec<u8>, AppError> {
        let response = self.execute(request).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Executes a request and streams the body into a file
    ///
    /// The body goes to a `.part` sibling first and is renamed onto `path`
    /// only once complete; a failed transfer leaves no file behind.
    ///
    /// # Returns
    /// * Number of bytes written
    pub async fn download(&self, request: &ApiRequest, path: &Path) -> Result<u64, AppError> {
        let response = self.execute(request).await?;
        let partial = partial_path(path);

        let result = match write_body(response, &partial).await {
            Ok(written) => tokio::fs::rename(&partial, path)
                .await
                .map(|_| written)
                .map_err(AppError::from),
            Err(e) => Err(e),
        };
        match result {
            Ok(written) => {
                debug!("Wrote {} bytes to {}", written, path.display());
                Ok(written)
            }
            Err(e) => {
                error!("Download to {} failed: {}", path.display(), e);
                if let Err(cleanup) = tokio::fs::remove_file(&partial).await {
                    warn!("Could not remove {}: {}", partial.display(), cleanup);
                }
                Err(e)
            }
        }
    }

    /// Makes a GET request returning JSON
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        self.json(&ApiRequest::get(path)).await
    }

    /// Makes a POST request with a JSON body returning JSON
    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: B,
    ) -> Result<T, AppError> {
        let request = ApiRequest::post(path).payload(Payload::Json(serde_json::to_value(body)?));
        self.json(&request).await
    }

    /// Makes a PUT request with a JSON body returning JSON
    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: B,
    ) -> Result<T, AppError> {
        let request = ApiRequest::put(path).payload(Payload::Json(serde_json::to_value(body)?));
        self.json(&request).await
    }

    /// Makes a DELETE request, discarding any body
    pub async fn delete(&self, path: &str) -> Result<(), AppError> {
        self.execute(&ApiRequest::delete(path).accept(ResponseFormat::Text))
            .await?;
        Ok(())
    }
}

/// Builds and sends one request; no status handling
///
/// `token`, when present, goes into the access token header.
/// `<name>.part` next to the final download target
fn partial_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "download".into());
    name.push(".part");
    path.with_file_name(name)
}

async fn write_body(response: Response, path: &Path) -> Result<u64, AppError> {
    let mut file = tokio::fs::File::create(path).await?;
    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    Ok(written)
}

pub(crate) async fn send_request(
    client: &Client,
    request: &ApiRequest,
    url: &str,
    token: Option<&str>,
) -> Result<Response, AppError> {
    debug!("{} {}", request.method, url);

    let mut builder = client
        .request(request.method.clone(), url)
        .header(ACCEPT, request.accept.accept_header());

    if let Some(token) = token {
        builder = builder.header(ACCESS_TOKEN_HEADER, token);
    }
    if !request.query.is_empty() {
        builder = builder.query(&request.query);
    }

    builder = match &request.payload {
        Payload::Empty => builder,
        Payload::Json(value) => builder.json(value),
        Payload::Xml(body) => builder
            .header(CONTENT_TYPE, "application/xml; charset=utf-8")
            .body(body.clone()),
        Payload::Text(body) => builder
            .header(CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(body.clone()),
        Payload::Form(fields) => builder.form(fields),
        Payload::Binary(bytes) => builder
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(bytes.clone()),
    };

    let response = builder.send().await?;
    debug!("Response status: {}", response.status());
    Ok(response)
}

/// Maps a response status onto the executor policy
async fn interpret(
    response: Response,
    url: &str,
    reference: Option<&str>,
) -> Result<Attempt, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(Attempt::Completed(response));
    }

    match status {
        StatusCode::UNAUTHORIZED => Ok(Attempt::Unauthorized),
        StatusCode::NOT_FOUND => {
            let reference = reference.unwrap_or(url).to_string();
            warn!("Not found: {}", reference);
            Err(AppError::NotFound { reference })
        }
        _ => {
            let body = response.text().await.unwrap_or_default();
            error!("Request failed with status {}: {}", status, body);
            Err(AppError::RequestFailed {
                status,
                url: url.to_string(),
                body,
            })
        }
    }
}
