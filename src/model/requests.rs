/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 7/10/26
******************************************************************************/
use reqwest::Method;

/// Body sent with a request
///
/// Every variant owns its data so a request can be replayed verbatim after a
/// token refresh.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Payload {
    /// No body
    #[default]
    Empty,
    /// JSON document
    Json(serde_json::Value),
    /// XML document, sent as `application/xml`
    Xml(String),
    /// Plain text, sent as `text/plain`
    Text(String),
    /// `application/x-www-form-urlencoded` fields
    Form(Vec<(String, String)>),
    /// Raw bytes, sent as `application/octet-stream`
    Binary(Vec<u8>),
}

/// Representation asked from the server through the `Accept` header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    /// `application/json`
    #[default]
    Json,
    /// `application/xml`
    Xml,
    /// `text/plain`
    Text,
    /// Anything (`*/*`), used for bitstreams and thumbnails
    Binary,
}

impl ResponseFormat {
    /// Value for the `Accept` header
    #[must_use]
    pub fn accept_header(&self) -> &'static str {
        match self {
            ResponseFormat::Json => "application/json",
            ResponseFormat::Xml => "application/xml",
            ResponseFormat::Text => "text/plain",
            ResponseFormat::Binary => "*/*",
        }
    }
}

/// Description of one API call, independent of the token used to send it
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP verb
    pub method: Method,
    /// Path relative to the server root, or an absolute URL (e.g. a next-page link)
    pub path: String,
    /// Query string parameters
    pub query: Vec<(String, String)>,
    /// Request body
    pub payload: Payload,
    /// Expected response representation
    pub accept: ResponseFormat,
    /// Identifier reported in `AppError::NotFound` when the server answers 404
    pub reference: Option<String>,
}

impl ApiRequest {
    /// Creates a request with no query, no body and a JSON response
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            payload: Payload::Empty,
            accept: ResponseFormat::default(),
            reference: None,
        }
    }

    /// GET request
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// POST request
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// PUT request
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// DELETE request
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Appends a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Sets the body
    #[must_use]
    pub fn payload(mut self, payload: Payload) -> Self {
        self.payload = payload;
        self
    }

    /// Sets the expected response representation
    #[must_use]
    pub fn accept(mut self, accept: ResponseFormat) -> Self {
        self.accept = accept;
        self
    }

    /// Sets the identifier reported when the server answers 404
    #[must_use]
    pub fn for_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Returns true if `path` is already a full URL
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.path.starts_with("http://") || self.path.starts_with("https://")
    }
}
