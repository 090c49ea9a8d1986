//! Request and response shapes exchanged with the mock server.

use crate::model::kind::ModelKind;
use crate::model::RecordId;
use crate::server::error::ApiError;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// HTTP-style verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Verb {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Status used when a handler succeeds with a body.
    pub fn success_status(self) -> u16 {
        match self {
            Self::Post => 201,
            Self::Delete => 204,
            Self::Get | Self::Put | Self::Patch => 200,
        }
    }
}

impl Display for Verb {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unsupported verb name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVerb(pub String);

impl Display for UnknownVerb {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unsupported verb `{}`; expected GET|POST|PUT|PATCH|DELETE", self.0)
    }
}

impl Error for UnknownVerb {}

impl FromStr for Verb {
    type Err = UnknownVerb;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            _ => Err(UnknownVerb(value.trim().to_string())),
        }
    }
}

/// One client request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Correlates log lines for this request.
    pub request_id: Uuid,
    pub verb: Verb,
    pub path: String,
    /// Named path segments, filled in by the router.
    pub params: BTreeMap<String, String>,
    /// Raw body text, when one was sent.
    pub body: Option<String>,
}

impl Request {
    pub fn new(verb: Verb, path: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            verb,
            path: path.into(),
            params: BTreeMap::new(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Path without its query string.
    pub fn route_path(&self) -> &str {
        self.path
            .split_once('?')
            .map_or(self.path.as_str(), |(path, _)| path)
    }

    /// Raw value of a named path segment.
    pub fn param(&self, name: &str) -> Result<&str, ApiError> {
        self.params
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| ApiError::Internal(format!("route has no `:{name}` segment")))
    }

    /// Named path segment parsed as a record id.
    ///
    /// A segment that is not an integer in canonical form (`1`, not `01` or
    /// `+1`) cannot name any record, so it is reported as `NotFound` for
    /// `kind`.
    pub fn id_param(&self, name: &str, kind: ModelKind) -> Result<RecordId, ApiError> {
        let raw = self.param(name)?;
        match raw.parse::<RecordId>() {
            Ok(id) if id.to_string() == raw => Ok(id),
            _ => Err(ApiError::NotFound {
                kind,
                id: raw.to_string(),
            }),
        }
    }

    /// Parses the body as JSON into `T`.
    pub fn json_body<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        let body = self
            .body
            .as_deref()
            .filter(|body| !body.trim().is_empty())
            .ok_or_else(|| ApiError::MalformedRequest("request body is empty".to_string()))?;
        serde_json::from_str(body).map_err(|err| ApiError::MalformedRequest(err.to_string()))
    }
}

/// Response produced for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: Option<Value>,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub(crate) fn from_error(err: &ApiError) -> Self {
        Self {
            status: err.status(),
            body: Some(json!({ "errors": [err.to_string()] })),
        }
    }
}
