//! Ordered verb + path route table.
//!
//! # Responsibility
//! - Compile path patterns with `:name` segments into anchored regexes.
//! - Resolve a request to the first matching registration.
//!
//! # Invariants
//! - Matching is first-match-wins in registration order.
//! - Captured segment values are non-empty and contain no `/`.

use crate::serializer::Payload;
use crate::server::error::ApiError;
use crate::server::request::{Request, Verb};
use crate::store::Schema;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

static SEGMENT_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid segment name regex"));

pub type HandlerResult = Result<Payload, ApiError>;

/// Route handler: a function of the store view and the parsed request.
pub type Handler = Box<dyn Fn(&Schema<'_>, &Request) -> HandlerResult>;

/// Route registration error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    InvalidPattern { pattern: String, reason: String },
}

impl Display for RouteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPattern { pattern, reason } => {
                write!(f, "invalid route pattern `{pattern}`: {reason}")
            }
        }
    }
}

impl Error for RouteError {}

/// Compiled path pattern such as `/api/lists/:id/reminders`.
#[derive(Debug, Clone)]
pub struct RoutePattern {
    source: String,
    regex: Regex,
    param_names: Vec<String>,
}

impl RoutePattern {
    pub fn parse(pattern: &str) -> Result<Self, RouteError> {
        let invalid = |reason: &str| RouteError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        if !pattern.starts_with('/') {
            return Err(invalid("pattern must start with `/`"));
        }

        let mut expression = String::from("^");
        let mut param_names = Vec::new();
        let mut seen = BTreeSet::new();
        for segment in pattern.split('/').filter(|segment| !segment.is_empty()) {
            expression.push('/');
            match segment.strip_prefix(':') {
                Some(name) => {
                    if !SEGMENT_NAME_RE.is_match(name) {
                        return Err(invalid("segment name must be an identifier"));
                    }
                    if !seen.insert(name) {
                        return Err(invalid("segment name is used twice"));
                    }
                    expression.push_str(&format!("(?P<{name}>[^/]+)"));
                    param_names.push(name.to_string());
                }
                None => expression.push_str(&regex::escape(segment)),
            }
        }
        expression.push_str("/?$");

        let regex = Regex::new(&expression).map_err(|err| invalid(&err.to_string()))?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
            param_names,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Named segment values when `path` matches this pattern.
    pub fn captures(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let captures = self.regex.captures(path)?;
        let params = self
            .param_names
            .iter()
            .filter_map(|name| {
                captures
                    .name(name)
                    .map(|value| (name.clone(), value.as_str().to_string()))
            })
            .collect();
        Some(params)
    }
}

/// One registered route.
pub struct Route {
    verb: Verb,
    pattern: RoutePattern,
    handler: Handler,
}

impl Route {
    pub fn verb(&self) -> Verb {
        self.verb
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Invokes the handler.
    pub fn call(&self, schema: &Schema<'_>, request: &Request) -> HandlerResult {
        (self.handler)(schema, request)
    }
}

/// Ordered route table.
#[derive(Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a route. Earlier registrations win on overlap.
    pub fn route<F>(
        &mut self,
        verb: Verb,
        pattern: &str,
        handler: F,
    ) -> Result<&mut Self, RouteError>
    where
        F: Fn(&Schema<'_>, &Request) -> HandlerResult + 'static,
    {
        let pattern = RoutePattern::parse(pattern)?;
        self.routes.push(Route {
            verb,
            pattern,
            handler: Box::new(handler),
        });
        Ok(self)
    }

    pub fn get<F>(&mut self, pattern: &str, handler: F) -> Result<&mut Self, RouteError>
    where
        F: Fn(&Schema<'_>, &Request) -> HandlerResult + 'static,
    {
        self.route(Verb::Get, pattern, handler)
    }

    pub fn post<F>(&mut self, pattern: &str, handler: F) -> Result<&mut Self, RouteError>
    where
        F: Fn(&Schema<'_>, &Request) -> HandlerResult + 'static,
    {
        self.route(Verb::Post, pattern, handler)
    }

    pub fn delete<F>(&mut self, pattern: &str, handler: F) -> Result<&mut Self, RouteError>
    where
        F: Fn(&Schema<'_>, &Request) -> HandlerResult + 'static,
    {
        self.route(Verb::Delete, pattern, handler)
    }

    /// First route matching `verb` and `path`, with its captured segments.
    pub fn recognize(
        &self,
        verb: Verb,
        path: &str,
    ) -> Option<(&Route, BTreeMap<String, String>)> {
        self.routes
            .iter()
            .filter(|route| route.verb == verb)
            .find_map(|route| route.pattern.captures(path).map(|params| (route, params)))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
