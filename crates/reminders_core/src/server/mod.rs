//! In-process mock API server.
//!
//! # Responsibility
//! - Own the store, the factories, the route table and the serializer
//!   policy for one process.
//! - Handle requests one at a time: route, run handler, serialize.
//!
//! # Invariants
//! - Handler and serializer run inside one savepoint per request; a failed
//!   request leaves the store exactly as it was.
//! - Handler failures become error responses, never panics.
//! - Seeding runs at most once, during `start`, before any request.

use crate::config::ServerConfig;
use crate::db::DbError;
use crate::factory::seeds::{seed, SeedScript};
use crate::factory::{Factories, ListBuild, ReminderBuild};
use crate::model::list::List;
use crate::model::reminder::Reminder;
use crate::serializer::{Serializer, SerializerPolicy};
use crate::store::{Schema, Store, StoreError, StoreResult};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub mod error;
pub mod request;
pub mod router;
pub mod routes;

pub use error::ApiError;
pub use request::{Request, Response, Verb};
pub use router::{Handler, HandlerResult, RouteError, RoutePattern, Router};

/// Startup failure.
#[derive(Debug)]
pub enum ServerError {
    Db(DbError),
    Routes(RouteError),
    Seed(StoreError),
}

impl Display for ServerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "store bootstrap failed: {err}"),
            Self::Routes(err) => write!(f, "route registration failed: {err}"),
            Self::Seed(err) => write!(f, "seeding failed: {err}"),
        }
    }
}

impl Error for ServerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Routes(err) => Some(err),
            Self::Seed(err) => Some(err),
        }
    }
}

impl From<DbError> for ServerError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<RouteError> for ServerError {
    fn from(value: RouteError) -> Self {
        Self::Routes(value)
    }
}

/// Mock server owning all in-memory state.
pub struct MockServer {
    config: ServerConfig,
    store: Store,
    factories: Factories,
    router: Router,
    policy: SerializerPolicy,
}

impl MockServer {
    /// Opens the store, registers routes and seeds when the environment
    /// asks for it.
    pub fn start(config: ServerConfig) -> Result<Self, ServerError> {
        let started_at = Instant::now();
        let mut router = Router::new();
        routes::register(&mut router)?;

        let script = config.environment.seed_script();
        let mut server = Self {
            store: Store::open_in_memory()?,
            factories: script.map_or_else(Factories::new, SeedScript::factories),
            router,
            policy: SerializerPolicy::default(),
            config,
        };

        if let Some(script) = script {
            let schema = server.store.schema();
            seed(&schema, &mut server.factories, script).map_err(ServerError::Seed)?;
        }

        info!(
            "event=server_start module=server status=ok environment={} routes={} duration_ms={}",
            server.config.environment,
            server.router.len(),
            started_at.elapsed().as_millis()
        );
        Ok(server)
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Replaces the serialization policy for subsequent requests.
    pub fn set_serializer_policy(&mut self, policy: SerializerPolicy) {
        self.policy = policy;
    }

    /// Direct store access, bypassing routes and factories.
    pub fn schema(&self) -> Schema<'_> {
        self.store.schema()
    }

    /// Handles one request to completion.
    pub fn handle(&self, mut request: Request) -> Response {
        let started_at = Instant::now();
        let result = self.dispatch(&mut request);
        let response = match result {
            Ok(response) => response,
            Err(err) => {
                warn!(
                    "event=request module=server status=error request_id={} verb={} path={} error_code={} error={}",
                    request.request_id,
                    request.verb,
                    request.route_path(),
                    err.code(),
                    err
                );
                Response::from_error(&err)
            }
        };
        info!(
            "event=request module=server status={} request_id={} verb={} path={} duration_ms={}",
            response.status,
            request.request_id,
            request.verb,
            request.route_path(),
            started_at.elapsed().as_millis()
        );
        response
    }

    pub fn get(&self, path: &str) -> Response {
        self.handle(Request::new(Verb::Get, path))
    }

    pub fn post(&self, path: &str, body: impl Into<String>) -> Response {
        self.handle(Request::new(Verb::Post, path).with_body(body))
    }

    pub fn delete(&self, path: &str) -> Response {
        self.handle(Request::new(Verb::Delete, path))
    }

    /// Factory list creation (`server.create("list", ...)`).
    pub fn create_list(&mut self, build: ListBuild) -> StoreResult<List> {
        let schema = self.store.schema();
        self.factories.create_list(&schema, build)
    }

    pub fn create_lists(&mut self, count: usize, build: ListBuild) -> StoreResult<Vec<List>> {
        let schema = self.store.schema();
        self.factories.create_lists(&schema, count, build)
    }

    /// Factory reminder creation (`server.create("reminder", ...)`).
    pub fn create_reminder(&mut self, build: ReminderBuild) -> StoreResult<Reminder> {
        let schema = self.store.schema();
        self.factories.create_reminder(&schema, build)
    }

    pub fn create_reminders(
        &mut self,
        count: usize,
        build: ReminderBuild,
    ) -> StoreResult<Vec<Reminder>> {
        let schema = self.store.schema();
        self.factories.create_reminders(&schema, count, build)
    }

    /// Stops the server and drops all in-memory state.
    pub fn shutdown(self) {
        info!(
            "event=server_stop module=server status=ok environment={}",
            self.config.environment
        );
    }

    fn dispatch(&self, request: &mut Request) -> Result<Response, ApiError> {
        let verb = request.verb;
        let path = request.route_path().to_string();
        let (route, params) =
            self.router
                .recognize(verb, &path)
                .ok_or_else(|| ApiError::RouteNotFound {
                    verb,
                    path: path.clone(),
                })?;
        request.params = params;

        let request = &*request;
        self.store.atomic("request", |schema| -> Result<Response, ApiError> {
            let payload = route.call(&schema, request)?;
            let body = Serializer::new(&self.policy, &schema).serialize(&payload)?;
            let status = match body {
                Some(_) => verb.success_status(),
                None => 204,
            };
            Ok(Response { status, body })
        })
    }
}
