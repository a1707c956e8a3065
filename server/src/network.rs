//! Server HTTP layer exposing category listing and game setup

use crate::category_store::CategoryStore;
use crate::error::SetupError;
use crate::game::{setup_game, WordSource};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;
use shared::{ErrorResponse, SetupRequest, SetupResponse, MSG_INVALID_BODY};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// State shared by all request handlers
///
/// The store is read-only. The random source is the only mutable piece and
/// is locked just for the duration of one setup.
#[derive(Clone)]
pub struct AppState {
    store: Arc<CategoryStore>,
    rng: Arc<Mutex<StdRng>>,
}

impl AppState {
    pub fn new(store: CategoryStore, rng: StdRng) -> Self {
        Self {
            store: Arc::new(store),
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    /// Seeds from `seed` when given, otherwise from OS entropy
    pub fn with_seed(store: CategoryStore, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(store, rng)
    }

    pub fn store(&self) -> &CategoryStore {
        &self.store
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/get_categories", get(get_categories))
        .route("/setup_game", post(setup_game_handler))
        .with_state(state)
}

impl IntoResponse for SetupError {
    fn into_response(self) -> Response {
        error_response(&self.to_string())
    }
}

fn error_response(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message))).into_response()
}

async fn get_categories(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.store.list_categories())
}

/// The body is read as JSON whatever its declared content type.
async fn setup_game_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let value: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => {
            debug!("Rejected setup body: {}", e);
            return error_response(MSG_INVALID_BODY);
        }
    };

    let request = setup_request_from_json(&value);
    let listable = value.get("category").map_or(true, Value::is_string);
    debug!(
        "Setup requested: {} players, category '{}'",
        request.players.len(),
        request.category
    );

    let result = {
        let mut rng = state.rng.lock().await;
        if listable {
            setup_game(
                state.store.as_ref(),
                &request.players,
                &request.category,
                &mut *rng,
            )
        } else {
            setup_game(&Unlisted, &request.players, &request.category, &mut *rng)
        }
    };

    match result {
        Ok(game) => (StatusCode::OK, Json(SetupResponse::from(game))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Word source for category values that can never name a stored category
struct Unlisted;

impl WordSource for Unlisted {
    fn words(&self, _category: &str) -> Vec<String> {
        Vec::new()
    }
}

/// JSON truthiness: `null`, `false`, zero and empty containers are falsy
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

/// Extracts a setup request leniently
///
/// A `players` value that is not an array of strings becomes an empty list.
/// A falsy `category` becomes empty. Any other non-string `category` keeps
/// its JSON text, and the handler never looks that text up in the store.
pub fn setup_request_from_json(value: &Value) -> SetupRequest {
    let players = value
        .get("players")
        .and_then(Value::as_array)
        .and_then(|items| {
            items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
        })
        .unwrap_or_default();

    let category = match value.get("category") {
        Some(Value::String(name)) => name.clone(),
        Some(other) if is_truthy(other) => other.to_string(),
        _ => String::new(),
    };

    SetupRequest { players, category }
}

/// Bound HTTP server ready to serve the game routes
pub struct Server {
    listener: TcpListener,
    state: AppState,
}

impl Server {
    pub async fn new(addr: &str, state: AppState) -> Result<Self, Box<dyn std::error::Error>> {
        let listener = TcpListener::bind(addr).await?;
        info!("Server listening on {}", listener.local_addr()?);
        info!(
            "Serving categories from {}",
            state.store().dir().display()
        );

        Ok(Server { listener, state })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serves requests until the listener fails
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let router = app(self.state);
        info!("Server started successfully");
        axum::serve(self.listener, router).await?;
        Ok(())
    }
}
