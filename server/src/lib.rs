//! # Imposter Game Server Library
//!
//! This library provides the backend for a small word party game. One player
//! is secretly the imposter; everyone else receives the same secret word drawn
//! from a category. The server lists the categories it knows about and deals
//! a fresh round on request.
//!
//! ## Core Responsibilities
//!
//! ### Category Discovery
//! Categories are plain `.csv` files in a single store directory. The store is
//! re-read on every request, so dropping a new file into the directory makes
//! it available immediately.
//!
//! ### Word List Parsing
//! Category files come from spreadsheet tools as often as from text editors.
//! The parser accepts a leading byte-order mark, either a headed table with an
//! `answer` column or a bare one-word-per-row list, and removes duplicates
//! case-insensitively while keeping the first spelling.
//!
//! ### Round Setup
//! A round needs at least three players and a non-empty category. The server
//! picks the secret word, shuffles the players, picks the imposter and picks
//! the starting player, all from one injected random source.
//!
//! ## Module Organization
//!
//! ### Category Store Module (`category_store`)
//! - Directory scanning and category naming
//! - Sandboxed name-to-file resolution
//! - Encoding, header detection and deduplication
//!
//! ### Game Module (`game`)
//! - Request validation with fixed user-facing messages
//! - Randomized role and starter assignment
//!
//! ### Network Module (`network`)
//! - HTTP routes for listing categories and setting up a game
//! - Shared handler state and the bound server
//!
//! ### Error Module (`error`)
//! - Store failures (contained inside the store)
//! - Setup validation failures (returned to the caller)
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use server::category_store::CategoryStore;
//! use server::network::{AppState, Server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = CategoryStore::new("categories");
//!     let state = AppState::with_seed(store, None);
//!
//!     let server = Server::new("127.0.0.1:5050", state).await?;
//!     server.run().await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Failure Model
//!
//! A missing store directory, an unreadable file or malformed content never
//! fails a request outright. The store logs a diagnostic and reports no
//! categories or no words, which setup then turns into the usual
//! "Category is empty or missing." message.

pub mod category_store;
pub mod error;
pub mod game;
pub mod network;
