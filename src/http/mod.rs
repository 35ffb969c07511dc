//! HTTP API server for the therapy-notes app backend
//!
//! - POST /generateTranscript - run the session-to-document pipeline
//! - GET /health - Health check
//!
//! Callers authenticate with a bearer id token checked against the identity
//! backend before any request body is looked at.

mod auth;
mod handlers;
mod routes;
mod state;

pub use auth::{bearer_token, IdentityClient, TokenVerifier};
pub use routes::create_router;
pub use state::AppState;
