//! Library facade for autoflow-server exposing the router and state so
//! integration tests can assemble a server without going through `main`.

pub mod error;
pub mod paths;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::build_router;
pub use state::{AppState, SharedState};
