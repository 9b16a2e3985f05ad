//! ClauseWatch HTTP transport. The binary in `main.rs` wires it to a listener.

pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
