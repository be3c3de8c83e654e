pub mod catalog;
pub mod routes;
pub mod state;

pub use state::{AppState, SharedState};
