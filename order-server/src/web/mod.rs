//! Web layer: the optimize API and its single-page UI.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppOptimizer, AppState};
pub use templates::*;
