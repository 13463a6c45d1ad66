//! Web layer for the route finder.
//!
//! Serves the map page, dataset selection and the click endpoint.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, OrsPipeline};
pub use templates::*;
