//! HTTP adapters for the PPh21 Withholding Engine.
//!
//! This module provides the calculator web page (GET and POST `/`) and a
//! JSON endpoint (POST `/calculate`). Both validate input at the boundary
//! and call into [`calculation`](crate::calculation) with plain values.

mod handlers;
mod request;
mod response;
mod state;
mod view;

pub use handlers::create_router;
pub use request::{CalculationRequest, TaxForm, TaxInput, parse_amount};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
pub use view::{format_idr, render_page};
