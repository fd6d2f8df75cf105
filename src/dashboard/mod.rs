//! Read-only endpoints over the derived views.
//!
//! Unlike the tool-backed routes these never fall back to demo data: a
//! backend failure is reported to the caller as a 502.

mod handlers;

pub use handlers::{
    configure_dashboard_routes, fetch_employees, fetch_project_statistics, fetch_ranking,
};
