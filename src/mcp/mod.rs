//! External MCP tool calls with demo-safe fallbacks.
//!
//! Every operation tries the real tool first. Whatever goes wrong (missing
//! binary, non-zero exit, unusable output) the caller still gets a response
//! of the same shape, tagged `method: "simulated"` and carrying a `warning`.

pub mod advisors;
pub mod client;
mod error;
pub mod fallback;
mod handlers;
pub mod tables;

pub use advisors::{list_advisors, Advisory, AdvisorListing, AdvisorySeverity};
pub use client::{CliTool, ExternalTool, ToolOutput};
pub use error::ExternalToolError;
pub use fallback::{call_with_fallback, Method, Outcome};
pub use handlers::configure_mcp_routes;
pub use tables::{list_tables, TableInfo, TableListing};
