pub mod api_router;
pub mod cli;
pub mod core;
pub mod dashboard;
pub mod datamodel;
pub mod main_module;
pub mod mcp;
pub mod migrations;
pub mod security;
