pub mod backend;
pub mod config;
pub mod shared;
pub mod urls;
