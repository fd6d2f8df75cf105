pub mod error;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod utils;

pub use error::ApiError;
pub use state::AppState;
pub use utils::{create_conn, DbPool};
