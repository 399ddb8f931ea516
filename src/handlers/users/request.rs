//! User profile request types

use serde::Deserialize;

/// Query parameters for the user endpoint
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub user: String,
}
