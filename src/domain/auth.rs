use serde::{Deserialize, Serialize};

use crate::domain::types::AccountId;

/// Identity of the logged-in customer as established by the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: AccountId,
}
