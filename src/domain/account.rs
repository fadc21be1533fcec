use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{AccountId, EmailAddress, ImagePath, ProfileId, Username};

/// Customer or staff account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub first_name: String,
    pub last_name: String,
    pub username: Username,
    pub email: EmailAddress,
    pub phone_number: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superadmin: bool,
    pub date_joined: NaiveDateTime,
    pub last_login: Option<NaiveDateTime>,
}

impl Account {
    /// Whether the account may use the admin screens.
    pub fn can_administer(&self) -> bool {
        self.is_active && (self.is_staff || self.is_superadmin)
    }
}

/// Postal details attached to an [`Account`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: ProfileId,
    pub user_id: AccountId,
    pub first_name: String,
    pub last_name: String,
    pub username: Username,
    pub email: EmailAddress,
    pub address_line_1: String,
    pub address_line_2: String,
    pub profile_picture: Option<ImagePath>,
    pub city: String,
    pub state: String,
    pub country: String,
}
