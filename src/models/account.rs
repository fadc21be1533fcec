use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::account::{Account as DomainAccount, UserProfile as DomainUserProfile};
use crate::domain::types::{EmailAddress, ImagePath, TypeConstraintError, Username};

/// Diesel model representing the `accounts` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::accounts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Account {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub phone_number: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superadmin: bool,
    pub date_joined: NaiveDateTime,
    pub last_login: Option<NaiveDateTime>,
}

/// Diesel model representing the `user_profiles` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::user_profiles)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserProfile {
    pub id: i32,
    pub user_id: i32,
    pub address_line_1: String,
    pub address_line_2: String,
    pub profile_picture: Option<String>,
    pub city: String,
    pub state: String,
    pub country: String,
}

impl TryFrom<Account> for DomainAccount {
    type Error = TypeConstraintError;

    fn try_from(account: Account) -> Result<Self, Self::Error> {
        Ok(Self {
            id: account.id.try_into()?,
            first_name: account.first_name,
            last_name: account.last_name,
            username: Username::new(account.username)?,
            email: EmailAddress::new(account.email)?,
            phone_number: account.phone_number,
            is_active: account.is_active,
            is_staff: account.is_staff,
            is_superadmin: account.is_superadmin,
            date_joined: account.date_joined,
            last_login: account.last_login,
        })
    }
}

impl TryFrom<(UserProfile, Account)> for DomainUserProfile {
    type Error = TypeConstraintError;

    fn try_from((profile, account): (UserProfile, Account)) -> Result<Self, Self::Error> {
        Ok(Self {
            id: profile.id.try_into()?,
            user_id: profile.user_id.try_into()?,
            first_name: account.first_name,
            last_name: account.last_name,
            username: Username::new(account.username)?,
            email: EmailAddress::new(account.email)?,
            address_line_1: profile.address_line_1,
            address_line_2: profile.address_line_2,
            profile_picture: profile.profile_picture.and_then(|p| ImagePath::new(p).ok()),
            city: profile.city,
            state: profile.state,
            country: profile.country,
        })
    }
}
