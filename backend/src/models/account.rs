//! Models that represent accounts, authentication payloads, and role metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::validation::rules;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
/// Database representation of a registered account.
pub struct Account {
    /// Unique identifier for the account.
    pub id: String,
    /// Email address used for login (unique).
    pub email: String,
    /// Display username.
    pub username: String,
    /// Argon2 hash of the account's password.
    pub password_hash: String,
    /// Role describing the account's privileges. Fixed at creation.
    pub role: AccountRole,
    /// Optional trading name for seller accounts.
    pub business_name: Option<String>,
    /// Inactive accounts cannot authenticate.
    pub is_active: bool,
    /// Staff flag mirrored from the admin interface.
    pub is_staff: bool,
    /// Creation timestamp for auditing.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp for auditing.
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Default)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
/// Supported account roles stored in the database.
pub enum AccountRole {
    /// Platform administrator.
    Admin,
    /// Account that owns vehicles and listings.
    Seller,
    /// Account that browses and bids.
    Buyer,
    /// Unprivileged default role.
    #[default]
    Guest,
}

impl AccountRole {
    /// Returns the canonical snake_case representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountRole::Admin => "admin",
            AccountRole::Seller => "seller",
            AccountRole::Buyer => "buyer",
            AccountRole::Guest => "guest",
        }
    }
}

impl Serialize for AccountRole {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AccountRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "admin" => Ok(AccountRole::Admin),
            "seller" => Ok(AccountRole::Seller),
            "buyer" => Ok(AccountRole::Buyer),
            "guest" => Ok(AccountRole::Guest),
            other => Err(serde::de::Error::unknown_variant(
                other,
                &["admin", "seller", "buyer", "guest"],
            )),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
/// Payload for registering a new account.
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(custom(function = "rules::validate_username"))]
    pub username: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[serde(default)]
    pub role: AccountRole,
    #[serde(default)]
    pub business_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
/// Credentials submitted by an account attempting to authenticate.
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
/// Authentication tokens returned after a successful login.
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub account: AccountResponse,
}

#[derive(Debug, Serialize, Deserialize)]
/// Public-facing representation of an account returned by the API.
pub struct AccountResponse {
    pub id: String,
    pub email: String,
    pub username: String,
    pub role: String,
    pub business_name: Option<String>,
    pub is_active: bool,
    pub is_staff: bool,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        AccountResponse {
            id: account.id,
            email: account.email,
            username: account.username,
            role: account.role.as_str().to_string(),
            business_name: account.business_name,
            is_active: account.is_active,
            is_staff: account.is_staff,
        }
    }
}

impl Account {
    /// Constructs a new account with freshly generated identifiers.
    pub fn new(
        email: String,
        username: String,
        password_hash: String,
        role: AccountRole,
        business_name: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            email,
            username,
            password_hash,
            role,
            business_name,
            is_active: true,
            is_staff: matches!(role, AccountRole::Admin),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.role, AccountRole::Admin)
    }

    pub fn is_seller(&self) -> bool {
        matches!(self.role, AccountRole::Seller)
    }

    pub fn is_buyer(&self) -> bool {
        matches!(self.role, AccountRole::Buyer)
    }

    pub fn is_guest(&self) -> bool {
        matches!(self.role, AccountRole::Guest)
    }
}
