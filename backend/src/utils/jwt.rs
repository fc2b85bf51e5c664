use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::account::Account;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // account id
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

impl Claims {
    pub fn new(account_id: String, email: String, role: String, expiration_hours: u64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours as i64);

        Self {
            sub: account_id,
            email,
            role,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }
}

pub fn create_access_token(
    account: &Account,
    secret: &str,
    expiration_hours: u64,
) -> anyhow::Result<String> {
    let claims = Claims::new(
        account.id.clone(),
        account.email.clone(),
        account.role.as_str().to_string(),
        expiration_hours,
    );
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?;

    Ok(token)
}

pub fn verify_access_token(token: &str, secret: &str) -> anyhow::Result<Claims> {
    let validation = Validation::default();
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    )?;

    Ok(token_data.claims)
}

/// Database row backing an opaque refresh token. Only the argon2 hash of the
/// secret half is stored.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StoredRefreshToken {
    pub id: String,
    pub account_id: String,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
}

/// A freshly issued refresh token: the storable record plus the encoded
/// `id.secret` string handed to the client exactly once.
#[derive(Debug)]
pub struct IssuedRefreshToken {
    pub record: StoredRefreshToken,
    pub encoded: String,
}

pub fn create_refresh_token(
    account_id: String,
    expiration_days: u64,
) -> anyhow::Result<IssuedRefreshToken> {
    let id = Uuid::new_v4().to_string();
    let secret: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(48)
        .map(char::from)
        .collect();
    let token_hash = hash_refresh_secret(&secret)?;
    let expires_at = Utc::now() + Duration::days(expiration_days as i64);

    Ok(IssuedRefreshToken {
        encoded: format!("{}.{}", id, secret),
        record: StoredRefreshToken {
            id,
            account_id,
            token_hash,
            expires_at,
        },
    })
}

/// Splits an encoded refresh token into its (id, secret) halves.
pub fn split_refresh_token(token: &str) -> Option<(&str, &str)> {
    let (id, secret) = token.split_once('.')?;
    if id.is_empty() || secret.is_empty() {
        return None;
    }
    Some((id, secret))
}

pub fn hash_refresh_secret(secret: &str) -> anyhow::Result<String> {
    crate::utils::password::hash_password(secret)
}

pub fn verify_refresh_secret(secret: &str, hash: &str) -> anyhow::Result<bool> {
    crate::utils::password::verify_password(secret, hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::account::AccountRole;

    fn seller() -> Account {
        Account::new(
            "sally@example.com".into(),
            "sally".into(),
            "hash".into(),
            AccountRole::Seller,
            None,
        )
    }

    #[test]
    fn create_and_verify_access_token() {
        let account = seller();
        let token = create_access_token(&account, "secret", 1).expect("create token");
        let claims = verify_access_token(&token, "secret").expect("verify token");
        assert_eq!(claims.sub, account.id);
        assert_eq!(claims.email, "sally@example.com");
        assert_eq!(claims.role, "seller");
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let account = seller();
        let token = create_access_token(&account, "secret", 1).unwrap();
        assert!(verify_access_token(&token, "other-secret").is_err());
    }

    #[test]
    fn refresh_token_round_trip() {
        let issued = create_refresh_token("acct-1".into(), 7).expect("issue token");
        let (id, secret) = split_refresh_token(&issued.encoded).expect("split");
        assert_eq!(id, issued.record.id);
        assert!(verify_refresh_secret(secret, &issued.record.token_hash).unwrap());
        assert!(!verify_refresh_secret("bogus", &issued.record.token_hash).unwrap());
    }

    #[test]
    fn split_rejects_malformed_tokens() {
        assert!(split_refresh_token("no-dot-here").is_none());
        assert!(split_refresh_token(".starts-with-dot").is_none());
        assert!(split_refresh_token("ends-with-dot.").is_none());
    }
}
