use std::collections::HashMap;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::{config::Settings, models::CurrentUser};

pub type FieldErrors = HashMap<String, String>;

/// Claims issued by the hosted auth provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    // user id as hex string
    pub sub: String,
    // expiry (unix timestamp seconds)
    pub exp: usize,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl Claims {
    pub fn into_user(self) -> Option<CurrentUser> {
        let id = ObjectId::parse_str(&self.sub).ok()?;
        let username = self
            .username
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| self.email.split('@').next().unwrap_or_default().to_string());

        Some(CurrentUser {
            id,
            email: self.email,
            username,
            is_admin: self.role.as_deref() == Some("admin"),
        })
    }
}

/// Signs a token the same way the auth provider does. Used by local tooling
/// and tests; production tokens come from the provider.
pub fn make_jwt_with_days(settings: &Settings, user: &CurrentUser, days: i64) -> Result<String, String> {
    let exp = (Utc::now() + Duration::days(days)).timestamp() as usize;

    let claims = Claims {
        sub: user.id.to_hex(),
        exp,
        email: user.email.clone(),
        username: Some(user.username.clone()),
        role: user.is_admin.then(|| "admin".to_string()),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(settings.jwt_secret.as_bytes()),
    )
    .map_err(|e| e.to_string())
}

pub fn decode_user(settings: &Settings, token: &str) -> Option<CurrentUser> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(settings.jwt_secret.as_bytes()),
        &validation,
    );

    match decoded {
        Ok(data) => data.claims.into_user(),
        Err(e) => {
            tracing::debug!(error = %e, "rejected auth token");
            None
        }
    }
}
