use anyhow::Result;
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
    RequestPartsExt,
};
use axum_extra::extract::CookieJar;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::settings::Settings;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session";

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    sub: Uuid,
    exp: i64,
    iat: i64,
}

/// The authenticated viewer behind the current request.
///
/// Extract as `Viewer` where identity is required (rejects with 401) or as
/// `Option<Viewer>` where an anonymous request is valid.
#[derive(Debug, Clone, Copy)]
pub struct Viewer {
    pub id: Uuid,
}

pub fn create_token(user_id: Uuid, secret: &str) -> Result<String> {
    let now = Utc::now();
    let claims = SessionClaims {
        sub: user_id,
        exp: (now + Duration::days(7)).timestamp(),
        iat: now.timestamp(),
    };
    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?)
}

/// Decodes a session token into a viewer identity.
/// Expired, forged, or malformed tokens all come back as `None`.
pub fn decrypt(token: &str, secret: &str) -> Option<Viewer> {
    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .ok()
    .map(|data| Viewer {
        id: data.claims.sub,
    })
}

#[async_trait]
impl<S> FromRequestParts<S> for Viewer
where
    S: Send + Sync,
    Settings: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = parts
            .extract::<CookieJar>()
            .await
            .map_err(|_| StatusCode::UNAUTHORIZED)?;

        let settings = Settings::from_ref(state);

        jar.get(SESSION_COOKIE)
            .and_then(|cookie| decrypt(cookie.value(), &settings.session_secret))
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn token_round_trip() {
        let user_id = Uuid::new_v4();
        let token = create_token(user_id, SECRET).unwrap();
        let viewer = decrypt(&token, SECRET).unwrap();
        assert_eq!(viewer.id, user_id);
    }

    #[test]
    fn wrong_secret_is_anonymous() {
        let token = create_token(Uuid::new_v4(), SECRET).unwrap();
        assert!(decrypt(&token, "other-secret").is_none());
    }

    #[test]
    fn garbage_cookie_is_anonymous() {
        assert!(decrypt("not-a-token", SECRET).is_none());
    }

    #[test]
    fn expired_token_is_anonymous() {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: Uuid::new_v4(),
            exp: (now - Duration::hours(2)).timestamp(),
            iat: (now - Duration::days(8)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_ref()),
        )
        .unwrap();
        assert!(decrypt(&token, SECRET).is_none());
    }
}
