use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use storage::models::UserRole;
use uuid::Uuid;

use crate::error::WebError;

/// Claims issued by the login service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: UserRole,
    pub exp: usize,
}

/// Verified caller, inserted as a request extension by `require_auth`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl AuthUser {
    pub fn require_admin(&self) -> Result<(), WebError> {
        if self.role == UserRole::Admin {
            Ok(())
        } else {
            Err(WebError::Forbidden("admin access required".to_string()))
        }
    }
}

#[derive(Clone)]
pub struct JwtKeys {
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtKeys {
    pub fn from_secret(secret: &str) -> Self {
        Self {
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(token, &self.decoding, &self.validation).map(|data| data.claims)
    }
}

pub async fn require_auth(
    State(keys): State<JwtKeys>,
    mut req: Request,
    next: Next,
) -> Result<Response, WebError> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(WebError::Unauthorized)?;

    let claims = keys.verify(token.trim()).map_err(|e| {
        tracing::warn!("Invalid bearer token: {}", e);
        WebError::Unauthorized
    })?;

    req.extensions_mut().insert(AuthUser {
        user_id: claims.sub,
        role: claims.role,
    });

    Ok(next.run(req).await)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    pub(crate) const SECRET: &str = "test-secret";

    pub(crate) fn token_for(user_id: Uuid, role: UserRole, secret: &str) -> String {
        let claims = Claims {
            sub: user_id,
            role,
            exp: (chrono::Utc::now().timestamp() + 3600) as usize,
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    #[test]
    fn test_verify_accepts_own_tokens() {
        let keys = JwtKeys::from_secret(SECRET);
        let user = Uuid::new_v4();
        let claims = keys.verify(&token_for(user, UserRole::User, SECRET)).unwrap();
        assert_eq!(claims.sub, user);
        assert_eq!(claims.role, UserRole::User);
    }

    #[test]
    fn test_verify_rejects_foreign_signature() {
        let keys = JwtKeys::from_secret(SECRET);
        let token = token_for(Uuid::new_v4(), UserRole::Admin, "other-secret");
        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let keys = JwtKeys::from_secret(SECRET);
        let claims = Claims {
            sub: Uuid::new_v4(),
            role: UserRole::User,
            exp: (chrono::Utc::now().timestamp() - 3600) as usize,
        };
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes())).unwrap();
        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn test_require_admin() {
        let admin = AuthUser { user_id: Uuid::nil(), role: UserRole::Admin };
        let user = AuthUser { user_id: Uuid::nil(), role: UserRole::User };
        assert!(admin.require_admin().is_ok());
        assert!(user.require_admin().is_err());
    }
}
