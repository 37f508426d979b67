use crate::{
    config::AuthConfig,
    error::{ApiError, Result},
};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::OffsetDateTime;
use uuid::Uuid;

/// Claims of an identity-provider access token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user_id)
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// Validates bearer tokens issued by the identity provider.
///
/// Issuing is only needed by tests and tooling; the provider owns the real
/// sign-in and refresh flows.
pub struct JWTService {
    config: Arc<AuthConfig>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JWTService {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        match config.audience.as_deref() {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Issue a token for `user_id` valid for `ttl`
    pub fn generate_token(
        &self,
        user_id: Uuid,
        email: Option<&str>,
        ttl: time::Duration,
    ) -> Result<String> {
        let now = OffsetDateTime::now_utc().unix_timestamp();

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.map(str::to_string),
            aud: self.config.audience.clone(),
            iat: now,
            exp: now + ttl.whole_seconds(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| ApiError::Internal(e.into()))
    }

    /// Validate and decode a bearer token
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => ApiError::ExpiredToken,
                _ => ApiError::InvalidToken(e.to_string()),
            },
        )?;

        Ok(token_data.claims)
    }

    /// Extract user_id from claims
    pub fn user_id_from_claims(claims: &Claims) -> Result<Uuid> {
        Uuid::parse_str(&claims.sub)
            .map_err(|e| ApiError::InvalidToken(format!("Invalid user_id: {}", e)))
    }
}
