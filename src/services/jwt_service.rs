use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::models::auth::{JwtClaims, UserInfo, UserRole};
use crate::utils::errors::AppError;

/// Servicio JWT
pub struct JwtService {
    algorithm: Algorithm,
    token_duration: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new(secret: &str, expiration_secs: u64) -> Self {
        Self {
            algorithm: Algorithm::HS256,
            token_duration: Duration::seconds(expiration_secs as i64),
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Genera un token de acceso y devuelve también su expiración
    pub fn generate_access_token(&self, user_info: &UserInfo) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let exp = now + self.token_duration;

        let claims = JwtClaims {
            sub: user_info.email.clone(),
            name: user_info.name.clone(),
            role: user_info.role.as_str().to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map(|token| (token, exp))
            .map_err(|e| AppError::Internal(format!("Error generating access token: {}", e)))
    }

    /// Valida y decodifica un token (firma y expiración)
    pub fn validate_token(&self, token: &str) -> Result<JwtClaims, AppError> {
        let validation = Validation::new(self.algorithm);

        decode::<JwtClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
    }

    /// Usuario contenido en un token válido
    pub fn user_from_token(&self, token: &str) -> Result<UserInfo, AppError> {
        let claims = self.validate_token(token)?;
        let role: UserRole = claims
            .role
            .parse()
            .map_err(|_| AppError::Unauthorized("Invalid role in token".to_string()))?;

        Ok(UserInfo {
            email: claims.sub,
            name: claims.name,
            role,
        })
    }
}
