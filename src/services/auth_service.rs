use bcrypt::{hash, verify, DEFAULT_COST};
use tracing::{info, warn};

use crate::config::{ConfigError, EnvironmentConfig};
use crate::models::auth::{LoginRequest, LoginResponse, UserInfo, UserRole};
use crate::services::jwt_service::JwtService;
use crate::utils::errors::{AppError, AppResult};

/// Contraseña del admin de desarrollo cuando no hay hash configurado
const DEV_ADMIN_PASSWORD: &str = "admin123";

/// Servicio de autenticación del panel de admin
pub struct AuthService {
    jwt_service: JwtService,
    admin_email: String,
    password_hash: String,
}

impl AuthService {
    pub fn from_config(config: &EnvironmentConfig) -> Result<Self, ConfigError> {
        let password_hash = match &config.admin_password_hash {
            Some(hash) => hash.clone(),
            None if config.is_development() => {
                warn!("⚠️ ADMIN_PASSWORD_HASH no definido, usando credenciales de desarrollo");
                hash(DEV_ADMIN_PASSWORD, DEFAULT_COST).map_err(|_| ConfigError::Invalid {
                    name: "ADMIN_PASSWORD_HASH",
                    value: "<generated>".to_string(),
                })?
            }
            None => return Err(ConfigError::Missing("ADMIN_PASSWORD_HASH")),
        };

        Ok(Self::with_credentials(
            config.admin_email.clone(),
            password_hash,
            JwtService::new(&config.jwt_secret, config.jwt_expiration),
        ))
    }

    pub fn with_credentials(admin_email: String, password_hash: String, jwt_service: JwtService) -> Self {
        Self {
            jwt_service,
            admin_email,
            password_hash,
        }
    }

    /// Autentica al admin y emite un JWT
    pub fn authenticate(&self, request: &LoginRequest) -> AppResult<LoginResponse> {
        let email_ok = request.email.trim().eq_ignore_ascii_case(&self.admin_email);
        let password_ok = verify(&request.password, &self.password_hash).unwrap_or(false);

        if !email_ok || !password_ok {
            warn!("🔒 Intento de login fallido para {}", request.email.trim());
            return Err(AppError::Unauthorized("Invalid email or password".to_string()));
        }

        let user = UserInfo {
            email: self.admin_email.clone(),
            name: "Admin".to_string(),
            role: UserRole::Admin,
        };
        let (token, expires_at) = self.jwt_service.generate_access_token(&user)?;

        info!("🔓 Admin {} autenticado", user.email);
        Ok(LoginResponse {
            token,
            user,
            expires_at,
        })
    }

    /// Valida un token Bearer y exige rol admin
    pub fn authorize_admin(&self, token: &str) -> AppResult<UserInfo> {
        let user = self.jwt_service.user_from_token(token)?;
        if user.role != UserRole::Admin {
            return Err(AppError::Unauthorized("Admin role required".to_string()));
        }
        Ok(user)
    }
}

#[cfg(test)]
pub(crate) fn test_auth_service() -> AuthService {
    AuthService::with_credentials(
        "admin@autogo.com".to_string(),
        hash("admin123", 4).unwrap(),
        JwtService::new("test-secret", 3600),
    )
}
