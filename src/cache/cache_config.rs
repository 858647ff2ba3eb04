//! Configuración de cache
//!
//! Claves usadas en el almacenamiento persistente.

/// Clave de la wishlist (lista serializada de vehículos)
pub const WISHLIST_KEY: &str = "wishlistCars";

/// Clave de la caché legacy de reservas
pub const LEGACY_RESERVATIONS_KEY: &str = "reservations";

/// Generador de claves con prefijo para backends compartidos
#[derive(Debug, Clone)]
pub struct CacheKeys {
    prefix: String,
}

impl CacheKeys {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    /// Clave completa con prefijo
    pub fn make_key(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}:storage:{}", self.prefix, key)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_key() {
        assert_eq!(CacheKeys::new("autogo").make_key(WISHLIST_KEY), "autogo:storage:wishlistCars");
        assert_eq!(CacheKeys::new("").make_key(WISHLIST_KEY), "wishlistCars");
    }
}
