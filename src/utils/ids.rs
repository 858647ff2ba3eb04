//! Identificadores del backend
//!
//! El backend REST asigna los ids y, según el origen de los datos, los
//! devuelve como string JSON o como número. Internamente siempre son `String`.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(text) => text,
            RawId::Integer(value) => value.to_string(),
            RawId::Float(value) => value.to_string(),
        }
    }
}

/// Deserializar un id aceptando string o número
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

/// Id suelto (por ejemplo dentro de un array JSON de ids)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BackendId(#[serde(deserialize_with = "string_or_number")] pub String);

/// Generar id temporal para una reserva creada en el cliente
pub fn temporary_id() -> String {
    chrono::Utc::now().timestamp_millis().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(deserialize_with = "string_or_number")]
        id: String,
    }

    #[test]
    fn test_string_or_number() {
        let text: Holder = serde_json::from_str(r#"{"id":"7"}"#).unwrap();
        assert_eq!(text.id, "7");

        let number: Holder = serde_json::from_str(r#"{"id":7}"#).unwrap();
        assert_eq!(number.id, "7");
    }

    #[test]
    fn test_mixed_id_array() {
        let ids: Vec<BackendId> = serde_json::from_str(r#"["1", 2, "abc"]"#).unwrap();
        let ids: Vec<String> = ids.into_iter().map(|id| id.0).collect();
        assert_eq!(ids, vec!["1", "2", "abc"]);
    }

    #[test]
    fn test_temporary_id_is_numeric() {
        let id = temporary_id();
        assert!(id.parse::<i64>().is_ok());
    }
}
