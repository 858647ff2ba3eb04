use reqwest::{Response, StatusCode};
use serde_json::Value;
use thiserror::Error;

/// Errores de los clientes HTTP externos
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// Fallo de red, timeout o respuesta ilegible
    #[error("Transport error: {0}")]
    Transport(String),

    /// El servidor respondió con un código de error
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Falta la configuración necesaria; no se hizo ninguna petición
    #[error("{0} is not configured")]
    NotConfigured(&'static str),
}

impl ClientError {
    /// Mensaje mostrado al usuario: el del servidor tal cual, o el de transporte
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Transport(message)
            | ClientError::Server { message, .. }
            | ClientError::InvalidResponse(message) => message.clone(),
            ClientError::NotConfigured(name) => format!("{} is not configured", name),
        }
    }

    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            ClientError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Convertir una respuesta no exitosa en error, conservando el mensaje del servidor
    pub(crate) async fn from_response(response: Response) -> Self {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        ClientError::Server {
            status: status.as_u16(),
            message: server_message(status, &body),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            ClientError::Transport(format!("Request timed out: {}", error))
        } else if error.is_decode() {
            ClientError::InvalidResponse(error.to_string())
        } else {
            ClientError::Transport(error.to_string())
        }
    }
}

/// Extraer el mensaje de error de un cuerpo de respuesta.
///
/// Acepta `{"message": ...}`, `{"error": ...}`, un string JSON o texto plano.
/// Sin cuerpo útil se usa "Request failed with status code N".
pub(crate) fn server_message(status: StatusCode, body: &str) -> String {
    let body = body.trim();
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|value| match value {
        Value::String(text) => Some(text),
        Value::Object(map) => ["message", "error", "title"]
            .iter()
            .find_map(|field| map.get(*field).and_then(Value::as_str).map(str::to_string)),
        _ => None,
    });

    from_json
        .filter(|message| !message.trim().is_empty())
        .or_else(|| (!body.is_empty() && !body.starts_with('{')).then(|| body.to_string()))
        .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()))
}
