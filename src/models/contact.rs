//! Mensaje del formulario de contacto

use serde::{Deserialize, Serialize};
use validator::{ValidationError, ValidationErrors};

use crate::utils::validation::{into_result, push_field_error, validate_email, validate_not_empty};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactMessage {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

impl ContactMessage {
    pub fn validated(self) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if validate_not_empty(&self.name).is_err() {
            push_field_error(&mut errors, "name", ValidationError::new("required"), "Name is required");
        }
        if validate_not_empty(&self.email).is_err() {
            push_field_error(&mut errors, "email", ValidationError::new("required"), "Email is required");
        } else if let Err(e) = validate_email(&self.email) {
            push_field_error(&mut errors, "email", e, "Invalid email format");
        }
        if validate_not_empty(&self.message).is_err() {
            push_field_error(&mut errors, "message", ValidationError::new("required"), "Message is required");
        }

        into_result(
            Self {
                name: self.name.trim().to_string(),
                email: self.email.trim().to_string(),
                message: self.message.trim().to_string(),
            },
            errors,
        )
    }
}
