//! Formulario de contacto: validación y envío al webhook

use tracing::info;

use crate::clients::Notifier;
use crate::models::ContactMessage;
use crate::utils::errors::AppResult;

pub async fn send_contact(notifier: &dyn Notifier, message: ContactMessage) -> AppResult<ContactMessage> {
    let message = message.validated()?;
    notifier.contact_message(&message).await?;
    info!("✉️ Mensaje de contacto de {} enviado", message.email);
    Ok(message)
}
