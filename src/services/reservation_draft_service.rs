//! Borrador de reserva
//!
//! Sólo memoria: se pierde al reiniciar el proceso y se borra cuando la
//! reserva pasa al pago.

use tokio::sync::RwLock;
use tracing::debug;

use crate::models::ReservationDraft;

#[derive(Debug, Default)]
pub struct ReservationDraftHolder {
    draft: RwLock<Option<ReservationDraft>>,
}

impl ReservationDraftHolder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reemplaza el borrador completo (no fusiona campos)
    pub async fn set_draft(&self, draft: ReservationDraft) {
        debug!("📝 Borrador de reserva actualizado");
        *self.draft.write().await = Some(draft);
    }

    pub async fn clear_draft(&self) {
        *self.draft.write().await = None;
    }

    pub async fn draft(&self) -> Option<ReservationDraft> {
        self.draft.read().await.clone()
    }
}
