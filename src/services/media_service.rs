//! Subida de imágenes de vehículos

use tracing::debug;

use crate::clients::{MediaUploader, UploadedFile};
use crate::utils::errors::{bad_request_error, AppResult};

/// Tamaño máximo aceptado para una imagen
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

pub async fn upload_vehicle_image(uploader: &dyn MediaUploader, file: UploadedFile) -> AppResult<String> {
    if file.bytes.is_empty() {
        return Err(bad_request_error("Image file is empty"));
    }
    if file.bytes.len() > MAX_IMAGE_BYTES {
        return Err(bad_request_error("Image file is too large"));
    }
    if let Some(content_type) = file.content_type.as_deref() {
        if !content_type.starts_with("image/") {
            return Err(bad_request_error("Only image files are accepted"));
        }
    }

    debug!("🖼️ Subiendo imagen {}", file.file_name);
    Ok(uploader.upload(file).await?)
}
