//! Request DTOs.

use axum::extract::Multipart;
use axum::extract::multipart::Field;

use clipvault_core::error::AppError;
use clipvault_core::result::AppResult;
use clipvault_core::traits::storage::bytes_stream;
use clipvault_service::IncomingFile;

/// The fields of a `POST /api/send` multipart form.
#[derive(Debug, Default)]
pub struct SendForm {
    /// `text` field.
    pub text: Option<String>,
    /// `maxReceivers` field, unparsed.
    pub max_receivers: Option<String>,
    /// `expiryMinutes` field, unparsed.
    pub expiry_minutes: Option<String>,
    /// Every `file` part that carried a filename, in form order.
    pub files: Vec<IncomingFile>,
}

impl SendForm {
    /// Read the whole form. Unknown fields are ignored.
    ///
    /// File parts without a filename are what browsers send for an empty
    /// file input; they are skipped.
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::validation(format!("Multipart error: {}", e.body_text())))?
        {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                "text" => form.text = Some(field_text(field).await?),
                "maxReceivers" => form.max_receivers = Some(field_text(field).await?),
                "expiryMinutes" => form.expiry_minutes = Some(field_text(field).await?),
                "file" => {
                    let Some(filename) = field.file_name().filter(|n| !n.is_empty()) else {
                        continue;
                    };
                    let filename = filename.to_string();
                    let content_type = field.content_type().map(String::from);
                    let data = field.bytes().await.map_err(|e| {
                        AppError::validation(format!("Read error: {}", e.body_text()))
                    })?;
                    form.files.push(IncomingFile {
                        filename,
                        content_type,
                        body: bytes_stream(data),
                    });
                }
                _ => {}
            }
        }

        Ok(form)
    }
}

async fn field_text(field: Field<'_>) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::validation(format!("Read error: {}", e.body_text())))
}
