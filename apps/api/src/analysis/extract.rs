//! Reading uploaded resumes out of multipart bodies.

use std::collections::HashMap;

use axum::extract::Multipart;
use bytes::Bytes;
use tracing::{debug, warn};

use crate::errors::AppError;

pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const FILE_FIELD: &str = "file";

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn is_pdf(&self) -> bool {
        self.content_type == "application/pdf"
            || self.filename.to_ascii_lowercase().ends_with(".pdf")
    }
}

/// A multipart form: its text fields plus the one `file` part.
#[derive(Debug, Default)]
pub struct UploadForm {
    fields: HashMap<String, String>,
    file: Option<UploadedFile>,
}

impl UploadForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            if name == FILE_FIELD {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await?;
                debug!("received {filename} ({content_type}, {} bytes)", bytes.len());
                form.file = Some(UploadedFile {
                    filename,
                    content_type,
                    bytes,
                });
            } else {
                let value = field.text().await?;
                form.fields.insert(name, value);
            }
        }
        Ok(form)
    }

    pub fn text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    pub fn require_text(&self, name: &str) -> Result<String, AppError> {
        self.text(name)
            .ok_or_else(|| AppError::Validation(format!("{name} is required")))
    }

    pub fn take_file(&mut self) -> Result<UploadedFile, AppError> {
        let file = self
            .file
            .take()
            .ok_or_else(|| AppError::Validation("a resume file is required".to_string()))?;
        if file.bytes.is_empty() {
            return Err(AppError::Validation(format!("{} is empty", file.filename)));
        }
        if file.bytes.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::Validation(format!(
                "{} is larger than {} MB",
                file.filename,
                MAX_UPLOAD_BYTES / (1024 * 1024)
            )));
        }
        Ok(file)
    }
}

/// Plain text of a resume: extracted from PDFs, otherwise read as UTF-8.
pub fn resume_text(file: &UploadedFile) -> Result<String, AppError> {
    let text = if file.is_pdf() {
        pdf_extract::extract_text_from_mem(&file.bytes).map_err(|e| {
            AppError::Validation(format!("Could not read text from {}: {e}", file.filename))
        })?
    } else {
        String::from_utf8(file.bytes.to_vec()).map_err(|_| {
            AppError::Validation(format!(
                "{} is neither a PDF nor UTF-8 text",
                file.filename
            ))
        })?
    };

    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(AppError::Validation(format!(
            "{} contains no readable text",
            file.filename
        )));
    }
    Ok(text)
}

/// [`resume_text`] on the blocking pool; PDF parsing is CPU-bound and can
/// panic on hostile input, which surfaces here as a rejected upload.
pub async fn resume_text_off_thread(file: &UploadedFile) -> Result<String, AppError> {
    let file = file.clone();
    let filename = file.filename.clone();
    tokio::task::spawn_blocking(move || resume_text(&file))
        .await
        .map_err(|e| {
            warn!("text extraction of {filename} aborted: {e}");
            AppError::Validation(format!("Could not read text from {filename}"))
        })?
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, content_type: &str, bytes: &'static [u8]) -> UploadedFile {
        UploadedFile {
            filename: name.to_string(),
            content_type: content_type.to_string(),
            bytes: Bytes::from_static(bytes),
        }
    }

    #[test]
    fn test_plain_text_resume_is_trimmed() {
        let f = file("cv.txt", "text/plain", b"\n  Jane Doe\nRust engineer  \n");
        assert_eq!(resume_text(&f).unwrap(), "Jane Doe\nRust engineer");
    }

    #[test]
    fn test_binary_non_pdf_is_rejected() {
        let f = file("cv.docx", "application/octet-stream", &[0xff, 0xfe, 0x00, 0x81]);
        assert!(matches!(resume_text(&f), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_blank_text_is_rejected() {
        let f = file("cv.txt", "text/plain", b"   \n ");
        assert!(matches!(resume_text(&f), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_pdf_detection_uses_type_or_extension() {
        assert!(file("CV.PDF", "application/octet-stream", b"").is_pdf());
        assert!(file("resume", "application/pdf", b"").is_pdf());
        assert!(!file("resume.txt", "text/plain", b"").is_pdf());
    }

    #[test]
    fn test_corrupt_pdf_is_a_validation_error() {
        let f = file("cv.pdf", "application/pdf", b"definitely not a pdf");
        assert!(matches!(resume_text(&f), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_oversized_file_is_rejected() {
        let mut form = UploadForm::default();
        form.file = Some(UploadedFile {
            filename: "cv.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            bytes: Bytes::from(vec![b'x'; MAX_UPLOAD_BYTES + 1]),
        });
        assert!(matches!(form.take_file(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_form_requires_file_and_fields() {
        let mut form = UploadForm::default();
        form.fields.insert("position".to_string(), "  ".to_string());
        assert!(form.require_text("position").is_err());
        assert!(form.take_file().is_err());
    }
}
