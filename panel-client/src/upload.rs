//! Multipart bodies
//!
//! `reqwest::multipart::Form` is consumed when sent, so a request that may
//! be replayed after a token refresh keeps its parts as owned bytes and
//! rebuilds the form for each attempt.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use shared::error::{AppError, ErrorCode};

use crate::{ClientError, ClientResult};

/// A file attached to a multipart field
#[derive(Debug, Clone)]
pub struct Upload {
    pub field: String,
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    /// Build from in-memory bytes; the MIME type is guessed from the name
    pub fn from_bytes(
        field: impl Into<String>,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> ClientResult<Self> {
        let file_name = file_name.into();
        if file_name.trim().is_empty() {
            return Err(AppError::new(ErrorCode::NoFilename).into());
        }
        if bytes.is_empty() {
            return Err(AppError::new(ErrorCode::EmptyFile)
                .with_detail("file", file_name)
                .into());
        }
        let mime = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Ok(Self {
            field: field.into(),
            file_name,
            mime,
            bytes,
        })
    }

    /// Read a file from disk
    pub async fn from_path(field: impl Into<String>, path: impl AsRef<Path>) -> ClientResult<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ClientError::from(AppError::new(ErrorCode::NoFilename)))?
            .to_string();
        let bytes = tokio::fs::read(path).await?;
        Self::from_bytes(field, file_name, bytes)
    }

    fn to_part(&self) -> ClientResult<Part> {
        Ok(Part::bytes(self.bytes.clone())
            .file_name(self.file_name.clone())
            .mime_str(&self.mime)?)
    }
}

/// Text fields plus optional files, replayable
#[derive(Debug, Clone, Default)]
pub struct MultipartBody {
    fields: Vec<(String, String)>,
    files: Vec<Upload>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(name, value)` pairs
    pub fn from_fields<K: Into<String>>(fields: Vec<(K, String)>) -> Self {
        Self {
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            files: Vec::new(),
        }
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn file(mut self, upload: Upload) -> Self {
        self.files.push(upload);
        self
    }

    pub fn maybe_file(self, upload: Option<Upload>) -> Self {
        match upload {
            Some(u) => self.file(u),
            None => self,
        }
    }

    pub fn has_files(&self) -> bool {
        !self.files.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Build a fresh form for one send attempt
    pub fn to_form(&self) -> ClientResult<Form> {
        let mut form = Form::new();
        for (name, value) in &self.fields {
            form = form.text(name.clone(), value.clone());
        }
        for upload in &self.files {
            form = form.part(upload.field.clone(), upload.to_part()?);
        }
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_guess() {
        let u = Upload::from_bytes("factura", "F-001.pdf", vec![1, 2, 3]).unwrap();
        assert_eq!(u.mime, "application/pdf");
        let u = Upload::from_bytes("archivo", "clientes.unknownext", vec![1]).unwrap();
        assert_eq!(u.mime, "application/octet-stream");
    }

    #[test]
    fn test_rejects_empty() {
        let err = Upload::from_bytes("recibo", "r.pdf", Vec::new()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::EmptyFile);
        let err = Upload::from_bytes("recibo", " ", vec![1]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::NoFilename);
    }

    #[tokio::test]
    async fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rut.png");
        tokio::fs::write(&path, b"\x89PNG").await.unwrap();
        let u = Upload::from_path("rut", &path).await.unwrap();
        assert_eq!(u.file_name, "rut.png");
        assert_eq!(u.mime, "image/png");
        assert_eq!(u.bytes.len(), 4);
    }

    #[test]
    fn test_body_is_replayable() {
        let body = MultipartBody::new()
            .text("tipo_gasto", "Transporte")
            .maybe_file(None);
        assert_eq!(body.field("tipo_gasto"), Some("Transporte"));
        assert!(!body.has_files());
        assert!(body.to_form().is_ok());
        assert!(body.to_form().is_ok());
    }
}
