//! Image Store
//!
//! The upload collaborator: validates an uploaded image, re-encodes it
//! as JPEG and writes it under the work directory, returning the bare
//! relative path that gets persisted on the product record.

use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use uuid::Uuid;

use crate::utils::AppError;

/// Maximum file size (5MB)
const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Supported image formats
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// JPEG quality for product images
const JPEG_QUALITY: u8 = 85;

/// Relative directory under the work dir; also the path prefix stored
/// on product records and served statically under `/uploads`.
const IMAGES_SUBDIR: &str = "uploads/images";

#[derive(Debug, Clone)]
pub struct ImageStore {
    work_dir: PathBuf,
}

impl ImageStore {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }

    /// Validate, compress and persist one uploaded image. Returns the
    /// stored relative path (`uploads/images/<uuid>.jpg`).
    pub fn save(&self, data: &[u8], original_name: &str) -> Result<String, AppError> {
        if data.is_empty() {
            return Err(AppError::validation("Empty file provided"));
        }

        let ext = PathBuf::from(original_name)
            .extension()
            .and_then(|ext| ext.to_str().map(|s| s.to_lowercase()))
            .ok_or_else(|| {
                AppError::validation(format!("Invalid file extension for: {}", original_name))
            })?;

        validate_image(data, &ext)?;
        let compressed = compress_to_jpeg(data)?;

        let images_dir = self.work_dir.join(IMAGES_SUBDIR);
        fs::create_dir_all(&images_dir)
            .map_err(|e| AppError::internal(format!("Failed to create images directory: {}", e)))?;

        let filename = format!("{}.jpg", Uuid::new_v4());
        let file_path = images_dir.join(&filename);
        fs::write(&file_path, &compressed)
            .map_err(|e| AppError::internal(format!("Failed to save file: {}", e)))?;

        tracing::info!(
            original_name = %original_name,
            size = %compressed.len(),
            file = %filename,
            "Image uploaded successfully"
        );

        Ok(format!("{}/{}", IMAGES_SUBDIR, filename))
    }

    /// Remove a previously stored file, e.g. when the form that
    /// carried it is rejected after the file was written. Missing
    /// files are ignored.
    pub fn remove(&self, rel_path: &str) {
        let path = self.work_dir.join(rel_path);
        if let Err(e) = fs::remove_file(&path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %path.display(), error = %e, "Failed to remove stored image");
            }
        }
    }
}

/// Validate size, extension and decodability
fn validate_image(data: &[u8], ext: &str) -> Result<(), AppError> {
    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::validation(format!(
            "File too large. Maximum size is {} bytes ({}MB)",
            MAX_FILE_SIZE,
            MAX_FILE_SIZE / 1024 / 1024
        )));
    }

    if !SUPPORTED_FORMATS.contains(&ext) {
        return Err(AppError::validation(format!(
            "Unsupported file format '{}'. Supported: {}",
            ext,
            SUPPORTED_FORMATS.join(", ")
        )));
    }

    if let Err(e) = image::load_from_memory(data) {
        return Err(AppError::validation(format!(
            "Invalid image file ({}): {}",
            ext, e
        )));
    }

    Ok(())
}

/// Re-encode as JPEG with the fixed quality setting
fn compress_to_jpeg(data: &[u8]) -> Result<Vec<u8>, AppError> {
    let img = image::load_from_memory(data)
        .map_err(|e| AppError::validation(format!("Invalid image: {}", e)))?;

    let mut buffer = Vec::new();
    let mut cursor = Cursor::new(&mut buffer);
    let rgb_img = img.to_rgb8();
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
    rgb_img
        .write_with_encoder(encoder)
        .map_err(|e| AppError::internal(format!("Failed to compress image: {}", e)))?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_png() -> Vec<u8> {
        let img = image::RgbImage::from_pixel(2, 2, image::Rgb([10, 20, 30]));
        let mut buffer = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
            .unwrap();
        buffer
    }

    #[test]
    fn save_writes_jpeg_under_uploads() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path());

        let rel = store.save(&tiny_png(), "photo.png").unwrap();
        assert!(rel.starts_with("uploads/images/"));
        assert!(rel.ends_with(".jpg"));
        assert!(dir.path().join(&rel).exists());
    }

    #[test]
    fn remove_deletes_stored_file_and_ignores_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path());

        let rel = store.save(&tiny_png(), "photo.png").unwrap();
        assert!(dir.path().join(&rel).exists());

        store.remove(&rel);
        assert!(!dir.path().join(&rel).exists());

        // second removal is a no-op
        store.remove(&rel);
    }

    #[test]
    fn rejects_empty_and_unsupported_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path());

        assert!(store.save(&[], "photo.png").is_err());
        assert!(store.save(&tiny_png(), "photo.gif").is_err());
        assert!(store.save(b"not an image", "photo.png").is_err());
    }
}
