//! Product multipart form handling
//!
//! Admin create/update submissions arrive as multipart forms mixing
//! scalar fields with uploaded files. [`collect_form`] drains the
//! multipart stream (persisting files through the image store as it
//! goes); the builders below turn collected text fields into typed
//! payloads, rejecting unknown field names instead of passing them
//! through.

use std::collections::HashMap;
use std::str::FromStr;

use axum::extract::Multipart;
use rust_decimal::Decimal;
use surrealdb::RecordId;

use crate::db::models::{ProductCreate, ProductUpdate};
use crate::db::repository::parse_record_id;
use crate::media::{ImageStore, MediaResolver};
use crate::utils::AppError;

const IMAGES_FIELD: &str = "images";
const THUMBNAIL_FIELD: &str = "thumbnail";
const EXISTING_IMAGES_FIELD: &str = "existingImages";

/// Scalar fields accepted on create and update
const SCALAR_FIELDS: &[&str] = &[
    "title",
    "description",
    "price",
    "discountPercentage",
    "stockQuantity",
    "category",
    "brand",
];

/// A drained multipart form: text fields by name, plus the stored
/// relative paths of any uploaded files.
#[derive(Debug, Default)]
pub struct ProductForm {
    pub fields: HashMap<String, String>,
    /// Uploaded image paths, in upload order
    pub uploaded_images: Vec<String>,
    /// Uploaded thumbnail path, if a thumbnail file was sent
    pub uploaded_thumbnail: Option<String>,
}

impl ProductForm {
    /// Every file persisted while draining this form. Handlers remove
    /// these when the form is rejected after the files were written.
    pub fn stored_paths(&self) -> Vec<String> {
        self.uploaded_images
            .iter()
            .cloned()
            .chain(self.uploaded_thumbnail.clone())
            .collect()
    }
}

/// Drain a multipart request, persisting file fields through the
/// image store. The `thumbnail` field may be a file (new upload) or a
/// text value (existing public URL); a filename decides which.
pub async fn collect_form(
    mut multipart: Multipart,
    images: &ImageStore,
) -> Result<ProductForm, AppError> {
    let mut form = ProductForm::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(|s| s.to_string()) else {
            return Err(AppError::validation("Unnamed form field"));
        };

        let is_file = field.file_name().is_some();
        match (name.as_str(), is_file) {
            (IMAGES_FIELD, true) => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await?;
                form.uploaded_images.push(images.save(&data, &filename)?);
            }
            (THUMBNAIL_FIELD, true) => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await?;
                form.uploaded_thumbnail = Some(images.save(&data, &filename)?);
            }
            (IMAGES_FIELD, false) => {
                return Err(AppError::validation("images must be file fields"));
            }
            (_, _) => {
                let value = field.text().await?;
                form.fields.insert(name, value);
            }
        }
    }

    Ok(form)
}

fn reject_unknown(fields: &HashMap<String, String>, allowed: &[&str]) -> Result<(), AppError> {
    for name in fields.keys() {
        if !allowed.contains(&name.as_str()) {
            return Err(AppError::validation(format!("Unknown field: {}", name)));
        }
    }
    Ok(())
}

fn parse_decimal(fields: &HashMap<String, String>, name: &str) -> Result<Option<Decimal>, AppError> {
    fields
        .get(name)
        .map(|v| {
            Decimal::from_str(v)
                .map_err(|_| AppError::validation(format!("Invalid number for {}: {}", name, v)))
        })
        .transpose()
}

fn parse_u32(fields: &HashMap<String, String>, name: &str) -> Result<Option<u32>, AppError> {
    fields
        .get(name)
        .map(|v| {
            v.parse::<u32>()
                .map_err(|_| AppError::validation(format!("Invalid number for {}: {}", name, v)))
        })
        .transpose()
}

fn parse_bool(fields: &HashMap<String, String>, name: &str) -> Result<Option<bool>, AppError> {
    fields
        .get(name)
        .map(|v| {
            v.parse::<bool>()
                .map_err(|_| AppError::validation(format!("Invalid boolean for {}: {}", name, v)))
        })
        .transpose()
}

fn parse_link(fields: &HashMap<String, String>, name: &str, table: &str) -> Option<RecordId> {
    fields.get(name).map(|v| parse_record_id(table, v))
}

fn required<T>(value: Option<T>, name: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::validation(format!("Missing required field: {}", name)))
}

/// Build a create payload. Requires every scalar plus at least one
/// uploaded image; the image check runs here, before any store write.
pub fn build_create(
    form: &ProductForm,
    resolver: &MediaResolver,
) -> Result<ProductCreate, AppError> {
    let mut allowed = SCALAR_FIELDS.to_vec();
    allowed.push(THUMBNAIL_FIELD);
    reject_unknown(&form.fields, &allowed)?;

    if form.uploaded_images.is_empty() {
        return Err(AppError::validation("No images uploaded!"));
    }

    // A text thumbnail is an existing public URL; convert back to a
    // stored path so the base URL never reaches storage.
    let thumbnail = form.uploaded_thumbnail.clone().or_else(|| {
        form.fields
            .get(THUMBNAIL_FIELD)
            .map(|v| resolver.to_stored_path(v))
    });

    Ok(ProductCreate {
        title: required(form.fields.get("title").cloned(), "title")?,
        description: required(form.fields.get("description").cloned(), "description")?,
        price: required(parse_decimal(&form.fields, "price")?, "price")?,
        discount_percentage: required(
            parse_decimal(&form.fields, "discountPercentage")?,
            "discountPercentage",
        )?,
        stock_quantity: required(parse_u32(&form.fields, "stockQuantity")?, "stockQuantity")?,
        category: required(
            parse_link(&form.fields, "category", "category"),
            "category",
        )?,
        brand: required(parse_link(&form.fields, "brand", "brand"), "brand")?,
        thumbnail,
        images: form.uploaded_images.clone(),
    })
}

/// Build a partial update payload. Every field optional; images are
/// replaced only when the client touched them (retained list or new
/// uploads), thumbnail follows new-file > existing-URL > unchanged.
pub fn build_update(
    form: &ProductForm,
    resolver: &MediaResolver,
) -> Result<ProductUpdate, AppError> {
    let mut allowed = SCALAR_FIELDS.to_vec();
    allowed.push(THUMBNAIL_FIELD);
    allowed.push(EXISTING_IMAGES_FIELD);
    allowed.push("isDeleted");
    reject_unknown(&form.fields, &allowed)?;

    let images = merge_images(
        form.fields.get(EXISTING_IMAGES_FIELD).map(|s| s.as_str()),
        form.uploaded_images.clone(),
        resolver,
    );

    let thumbnail = form.uploaded_thumbnail.clone().or_else(|| {
        form.fields
            .get(THUMBNAIL_FIELD)
            .map(|v| resolver.to_stored_path(v))
    });

    Ok(ProductUpdate {
        title: form.fields.get("title").cloned(),
        description: form.fields.get("description").cloned(),
        price: parse_decimal(&form.fields, "price")?,
        discount_percentage: parse_decimal(&form.fields, "discountPercentage")?,
        stock_quantity: parse_u32(&form.fields, "stockQuantity")?,
        category: parse_link(&form.fields, "category", "category"),
        brand: parse_link(&form.fields, "brand", "brand"),
        thumbnail,
        images,
        is_deleted: parse_bool(&form.fields, "isDeleted")?,
    })
}

/// Merge rule for the update image list: retained existing paths (in
/// client order) followed by newly uploaded paths (in upload order).
/// A malformed `existingImages` payload degrades to an empty retained
/// set; `None` means the client did not touch images at all.
pub fn merge_images(
    existing_raw: Option<&str>,
    uploaded: Vec<String>,
    resolver: &MediaResolver,
) -> Option<Vec<String>> {
    if existing_raw.is_none() && uploaded.is_empty() {
        return None;
    }

    let retained: Vec<String> = match existing_raw {
        Some(raw) => match serde_json::from_str::<Vec<String>>(raw) {
            Ok(urls) => urls.iter().map(|u| resolver.to_stored_path(u)).collect(),
            Err(e) => {
                tracing::warn!(error = %e, "Invalid existingImages payload, retaining nothing");
                Vec::new()
            }
        },
        None => Vec::new(),
    };

    Some(retained.into_iter().chain(uploaded).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> MediaResolver {
        MediaResolver::new("http://localhost:8000/")
    }

    fn form_with(fields: &[(&str, &str)]) -> ProductForm {
        ProductForm {
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            ..ProductForm::default()
        }
    }

    #[test]
    fn merge_keeps_client_order_then_appends_uploads() {
        let merged = merge_images(
            Some(r#"["http://localhost:8000/a.jpg","http://localhost:8000/b.jpg"]"#),
            vec!["uploads/images/new.jpg".to_string()],
            &resolver(),
        );
        assert_eq!(
            merged,
            Some(vec![
                "a.jpg".to_string(),
                "b.jpg".to_string(),
                "uploads/images/new.jpg".to_string(),
            ])
        );
    }

    #[test]
    fn malformed_existing_images_degrades_to_uploads_only() {
        let merged = merge_images(
            Some("not json"),
            vec!["uploads/images/new.jpg".to_string()],
            &resolver(),
        );
        assert_eq!(merged, Some(vec!["uploads/images/new.jpg".to_string()]));
    }

    #[test]
    fn untouched_images_stay_unchanged() {
        assert_eq!(merge_images(None, Vec::new(), &resolver()), None);
    }

    #[test]
    fn create_requires_at_least_one_image() {
        let form = ProductForm {
            fields: form_with(&[
                ("title", "Chain kit"),
                ("description", "Heavy duty"),
                ("price", "49.99"),
                ("discountPercentage", "5"),
                ("stockQuantity", "12"),
                ("category", "category:c1"),
                ("brand", "brand:b1"),
            ])
            .fields,
            uploaded_images: Vec::new(),
            uploaded_thumbnail: None,
        };
        let err = build_create(&form, &resolver()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn stored_paths_cover_images_and_thumbnail() {
        let form = ProductForm {
            fields: HashMap::new(),
            uploaded_images: vec![
                "uploads/images/a.jpg".to_string(),
                "uploads/images/b.jpg".to_string(),
            ],
            uploaded_thumbnail: Some("uploads/images/t.jpg".to_string()),
        };
        assert_eq!(
            form.stored_paths(),
            vec![
                "uploads/images/a.jpg",
                "uploads/images/b.jpg",
                "uploads/images/t.jpg",
            ]
        );
    }

    #[test]
    fn unknown_scalar_field_is_rejected() {
        let mut form = form_with(&[("title", "Chain kit"), ("adminOverride", "true")]);
        form.uploaded_images.push("uploads/images/a.jpg".to_string());
        let err = build_update(&form, &resolver()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn update_thumbnail_text_field_is_stripped_to_stored_path() {
        let form = form_with(&[(
            "thumbnail",
            "http://localhost:8000/uploads/images/old.jpg",
        )]);
        let update = build_update(&form, &resolver()).unwrap();
        assert_eq!(update.thumbnail.as_deref(), Some("uploads/images/old.jpg"));
        assert_eq!(update.images, None);
    }

    #[test]
    fn uploaded_thumbnail_wins_over_text_field() {
        let mut form = form_with(&[("thumbnail", "http://localhost:8000/old.jpg")]);
        form.uploaded_thumbnail = Some("uploads/images/new.jpg".to_string());
        let update = build_update(&form, &resolver()).unwrap();
        assert_eq!(update.thumbnail.as_deref(), Some("uploads/images/new.jpg"));
    }
}
