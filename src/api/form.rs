//! Request bodies that may be JSON or `multipart/form-data`.

use axum::{
    Json,
    extract::{FromRequest, Multipart, Request},
    http::header,
};
use serde_json::{Map, Value};

use super::ApiError;
use crate::models::MovieFields;
use crate::services::Upload;

/// Movie fields plus the optional `poster` attachment.
#[derive(Debug)]
pub struct MovieForm {
    pub fields: MovieFields,
    pub poster: Option<Upload>,
}

impl<S> FromRequest<S> for MovieForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (values, poster) = if is_multipart(&req) {
            let multipart = Multipart::from_request(req, state).await?;
            let mut form = read_multipart(multipart, "poster").await?;
            (form.values, form.files.pop())
        } else {
            let Json(value) = Json::<Value>::from_request(req, state).await?;
            let Value::Object(values) = value else {
                return Err(ApiError::validation("Request body must be a JSON object"));
            };
            (values, None)
        };

        Ok(Self {
            fields: MovieFields::from_wire(&values)?,
            poster,
        })
    }
}

/// Decoded multipart body: text fields as JSON strings, files from one field.
pub struct MultipartForm {
    pub values: Map<String, Value>,
    pub files: Vec<Upload>,
}

/// Reads every part. Parts named `file_field` that carry a file name become
/// uploads; every other part is read as text.
pub async fn read_multipart(
    mut multipart: Multipart,
    file_field: &str,
) -> Result<MultipartForm, ApiError> {
    let mut values = Map::new();
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        if name == file_field
            && let Some(original_name) = field.file_name().map(str::to_string)
        {
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await?;

            // browsers send an empty part when no file was chosen
            if original_name.is_empty() && bytes.is_empty() {
                continue;
            }

            files.push(Upload {
                field: name,
                original_name,
                content_type,
                bytes,
            });
        } else if !name.is_empty() {
            let text = field.text().await?;
            values.insert(name, Value::String(text));
        }
    }

    Ok(MultipartForm { values, files })
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.to_ascii_lowercase().starts_with("multipart/form-data"))
}
