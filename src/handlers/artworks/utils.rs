use axum::{body::Bytes, Json};

use crate::database::models::artwork::Artwork;
use crate::error::ApiError;

/// Parse the `{id}` path segment as an artwork id. Only ASCII digits are
/// accepted, so signs and whitespace are rejected before parsing.
pub fn parse_artwork_id(raw: &str) -> Result<i64, ApiError> {
    let invalid = || ApiError::validation_error("id", format!("Artwork id must be an integer, got {:?}", raw));

    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    raw.parse::<i64>().map_err(|_| invalid())
}

/// Decode a request body as an artwork, whatever its `Content-Type` says
pub fn decode_artwork(body: &Bytes) -> Result<Artwork, ApiError> {
    let Json(artwork) = Json::<Artwork>::from_bytes(body)?;
    Ok(artwork)
}
