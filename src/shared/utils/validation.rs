use std::collections::HashSet;
use url::Url;

use crate::shared::errors::AppError;

pub struct Validator;

impl Validator {
    /// Parse an absolute http(s) image URL whose file extension is allow-listed.
    ///
    /// The extension is taken from the path only, so query strings and
    /// fragments never affect the check.
    pub fn validate_image_url(
        image_url: &str,
        allowed_extensions: &HashSet<String>,
    ) -> Result<Url, AppError> {
        if image_url.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Image URL cannot be empty".to_string(),
            ));
        }

        let parsed = Url::parse(image_url.trim())?;
        match parsed.scheme() {
            "http" | "https" => {}
            other => {
                return Err(AppError::InvalidInput(format!(
                    "Unsupported URL scheme '{}' (expected http or https)",
                    other
                )))
            }
        }
        if parsed.host_str().is_none() {
            return Err(AppError::InvalidInput("Image URL has no host".to_string()));
        }

        let extension = Self::extension_of(&parsed).ok_or_else(|| {
            AppError::InvalidInput("Image URL has no file extension".to_string())
        })?;
        if !allowed_extensions.contains(&extension) {
            return Err(AppError::InvalidInput(format!(
                "File extension '.{}' is not allowed",
                extension
            )));
        }

        Ok(parsed)
    }

    pub fn validate_result_count(count: u32) -> Result<(), AppError> {
        if count == 0 {
            return Err(AppError::InvalidInput(
                "Result count must be positive".to_string(),
            ));
        }
        if count > 100 {
            return Err(AppError::InvalidInput(
                "Result count cannot exceed 100".to_string(),
            ));
        }
        Ok(())
    }

    /// Lowercased extension of the last path segment
    fn extension_of(url: &Url) -> Option<String> {
        let segment = url.path_segments()?.last()?;
        let (stem, extension) = segment.rsplit_once('.')?;
        if stem.is_empty() || extension.is_empty() {
            return None;
        }
        Some(extension.to_ascii_lowercase())
    }
}
