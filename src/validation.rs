//! Form-layer validation. Everything here runs before a network call is
//! made; the adapter itself forwards input as-is.

use std::sync::OnceLock;

use regex::Regex;

use crate::complaints::NewComplaint;
use crate::error::{ApiError, ApiResult};
use crate::models::complaint::DISTRICTS;

const MIN_TITLE_LEN: usize = 5;
const MIN_DESCRIPTION_LEN: usize = 10;

fn phone_pattern() -> &'static Regex {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE.get_or_init(|| Regex::new(r"^\+?[0-9]{7,15}$").unwrap())
}

/// Checks the public submission form fields.
pub fn validate_submission(complaint: &NewComplaint) -> ApiResult<()> {
    if complaint.title.trim().chars().count() < MIN_TITLE_LEN {
        return Err(ApiError::Validation(format!(
            "title must be at least {} characters",
            MIN_TITLE_LEN
        )));
    }
    if complaint.description.trim().chars().count() < MIN_DESCRIPTION_LEN {
        return Err(ApiError::Validation(format!(
            "description must be at least {} characters",
            MIN_DESCRIPTION_LEN
        )));
    }
    if !DISTRICTS.contains(&complaint.district.as_str()) {
        return Err(ApiError::Validation(format!(
            "unknown district {:?}",
            complaint.district
        )));
    }
    if !phone_pattern().is_match(complaint.phone_number.trim()) {
        return Err(ApiError::Validation(
            "phone number must be 7-15 digits, optionally prefixed with +".to_string(),
        ));
    }
    Ok(())
}

/// Accept/refuse both require non-empty operator text. Enforced here, in the
/// calling layer, so that an empty solution or reason never reaches the wire.
pub fn validate_resolution_text(field: &str, text: &str) -> ApiResult<()> {
    if text.trim().is_empty() {
        return Err(ApiError::Validation(format!("{} must not be empty", field)));
    }
    Ok(())
}
