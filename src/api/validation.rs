//! Input limits applied by handlers before the core is called

use crate::domain::DomainError;

pub const MAX_NAME_LEN: usize = 20;
pub const MAX_EMAIL_LEN: usize = 120;
pub const MAX_TITLE_LEN: usize = 25;
pub const MAX_AUTHOR_LEN: usize = 25;
pub const MAX_SUMMARY_LEN: usize = 3500;

const PHOTO_EXTENSIONS: [&str; 2] = ["jpg", "png"];

/// Reject blank values and values longer than `max_len` characters.
pub fn require_text(field: &str, value: &str, max_len: usize) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{} is required", field)));
    }
    if value.chars().count() > max_len {
        return Err(DomainError::Validation(format!(
            "{} must be at most {} characters",
            field, max_len
        )));
    }
    Ok(())
}

/// Photo references must point at a jpg or png image.
pub fn check_photo(photo: &str) -> Result<(), DomainError> {
    let allowed = photo
        .rsplit_once('.')
        .map(|(_, ext)| PHOTO_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false);

    if allowed {
        Ok(())
    } else {
        Err(DomainError::Validation(
            "photo must be a .jpg or .png image".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text() {
        assert!(require_text("title", "Dune", MAX_TITLE_LEN).is_ok());
        assert!(require_text("title", "   ", MAX_TITLE_LEN).is_err());
        assert!(require_text("title", &"x".repeat(26), MAX_TITLE_LEN).is_err());
        // Limits count characters, not bytes
        assert!(require_text("name", "Émilie Zoë Ångström", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn test_check_photo() {
        assert!(check_photo("/static/images/3f9a.jpg").is_ok());
        assert!(check_photo("cover.PNG").is_ok());
        assert!(check_photo("cover.gif").is_err());
        assert!(check_photo("cover").is_err());
    }
}
