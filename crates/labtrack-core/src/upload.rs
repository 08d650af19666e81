//! # Document Upload
//!
//! Client-side validation of documents before they are sent to `/upload`.

use crate::LabTrackError;
use crate::primitives::{MAX_CATEGORY_LENGTH, MAX_TITLE_LENGTH, MIN_UPLOAD_CONTENT_LENGTH};
use serde::{Deserialize, Serialize};

/// A document as posted to the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadDocument {
    pub title: String,
    pub content: String,
    pub category: String,
}

impl UploadDocument {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            category: category.into(),
        }
    }

    /// Check the document before upload.
    ///
    /// Lengths are counted in characters, not bytes.
    pub fn validate(&self) -> Result<(), LabTrackError> {
        check_text("title", &self.title, MAX_TITLE_LENGTH)?;
        check_text("category", &self.category, MAX_CATEGORY_LENGTH)?;

        let actual = self.content.trim().chars().count();
        if actual < MIN_UPLOAD_CONTENT_LENGTH {
            return Err(LabTrackError::ContentTooShort {
                min: MIN_UPLOAD_CONTENT_LENGTH,
                actual,
            });
        }
        Ok(())
    }
}

fn check_text(field: &'static str, value: &str, max: usize) -> Result<(), LabTrackError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(LabTrackError::EmptyField(field));
    }
    if value.chars().count() > max {
        return Err(LabTrackError::FieldTooLong { field, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(len: usize) -> String {
        "é".repeat(len)
    }

    #[test]
    fn content_boundary_is_fifty_characters() {
        let doc = UploadDocument::new("SOP-12", body(49), "procedures");
        assert_eq!(
            doc.validate(),
            Err(LabTrackError::ContentTooShort { min: 50, actual: 49 })
        );
        let doc = UploadDocument::new("SOP-12", body(50), "procedures");
        assert_eq!(doc.validate(), Ok(()));
    }

    #[test]
    fn blank_title_and_category_rejected() {
        let doc = UploadDocument::new("  ", body(60), "procedures");
        assert_eq!(doc.validate(), Err(LabTrackError::EmptyField("title")));
        let doc = UploadDocument::new("SOP-12", body(60), "");
        assert_eq!(doc.validate(), Err(LabTrackError::EmptyField("category")));
    }

    #[test]
    fn overlong_title_rejected() {
        let doc = UploadDocument::new("t".repeat(MAX_TITLE_LENGTH + 1), body(60), "x");
        assert!(matches!(
            doc.validate(),
            Err(LabTrackError::FieldTooLong { field: "title", .. })
        ));
    }
}
