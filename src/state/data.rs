/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the intake, classification and UI layers.

use chrono::{DateTime, Utc};

use super::catalog::{CatalogEntry, Disease};
use crate::intake::{EncodedImage, Preview};

/// A user-selected image, ready to preview and to classify.
///
/// Replaced wholesale whenever the user picks or drops another file.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// Filename only (e.g., "rex_paw.jpg")
    pub file_name: String,
    /// Raw bytes plus their MIME type
    pub encoded: EncodedImage,
    /// Downscaled preview for display
    pub preview: Preview,
}

/// The outcome of one successful classification.
///
/// Only built by joining a prediction against the disease catalog, so the
/// disease is always a catalog key. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosisResult {
    disease: Disease,
    confidence: f64,
    symptoms: Vec<String>,
    treatment: String,
    analyzed_at: DateTime<Utc>,
}

impl DiagnosisResult {
    /// Copy a looked-up catalog entry into a new result
    pub(crate) fn from_catalog(disease: Disease, entry: &CatalogEntry, confidence: f64) -> Self {
        Self {
            disease,
            confidence,
            symptoms: entry.symptoms.iter().map(|s| s.to_string()).collect(),
            treatment: entry.treatment.to_string(),
            analyzed_at: Utc::now(),
        }
    }

    pub fn disease(&self) -> Disease {
        self.disease
    }

    /// Model confidence in 0.0..=1.0
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn symptoms(&self) -> &[String] {
        &self.symptoms
    }

    pub fn treatment(&self) -> &str {
        &self.treatment
    }

    pub fn analyzed_at(&self) -> DateTime<Utc> {
        self.analyzed_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_catalog_copies_entry() {
        for disease in Disease::ALL {
            let entry = disease.entry();
            let result = DiagnosisResult::from_catalog(disease, entry, 0.5);

            assert_eq!(result.disease(), disease);
            assert_eq!(result.symptoms(), entry.symptoms);
            assert_eq!(result.treatment(), entry.treatment);
        }
    }

    #[test]
    fn test_from_catalog_uses_given_entry() {
        let entry = CatalogEntry {
            symptoms: &["Dry patches"],
            treatment: "Moisturize",
        };
        let result = DiagnosisResult::from_catalog(Disease::Allergy, &entry, 0.6);

        assert_eq!(result.symptoms(), ["Dry patches"]);
        assert_eq!(result.treatment(), "Moisturize");
        assert_ne!(result.treatment(), Disease::Allergy.entry().treatment);
    }
}
