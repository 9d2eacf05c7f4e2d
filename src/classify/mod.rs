//! Classification client
//!
//! Sends an encoded image to a classifier backend, then joins the predicted
//! label against the disease catalog:
//! - `RemoteClassifier`: multipart `POST` to the prediction endpoint
//! - `SimulatedClassifier`: in-process stand-in returning random labels
//!
//! One call per user action. No retry, no caching, no timeout beyond what
//! the transport does natively.

pub mod error;
pub mod remote;
pub mod simulated;

pub use error::ClassifyError;
pub use remote::RemoteClassifier;
pub use simulated::SimulatedClassifier;

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use crate::config::{Backend, Settings};
use crate::intake::EncodedImage;
use crate::state::catalog;
use crate::state::data::DiagnosisResult;

/// Raw prediction as returned by a backend, before the catalog join
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Prediction {
    pub disease: String,
    pub confidence: f64,
}

impl Prediction {
    /// Parse a JSON response body. Extra fields are ignored.
    pub fn parse(body: &[u8]) -> Result<Self, ClassifyError> {
        let prediction: Prediction = serde_json::from_slice(body)
            .map_err(|e| ClassifyError::MalformedResponse(e.to_string()))?;

        if !prediction.confidence.is_finite() || !(0.0..=1.0).contains(&prediction.confidence) {
            return Err(ClassifyError::MalformedResponse(format!(
                "confidence {} outside 0..1",
                prediction.confidence
            )));
        }

        Ok(prediction)
    }
}

/// A backend able to predict a disease label for an image
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    async fn predict(&self, image: &EncodedImage) -> Result<Prediction, ClassifyError>;
}

/// Classify an image and join the prediction with the catalog.
pub async fn classify(
    classifier: &dyn Classifier,
    image: &EncodedImage,
) -> Result<DiagnosisResult, ClassifyError> {
    let prediction = classifier.predict(image).await?;
    join(prediction)
}

/// Build a result from a prediction. Fails if the label is not in the catalog.
pub fn join(prediction: Prediction) -> Result<DiagnosisResult, ClassifyError> {
    let (disease, entry) =
        catalog::lookup(&prediction.disease).ok_or_else(|| ClassifyError::UnknownDisease {
            name: prediction.disease.clone(),
        })?;

    Ok(DiagnosisResult::from_catalog(disease, entry, prediction.confidence))
}

/// Build the classifier selected in the settings
pub fn from_settings(settings: &Settings) -> Arc<dyn Classifier> {
    match settings.backend {
        Backend::Remote => Arc::new(RemoteClassifier::new(settings.endpoint.clone())),
        Backend::Simulated => Arc::new(SimulatedClassifier::new(settings.simulated_delay)),
    }
}
