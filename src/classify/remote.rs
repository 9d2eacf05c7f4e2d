//! HTTP classifier backed by the prediction endpoint

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tokio::task;
use tracing::{debug, info, warn};

use super::{Classifier, ClassifyError, Prediction};
use crate::intake::EncodedImage;

/// Multipart field the endpoint reads the image from
pub const UPLOAD_FIELD: &str = "image";

/// Filename sent with the image part
pub const UPLOAD_FILE_NAME: &str = "image.jpg";

/// Error body the backend sends alongside non-2xx statuses
#[derive(Debug, Deserialize)]
struct BackendError {
    error: String,
}

/// Classifier that uploads the image to a remote `/predict` endpoint
pub struct RemoteClassifier {
    client: reqwest::Client,
    endpoint: String,
}

impl RemoteClassifier {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Build the multipart body. Transcoding is CPU-bound, so it runs on a
    /// blocking thread.
    async fn payload(image: &EncodedImage) -> Result<Form, ClassifyError> {
        let image = image.clone();
        let jpeg = task::spawn_blocking(move || image.to_jpeg())
            .await
            .map_err(|e| ClassifyError::Payload(format!("Task join error: {}", e)))?
            .map_err(|e| ClassifyError::Payload(e.to_string()))?;

        let part = Part::bytes(jpeg)
            .file_name(UPLOAD_FILE_NAME)
            .mime_str("image/jpeg")
            .map_err(|e| ClassifyError::Payload(e.to_string()))?;

        Ok(Form::new().part(UPLOAD_FIELD, part))
    }
}

#[async_trait]
impl Classifier for RemoteClassifier {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn predict(&self, image: &EncodedImage) -> Result<Prediction, ClassifyError> {
        let form = Self::payload(image).await?;

        info!("🔍 Sending image to {} for classification", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            if let Ok(backend) = serde_json::from_slice::<BackendError>(&body) {
                warn!("⚠️  Backend error: {}", backend.error);
            }
            return Err(ClassifyError::Remote {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response.bytes().await?;
        let prediction = Prediction::parse(&body)?;
        debug!(
            "Received classification result: {} ({:.3})",
            prediction.disease, prediction.confidence
        );

        Ok(prediction)
    }
}
