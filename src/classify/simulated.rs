//! In-process classifier for running without a backend

use async_trait::async_trait;
use rand::Rng;
use std::ops::Range;
use std::time::Duration;
use tracing::debug;

use super::{Classifier, ClassifyError, Prediction};
use crate::intake::EncodedImage;
use crate::state::catalog::Disease;

/// Confidence values the simulation draws from
pub const SIMULATED_CONFIDENCE: Range<f64> = 0.65..0.99;

/// Picks a random catalog label after a fixed delay. The image is ignored.
pub struct SimulatedClassifier {
    delay: Duration,
}

impl SimulatedClassifier {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    fn draw() -> Prediction {
        let mut rng = rand::thread_rng();
        let disease = Disease::ALL[rng.gen_range(0..Disease::ALL.len())];

        Prediction {
            disease: disease.label().to_string(),
            confidence: rng.gen_range(SIMULATED_CONFIDENCE),
        }
    }
}

#[async_trait]
impl Classifier for SimulatedClassifier {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn predict(&self, image: &EncodedImage) -> Result<Prediction, ClassifyError> {
        let prediction = Self::draw();
        debug!(
            "Simulating inference on {} bytes, answering {} in {:?}",
            image.bytes().len(),
            prediction.disease,
            self.delay
        );

        tokio::time::sleep(self.delay).await;
        Ok(prediction)
    }
}
