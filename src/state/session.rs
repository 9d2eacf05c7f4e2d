/// Analysis session owned by the application
///
/// Holds the single active image, the outstanding request token and the
/// "current result" slot. The view reads it by reference; only `update`
/// mutates it.

use thiserror::Error;

use super::data::{DiagnosisResult, UploadedImage};
use crate::classify::ClassifyError;
use crate::intake::{EncodedImage, ValidationError};

/// Shown for every classification failure. Details go to the log.
pub const ANALYSIS_FAILED_MESSAGE: &str =
    "An error occurred during image analysis. Please try again.";

/// Identifies one classification request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Why an analysis could not start
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BeginError {
    #[error("no image has been uploaded")]
    NoImage,

    #[error("an analysis is already in progress")]
    Busy,
}

/// What the result panel should show
#[derive(Debug, Clone, Copy)]
pub enum ResultState<'a> {
    Idle,
    Loading,
    Ready(&'a DiagnosisResult),
}

#[derive(Debug, Default)]
pub struct Session {
    image: Option<UploadedImage>,
    pending: Option<RequestToken>,
    result: Option<DiagnosisResult>,
    /// Inline message under the uploader (rejected file)
    intake_error: Option<String>,
    /// Generic message shown after a failed analysis
    analysis_error: Option<String>,
    next_token: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the active image. Clears the previous result and errors, and
    /// supersedes any request still in flight.
    pub fn upload(&mut self, image: UploadedImage) {
        self.image = Some(image);
        self.result = None;
        self.intake_error = None;
        self.analysis_error = None;
        self.pending = None;
    }

    /// Record a rejected file. Nothing else changes.
    pub fn reject_upload(&mut self, error: &ValidationError) {
        self.intake_error = Some(error.to_string());
    }

    /// Start an analysis of the active image.
    pub fn begin_analysis(&mut self) -> Result<(RequestToken, EncodedImage), BeginError> {
        if self.pending.is_some() {
            return Err(BeginError::Busy);
        }
        let image = self.image.as_ref().ok_or(BeginError::NoImage)?;

        self.next_token += 1;
        let token = RequestToken(self.next_token);
        self.pending = Some(token);
        self.intake_error = None;
        self.analysis_error = None;

        Ok((token, image.encoded.clone()))
    }

    /// Deliver the outcome of a request.
    ///
    /// Returns `false` when the token is stale (superseded by an upload) and
    /// the outcome was dropped. Loading ends on both success and failure.
    pub fn finish_analysis(
        &mut self,
        token: RequestToken,
        outcome: Result<DiagnosisResult, ClassifyError>,
    ) -> bool {
        if self.pending != Some(token) {
            return false;
        }
        self.pending = None;

        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.analysis_error = None;
            }
            Err(_) => {
                self.result = None;
                self.analysis_error = Some(ANALYSIS_FAILED_MESSAGE.to_string());
            }
        }
        true
    }

    pub fn image(&self) -> Option<&UploadedImage> {
        self.image.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    #[cfg(test)]
    pub fn pending(&self) -> Option<RequestToken> {
        self.pending
    }

    pub fn result(&self) -> Option<&DiagnosisResult> {
        self.result.as_ref()
    }

    pub fn intake_error(&self) -> Option<&str> {
        self.intake_error.as_deref()
    }

    pub fn analysis_error(&self) -> Option<&str> {
        self.analysis_error.as_deref()
    }

    pub fn result_state(&self) -> ResultState<'_> {
        if self.is_busy() {
            ResultState::Loading
        } else if let Some(result) = &self.result {
            ResultState::Ready(result)
        } else {
            ResultState::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::catalog::Disease;
    use crate::test_support::png_upload;

    fn mange() -> DiagnosisResult {
        DiagnosisResult::from_catalog(Disease::Mange, Disease::Mange.entry(), 0.82)
    }

    #[test]
    fn test_begin_without_image() {
        let mut session = Session::new();
        assert_eq!(session.begin_analysis().unwrap_err(), BeginError::NoImage);
        assert!(!session.is_busy());
    }

    #[test]
    fn test_second_trigger_is_rejected_while_busy() {
        let mut session = Session::new();
        session.upload(png_upload("a.png"));

        let (token, _) = session.begin_analysis().unwrap();
        assert!(session.is_busy());
        assert_eq!(session.begin_analysis().unwrap_err(), BeginError::Busy);

        assert!(session.finish_analysis(token, Ok(mange())));
        assert!(session.begin_analysis().is_ok());
    }

    #[test]
    fn test_success_stores_result_and_clears_loading() {
        let mut session = Session::new();
        session.upload(png_upload("a.png"));

        let (token, _) = session.begin_analysis().unwrap();
        assert!(matches!(session.result_state(), ResultState::Loading));

        session.finish_analysis(token, Ok(mange()));
        assert!(!session.is_busy());
        match session.result_state() {
            ResultState::Ready(result) => assert_eq!(result.disease(), Disease::Mange),
            other => panic!("expected ready, got {other:?}"),
        }
    }

    #[test]
    fn test_failure_clears_loading_and_shows_generic_message() {
        let mut session = Session::new();
        session.upload(png_upload("a.png"));

        let (token, _) = session.begin_analysis().unwrap();
        let error = ClassifyError::Remote {
            status: 500,
            status_text: "Internal Server Error".into(),
        };
        assert!(session.finish_analysis(token, Err(error)));

        assert!(!session.is_busy());
        assert!(session.result().is_none());
        assert_eq!(session.analysis_error(), Some(ANALYSIS_FAILED_MESSAGE));
        assert!(matches!(session.result_state(), ResultState::Idle));
    }

    #[test]
    fn test_upload_supersedes_request_in_flight() {
        let mut session = Session::new();
        session.upload(png_upload("first.png"));
        let (stale, _) = session.begin_analysis().unwrap();

        session.upload(png_upload("second.png"));
        assert!(!session.is_busy());

        assert!(!session.finish_analysis(stale, Ok(mange())));
        assert!(session.result().is_none());

        let (fresh, _) = session.begin_analysis().unwrap();
        assert_ne!(stale, fresh);
        assert!(session.finish_analysis(fresh, Ok(mange())));
        assert!(session.result().is_some());
    }

    #[test]
    fn test_upload_replaces_image_and_discards_result() {
        let mut session = Session::new();
        session.upload(png_upload("first.png"));
        let (token, _) = session.begin_analysis().unwrap();
        session.finish_analysis(token, Ok(mange()));

        session.upload(png_upload("second.png"));
        assert_eq!(session.image().unwrap().file_name, "second.png");
        assert!(session.result().is_none());
    }

    #[test]
    fn test_rejected_upload_leaves_state_untouched() {
        let mut session = Session::new();
        session.upload(png_upload("keep.png"));
        let (token, _) = session.begin_analysis().unwrap();

        session.reject_upload(&ValidationError::InvalidFileType {
            file_name: "notes.txt".into(),
            mime_type: "text/plain".into(),
        });

        assert!(session.intake_error().unwrap().contains("notes.txt"));
        assert_eq!(session.image().unwrap().file_name, "keep.png");
        assert!(session.is_busy());
        assert!(session.finish_analysis(token, Ok(mange())));
    }

    #[test]
    fn test_begin_clears_stale_intake_error() {
        let mut session = Session::new();
        session.upload(png_upload("rex.png"));
        session.reject_upload(&ValidationError::Empty {
            file_name: "empty.png".into(),
        });
        assert!(session.intake_error().is_some());

        session.begin_analysis().unwrap();
        assert!(session.intake_error().is_none());
    }
}
