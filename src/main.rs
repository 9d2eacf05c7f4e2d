use iced::widget::{button, column, container, row, scrollable, text};
use iced::{clipboard, event, window, Event, Length, Subscription};
use iced::{Element, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

mod classify;
mod config;
mod intake;
mod state;
mod ui;

#[cfg(test)]
mod test_support;

use classify::{Classifier, ClassifyError};
use config::Settings;
use intake::ValidationError;
use state::data::{DiagnosisResult, UploadedImage};
use state::session::{RequestToken, Session};

/// Log filter used when RUST_LOG is unset
const DEFAULT_LOG_FILTER: &str = "pawscan=info";

/// Extensions offered by the file picker. Validation still sniffs content.
const PICKER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp", "tif", "tiff"];

/// Main application state
struct PawScan {
    /// Active image, outstanding request and current result
    session: Session,
    /// Backend answering analysis requests
    classifier: Arc<dyn Classifier>,
    /// True while a file is dragged over the window
    drop_hover: bool,
    /// Set once the current drag gesture has delivered a file; later files of
    /// the same drop are ignored
    drop_taken: bool,
    /// Sequence number of the most recent file load; older loads are dropped
    intake_seq: u64,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked "Select Image" / "Change Image"
    PickFile,
    /// A file is being dragged over the window
    FileHovered,
    /// The drag left the window without dropping
    FilesHoveredLeft,
    /// A file was dropped on the window (one message per file)
    FileDropped(PathBuf),
    /// Background load of a picked or dropped file finished
    ImageLoaded(u64, Result<UploadedImage, ValidationError>),
    /// User clicked "Copy as Data URL"
    CopyDataUrl,
    /// User clicked "Analyze Image"
    Analyze,
    /// Classification request finished
    AnalysisComplete(RequestToken, Result<DiagnosisResult, ClassifyError>),
}

impl PawScan {
    /// Create a new instance of the application
    fn new(settings: Settings) -> (Self, Task<Message>) {
        let classifier = classify::from_settings(&settings);
        info!(
            "🐕 PawScan initialized with {} classifier ({})",
            classifier.name(),
            settings.endpoint
        );

        (Self::with_classifier(classifier), Task::none())
    }

    fn with_classifier(classifier: Arc<dyn Classifier>) -> Self {
        PawScan {
            session: Session::new(),
            classifier,
            drop_hover: false,
            drop_taken: false,
            intake_seq: 0,
        }
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickFile => {
                // Show the native file picker dialog
                let file = FileDialog::new()
                    .set_title("Select a Photo of the Affected Skin")
                    .add_filter("Images", PICKER_EXTENSIONS)
                    .pick_file();

                match file {
                    Some(path) => self.load(path),
                    None => Task::none(),
                }
            }
            Message::FileHovered => {
                self.drop_hover = true;
                self.drop_taken = false;
                Task::none()
            }
            Message::FilesHoveredLeft => {
                self.drop_hover = false;
                self.drop_taken = false;
                Task::none()
            }
            Message::FileDropped(path) => {
                self.drop_hover = false;
                if self.drop_taken {
                    debug!("Ignoring extra dropped file {}", path.display());
                    return Task::none();
                }
                self.drop_taken = true;
                self.load(path)
            }
            Message::ImageLoaded(seq, result) => {
                self.drop_taken = false;
                if seq != self.intake_seq {
                    debug!("Dropping superseded file load #{}", seq);
                    return Task::none();
                }

                match result {
                    Ok(image) => self.session.upload(image),
                    Err(e) => {
                        warn!("⚠️  Rejected file: {}", e);
                        self.session.reject_upload(&e);
                    }
                }
                Task::none()
            }
            Message::CopyDataUrl => match self.session.image() {
                Some(image) => {
                    info!("📋 Copied {} to the clipboard as a data URL", image.file_name);
                    clipboard::write(image.encoded.data_url())
                }
                None => Task::none(),
            },
            Message::Analyze => match self.session.begin_analysis() {
                Ok((token, image)) => {
                    let classifier = Arc::clone(&self.classifier);
                    info!("⏳ Analyzing image with {} classifier", classifier.name());

                    Task::perform(
                        async move { classify::classify(classifier.as_ref(), &image).await },
                        move |outcome| Message::AnalysisComplete(token, outcome),
                    )
                }
                Err(e) => {
                    debug!("Ignoring analyze request: {}", e);
                    Task::none()
                }
            },
            Message::AnalysisComplete(token, outcome) => {
                match &outcome {
                    Ok(result) => info!(
                        "✅ Diagnosis: {} ({:.1}%)",
                        result.disease(),
                        result.confidence() * 100.0
                    ),
                    Err(e) => error!("❌ Classification error: {}", e),
                }

                if !self.session.finish_analysis(token, outcome) {
                    debug!("Discarded result of a superseded request");
                }
                Task::none()
            }
        }
    }

    /// Load a picked or dropped file in the background
    fn load(&mut self, path: PathBuf) -> Task<Message> {
        self.intake_seq += 1;
        let seq = self.intake_seq;
        info!("📂 Loading {}", path.display());

        Task::perform(intake::submit_file(path), move |result| {
            Message::ImageLoaded(seq, result)
        })
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let busy = self.session.is_busy();

        let header = column![
            text("PawScan").size(40),
            text("Skin condition screening for dogs").style(text::secondary),
        ]
        .spacing(4);

        let analyze = self.session.image().map(|_| {
            button(text(if busy { "Analyzing..." } else { "Analyze Image" }).size(18))
                .on_press_maybe((!busy).then_some(Message::Analyze))
                .width(Length::Fill)
                .padding(12)
        });

        let intake_panel = column![ui::uploader::view(
            self.session.image(),
            self.drop_hover,
            self.session.intake_error(),
        )]
        .push_maybe(analyze)
        .push_maybe(
            self.session
                .analysis_error()
                .map(|message| text(message).style(text::danger)),
        )
        .spacing(16)
        .width(Length::FillPortion(1));

        let result_panel = scrollable(ui::result::view(self.session.result_state()))
            .width(Length::FillPortion(1));

        let content = column![header, row![intake_panel, result_panel].spacing(32)]
            .spacing(24)
            .padding(32);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Listen for files dragged onto the window
    fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, _status, _window| match event {
            Event::Window(window::Event::FileHovered(_)) => Some(Message::FileHovered),
            Event::Window(window::Event::FilesHoveredLeft) => Some(Message::FilesHoveredLeft),
            Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
            _ => None,
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            warn!("⚠️  {}. Falling back to default settings.", e);
            Settings::default()
        }
    };

    iced::application("PawScan", PawScan::update, PawScan::view)
        .subscription(PawScan::subscription)
        .theme(PawScan::theme)
        .window_size((1120.0, 780.0))
        .centered()
        .run_with(move || PawScan::new(settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::SimulatedClassifier;
    use crate::state::catalog::Disease;
    use crate::test_support::png_upload;
    use std::time::Duration;

    fn app() -> PawScan {
        PawScan::with_classifier(Arc::new(SimulatedClassifier::new(Duration::ZERO)))
    }

    fn loaded(app: &mut PawScan, name: &str) {
        app.intake_seq += 1;
        let _ = app.update(Message::ImageLoaded(app.intake_seq, Ok(png_upload(name))));
    }

    #[test]
    fn test_analyze_without_image_is_ignored() {
        let mut app = app();
        let _ = app.update(Message::Analyze);
        assert!(!app.session.is_busy());
    }

    #[test]
    fn test_superseded_file_load_is_dropped() {
        let mut app = app();
        app.intake_seq = 2;

        let _ = app.update(Message::ImageLoaded(1, Ok(png_upload("older.png"))));
        assert!(app.session.image().is_none());

        let _ = app.update(Message::ImageLoaded(2, Ok(png_upload("newer.png"))));
        assert_eq!(app.session.image().unwrap().file_name, "newer.png");
    }

    #[test]
    fn test_rejected_file_is_reported_inline() {
        let mut app = app();
        app.intake_seq = 1;
        let error = intake::submit_bytes("notes.txt", b"hello world".to_vec()).unwrap_err();

        let _ = app.update(Message::ImageLoaded(1, Err(error)));

        assert!(app.session.image().is_none());
        assert!(app.session.intake_error().is_some());
        assert!(!app.session.is_busy());
    }

    #[test]
    fn test_server_error_clears_loading() {
        let mut app = app();
        loaded(&mut app, "rex.png");

        let _ = app.update(Message::Analyze);
        assert!(app.session.is_busy());

        // A second click while busy is ignored
        let token = app.session.pending().unwrap();
        let _ = app.update(Message::Analyze);
        assert_eq!(app.session.pending(), Some(token));

        let error = ClassifyError::Remote {
            status: 500,
            status_text: "Internal Server Error".into(),
        };
        let _ = app.update(Message::AnalysisComplete(token, Err(error)));

        assert!(!app.session.is_busy());
        assert!(app.session.analysis_error().is_some());
        assert!(app.session.result().is_none());
    }

    #[test]
    fn test_result_lands_in_session() {
        let mut app = app();
        loaded(&mut app, "rex.png");

        let (token, _) = app.session.begin_analysis().unwrap();
        let result = classify::join(classify::Prediction {
            disease: "Infection".into(),
            confidence: 0.74,
        })
        .unwrap();
        let _ = app.update(Message::AnalysisComplete(token, Ok(result)));

        assert_eq!(app.session.result().unwrap().disease(), Disease::Infection);
        assert!(!app.drop_hover);
    }

    #[test]
    fn test_first_file_of_a_drop_wins() {
        let mut app = app();
        let _ = app.update(Message::FileHovered);
        let _ = app.update(Message::FileDropped(PathBuf::from("rex.png")));
        let _ = app.update(Message::FileDropped(PathBuf::from("notes.txt")));
        assert_eq!(app.intake_seq, 1);

        let _ = app.update(Message::ImageLoaded(1, Ok(png_upload("rex.png"))));
        assert_eq!(app.session.image().unwrap().file_name, "rex.png");
        assert!(app.session.intake_error().is_none());

        // A new drag gesture is accepted again
        let _ = app.update(Message::FileHovered);
        let _ = app.update(Message::FileDropped(PathBuf::from("bella.png")));
        assert_eq!(app.intake_seq, 2);
    }

    #[test]
    fn test_copy_data_url_without_image_is_noop() {
        let mut app = app();
        let _ = app.update(Message::CopyDataUrl);
        assert!(app.session.image().is_none());
    }

    #[test]
    fn test_drop_hover_tracking() {
        let mut app = app();
        let _ = app.update(Message::FileHovered);
        assert!(app.drop_hover);
        let _ = app.update(Message::FilesHoveredLeft);
        assert!(!app.drop_hover);
    }
}
