/// Confidence gauge
/// Horizontal bar filled to the model's confidence, with a tick at the
/// high-confidence threshold
use iced::widget::canvas::{self, Path, Stroke};
use iced::{Point, Rectangle, Size};

use super::result::{ConfidenceLevel, HIGH_CONFIDENCE};
use crate::Message;

/// Gauge for one confidence value in 0.0..=1.0
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceMeter {
    pub confidence: f64,
}

impl ConfidenceMeter {
    /// Width of the filled part for a gauge `width` pixels wide
    pub fn fill_width(&self, width: f32) -> f32 {
        self.confidence.clamp(0.0, 1.0) as f32 * width
    }
}

impl canvas::Program<Message> for ConfidenceMeter {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: iced::mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let palette = theme.extended_palette();

        // Track
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), palette.background.strong.color);

        // Fill, colored by emphasis
        let fill = match ConfidenceLevel::of(self.confidence) {
            ConfidenceLevel::High => palette.primary.strong.color,
            ConfidenceLevel::Low => palette.secondary.base.color,
        };
        frame.fill_rectangle(
            Point::ORIGIN,
            Size::new(self.fill_width(bounds.width), bounds.height),
            fill,
        );

        // Threshold tick
        let x = HIGH_CONFIDENCE as f32 * bounds.width;
        let tick = Path::line(Point::new(x, 0.0), Point::new(x, bounds.height));
        frame.stroke(
            &tick,
            Stroke::default()
                .with_color(palette.background.base.text)
                .with_width(2.0),
        );

        vec![frame.into_geometry()]
    }
}
