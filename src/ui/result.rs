/// Diagnosis result panel
///
/// Pure rendering over the session's `ResultState`; keeps no state of its own.
use chrono::Local;
use iced::widget::{canvas, column, container, horizontal_space, row, text, Column};
use iced::{border, Element, Length, Theme};

use super::meter::ConfidenceMeter;
use crate::state::data::DiagnosisResult;
use crate::state::session::ResultState;
use crate::Message;

/// At or above this, the confidence badge is rendered with high emphasis
pub const HIGH_CONFIDENCE: f64 = 0.7;

pub const DISCLAIMER: &str = "This is an automated screening and should not replace professional \
    veterinary advice. Please consult a veterinarian for proper diagnosis and treatment.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceLevel {
    High,
    Low,
}

impl ConfidenceLevel {
    pub fn of(confidence: f64) -> Self {
        if confidence >= HIGH_CONFIDENCE {
            ConfidenceLevel::High
        } else {
            ConfidenceLevel::Low
        }
    }
}

/// "82% Confidence"
pub fn confidence_label(confidence: f64) -> String {
    format!("{}% Confidence", (confidence * 100.0).round() as u32)
}

/// Build the result panel for the current state
pub fn view(state: ResultState<'_>) -> Element<'_, Message> {
    match state {
        ResultState::Idle => card(
            column![
                text("No diagnosis yet").size(20),
                text("Upload a photo of the affected skin, then click Analyze Image.")
                    .style(text::secondary),
            ]
            .spacing(8),
        ),
        ResultState::Loading => card(
            column![
                text("Analyzing Image...").size(22),
                text("This may take a few moments").style(text::secondary),
            ]
            .spacing(8),
        ),
        ResultState::Ready(result) => card(diagnosis(result)),
    }
}

fn diagnosis(result: &DiagnosisResult) -> Column<'_, Message> {
    let level = ConfidenceLevel::of(result.confidence());

    let header = row![
        text("Diagnosis Result").size(24),
        horizontal_space(),
        badge(confidence_label(result.confidence()), level),
    ]
    .align_y(iced::Alignment::Center);

    let analyzed_at = result
        .analyzed_at()
        .with_timezone(&Local)
        .format("Analyzed %Y-%m-%d %H:%M")
        .to_string();

    let symptoms = Column::with_children(
        result
            .symptoms()
            .iter()
            .map(|symptom| text(format!("•  {}", symptom)).into()),
    )
    .spacing(4);

    column![
        header,
        text(analyzed_at).size(13).style(text::secondary),
        canvas(ConfidenceMeter {
            confidence: result.confidence(),
        })
        .width(Length::Fill)
        .height(Length::Fixed(8.0)),
        section("Disease Identified", text(result.disease().label()).size(22).into()),
        section("Common Symptoms", symptoms.into()),
        section("Treatment Suggestions", text(result.treatment()).into()),
        disclaimer(),
    ]
    .spacing(18)
}

fn section<'a>(title: &'a str, body: Element<'a, Message>) -> Element<'a, Message> {
    column![text(title).size(18).style(text::primary), body]
        .spacing(6)
        .into()
}

fn badge<'a>(label: String, level: ConfidenceLevel) -> Element<'a, Message> {
    container(text(label).size(14))
        .padding([4, 10])
        .style(move |theme: &Theme| {
            let palette = theme.extended_palette();
            let pair = match level {
                ConfidenceLevel::High => palette.primary.strong,
                ConfidenceLevel::Low => palette.secondary.weak,
            };
            container::Style {
                background: Some(pair.color.into()),
                text_color: Some(pair.text),
                border: border::rounded(12.0),
                ..container::Style::default()
            }
        })
        .into()
}

fn disclaimer<'a>() -> Element<'a, Message> {
    container(text(DISCLAIMER).size(13))
        .padding(12)
        .width(Length::Fill)
        .style(|theme: &Theme| {
            let palette = theme.extended_palette();
            container::Style {
                background: Some(palette.background.weak.color.into()),
                text_color: Some(palette.background.weak.text),
                border: border::color(palette.danger.base.color).width(1.0).rounded(6.0),
                ..container::Style::default()
            }
        })
        .into()
}

fn card<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content)
        .padding(24)
        .width(Length::Fill)
        .style(container::rounded_box)
        .into()
}
