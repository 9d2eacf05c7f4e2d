/// Image upload panel
///
/// Shows either an empty drop zone or the preview of the active image.
/// Files can be dropped anywhere on the window; the panel highlights while
/// a drag hovers.
use iced::widget::{button, column, container, text, Image};
use iced::{border, Alignment, ContentFit, Element, Length, Theme};

use crate::state::data::UploadedImage;
use crate::Message;

const PREVIEW_HEIGHT: f32 = 240.0;

pub fn view<'a>(
    image: Option<&'a UploadedImage>,
    drop_hover: bool,
    error: Option<&'a str>,
) -> Element<'a, Message> {
    let body: Element<'a, Message> = match image {
        Some(image) => column![
            Image::new(image.preview.handle())
                .width(Length::Fill)
                .height(Length::Fixed(PREVIEW_HEIGHT))
                .content_fit(ContentFit::Contain),
            text(&image.file_name).size(14).style(text::secondary),
            button("Change Image")
                .on_press(Message::PickFile)
                .style(button::secondary)
                .width(Length::Fill)
                .padding(8),
            button("Copy as Data URL")
                .on_press(Message::CopyDataUrl)
                .style(button::text)
                .padding(4),
        ]
        .spacing(10)
        .align_x(Alignment::Center)
        .into(),
        None => column![
            text("Upload an image").size(20),
            text("Drag and drop or click to browse").style(text::secondary),
            button("Select Image").on_press(Message::PickFile).padding(10),
        ]
        .spacing(12)
        .padding(32)
        .align_x(Alignment::Center)
        .into(),
    };

    let zone = container(body)
        .padding(16)
        .width(Length::Fill)
        .center_x(Length::Fill)
        .style(move |theme: &Theme| drop_zone_style(theme, drop_hover));

    column![zone]
        .push_maybe(error.map(|message| text(message).size(14).style(text::danger)))
        .spacing(8)
        .into()
}

fn drop_zone_style(theme: &Theme, drop_hover: bool) -> container::Style {
    let palette = theme.extended_palette();
    let (color, width) = if drop_hover {
        (palette.primary.strong.color, 2.0)
    } else {
        (palette.background.strong.color, 1.0)
    };

    container::Style {
        background: Some(palette.background.weak.color.into()),
        border: border::color(color).width(width).rounded(8.0),
        ..container::Style::default()
    }
}
