//! Upload form: file picker, selected file, progress bar, error line, submit
use iced::widget::{button, column, progress_bar, row, text};
use iced::alignment::Horizontal;
use iced::{Alignment, Color, Element, Length};

use crate::state::Gallery;
use crate::Message;

/// Red used for the error line
const ERROR_COLOR: Color = Color::from_rgb(0.93, 0.33, 0.33);

pub fn view(gallery: &Gallery) -> Element<'_, Message> {
    let selected = match gallery.draft() {
        Some(draft) => text(draft.file_name.as_str()),
        None => text("No file chosen"),
    };

    let picker = row![
        button("Choose image")
            .on_press_maybe((!gallery.is_uploading()).then_some(Message::PickFile))
            .padding(10),
        selected.size(14),
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    let mut form = column![picker].spacing(12);

    if gallery.is_uploading() {
        form = form.push(
            progress_bar(0.0..=100.0, f32::from(gallery.progress())).height(Length::Fixed(12.0)),
        );
    }

    if !gallery.error().is_empty() {
        form = form.push(text(gallery.error()).size(14).color(ERROR_COLOR));
    }

    let label = if gallery.is_uploading() { "Uploading..." } else { "Upload" };
    form.push(
        button(text(label).width(Length::Fill).align_x(Horizontal::Center))
            .on_press_maybe(gallery.can_submit().then_some(Message::Submit))
            .style(button::success)
            .width(Length::Fill)
            .padding(10),
    )
    .into()
}
