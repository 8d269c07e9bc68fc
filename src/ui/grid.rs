//! Grid of uploaded images, three per row, each with a delete button
use iced::widget::{button, column, container, image, row, text, Column, Row, Space};
use iced::{ContentFit, Element, Length};

use crate::state::data::Thumbnail;
use crate::state::Gallery;
use crate::Message;

/// Cells per grid row
const COLUMNS: usize = 3;
/// Height of every thumbnail cell
const CELL_HEIGHT: f32 = 180.0;

pub fn view(gallery: &Gallery) -> Element<'_, Message> {
    if gallery.images().is_empty() {
        return container(text("No images uploaded yet.").size(16))
            .center_x(Length::Fill)
            .padding(20)
            .into();
    }

    let rows = gallery.images().chunks(COLUMNS).map(|chunk| -> Element<Message> {
        let mut cells: Vec<Element<Message>> = chunk.iter().map(|image| cell(gallery, image)).collect();
        // Pad the last row so cells keep the same width
        while cells.len() < COLUMNS {
            cells.push(Space::with_width(Length::FillPortion(1)).into());
        }
        Row::with_children(cells).spacing(12).into()
    });

    Column::with_children(rows.collect::<Vec<Element<Message>>>())
        .spacing(12)
        .into()
}

fn cell<'a>(gallery: &'a Gallery, image_ref: &'a str) -> Element<'a, Message> {
    let picture: Element<Message> = match gallery.thumbnail(image_ref) {
        Some(Thumbnail::Ready(handle)) => image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fixed(CELL_HEIGHT))
            .content_fit(ContentFit::Cover)
            .into(),
        Some(Thumbnail::Failed) => placeholder("Unavailable"),
        Some(Thumbnail::Loading) | None => placeholder("Loading..."),
    };

    let deleting = gallery.is_deleting(image_ref);
    let delete = button(text(if deleting { "Deleting..." } else { "Delete" }).size(12))
        .on_press_maybe((!deleting).then(|| Message::Delete(image_ref.to_string())))
        .style(button::danger)
        .padding([4, 8]);

    column![picture, row![Space::with_width(Length::Fill), delete]]
        .spacing(6)
        .width(Length::FillPortion(1))
        .into()
}

fn placeholder(label: &str) -> Element<'_, Message> {
    container(text(label).size(14))
        .center_x(Length::Fill)
        .center_y(Length::Fixed(CELL_HEIGHT))
        .style(container::bordered_box)
        .into()
}
