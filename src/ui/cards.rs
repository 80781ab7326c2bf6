/// Gallery grid of artwork cards
use iced::widget::{button, column, container, image, row, text};
use iced::{ContentFit, Element, Length};
use iced_aw::Wrap;
use std::collections::HashMap;

use crate::app::Message;
use crate::state::ArtworkId;

const CARD_WIDTH: f32 = 300.0;
const CARD_IMAGE_HEIGHT: f32 = 256.0;
const GRID_SPACING: f32 = 24.0;

/// Image state of one card
#[derive(Debug, Clone)]
pub enum Preview {
    Ready(image::Handle),
    /// The download failed; the card says so instead of waiting forever
    Unavailable,
}

/// Everything one card shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardModel {
    pub id: ArtworkId,
    pub title: String,
    pub description: String,
    /// Resolved, absolute image address
    pub image_url: String,
    /// Show the delete control
    pub deletable: bool,
}

/// Lay out all cards in a wrapping grid
pub fn gallery_grid<'a>(
    cards: Vec<CardModel>,
    previews: &HashMap<ArtworkId, Preview>,
) -> Element<'a, Message> {
    if cards.is_empty() {
        return container(text("No artworks yet.").size(16))
            .width(Length::Fill)
            .center_x(Length::Fill)
            .into();
    }

    let elements = cards
        .into_iter()
        .map(|model| {
            let preview = previews.get(&model.id).cloned();
            card(model, preview)
        })
        .collect();

    Wrap::with_elements(elements)
        .spacing(GRID_SPACING)
        .line_spacing(GRID_SPACING)
        .into()
}

fn card<'a>(model: CardModel, preview: Option<Preview>) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match preview {
        Some(Preview::Ready(handle)) => image(handle)
            .width(Length::Fill)
            .height(CARD_IMAGE_HEIGHT)
            .content_fit(ContentFit::Cover)
            .into(),
        Some(Preview::Unavailable) => placeholder("Image unavailable"),
        None => placeholder("Loading…"),
    };

    let caption = column![
        text(model.title).size(20),
        text(model.description).size(14),
    ]
    .spacing(4)
    .width(Length::Fill);

    let mut footer = row![caption].spacing(12).padding(16);
    if model.deletable {
        footer = footer.push(
            button(text("Delete").size(14))
                .on_press(Message::Delete(model.id))
                .style(button::danger)
                .padding(6),
        );
    }

    container(column![picture, footer])
        .width(CARD_WIDTH)
        .style(container::rounded_box)
        .into()
}

fn placeholder<'a>(label: &'static str) -> Element<'a, Message> {
    container(text(label).size(14))
        .width(Length::Fill)
        .height(CARD_IMAGE_HEIGHT)
        .center_x(Length::Fill)
        .center_y(CARD_IMAGE_HEIGHT)
        .into()
}
