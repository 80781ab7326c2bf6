/// User interface module
///
/// - Card grid for the gallery (cards.rs)
/// - Owner-only upload form (upload_form.rs)
/// - Native alert/confirm/file dialogs (dialogs.rs)

pub mod cards;
pub mod dialogs;
pub mod upload_form;

use iced::widget::{column, container, text};
use iced::{Alignment, Color, Element, Length};

use crate::app::Message;
use cards::CardModel;

/// Which parts of the window are shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewPlan {
    pub owner_notice: bool,
    pub upload_form: bool,
    pub cards: Vec<CardModel>,
}

const ACCENT: Color = Color { r: 0.96, g: 0.45, b: 0.71, a: 1.0 };
const MUTED: Color = Color { r: 0.61, g: 0.64, b: 0.69, a: 1.0 };

pub fn header<'a>(heading: &'a str, tagline: &'a str) -> Element<'a, Message> {
    column![
        text(heading).size(48).color(ACCENT),
        text(tagline).size(16).color(MUTED),
    ]
    .spacing(8)
    .align_x(Alignment::Center)
    .into()
}

/// Persistent notice for visitors
pub fn owner_notice<'a>() -> Element<'a, Message> {
    container(text("Viewing only: uploading and deleting artwork is disabled.").size(14).color(MUTED))
        .padding(12)
        .width(Length::Shrink)
        .style(container::rounded_box)
        .into()
}
