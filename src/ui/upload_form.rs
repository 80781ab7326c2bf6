/// Upload form, shown in owner mode only
use iced::widget::{button, column, container, row, text, text_input};
use iced::{Alignment, Element, Length};

use crate::app::Message;
use crate::state::FormDraft;

const FORM_WIDTH: f32 = 560.0;

pub fn upload_form(draft: &FormDraft) -> Element<'_, Message> {
    let image_label = draft
        .image
        .as_ref()
        .map(|image| image.file_name.as_str())
        .unwrap_or("No file selected");

    let submit_label = if draft.uploading { "Uploading..." } else { "Upload" };

    let content = column![
        text("Title").size(14),
        text_input("Title", &draft.title)
            .on_input(Message::TitleChanged)
            .on_submit(Message::Submit)
            .padding(8),
        text("Description").size(14),
        text_input("Description", &draft.description)
            .on_input(Message::DescriptionChanged)
            .padding(8),
        text("Image").size(14),
        row![
            button("Choose Image").on_press(Message::PickImage).padding(8),
            text(image_label).size(14),
        ]
        .spacing(12)
        .align_y(Alignment::Center),
        // Disabled while a request is in flight
        button(text(submit_label))
            .on_press_maybe((!draft.uploading).then_some(Message::Submit))
            .padding(10),
    ]
    .spacing(8);

    container(content)
        .max_width(FORM_WIDTH)
        .width(Length::Fill)
        .padding(24)
        .style(container::rounded_box)
        .into()
}
