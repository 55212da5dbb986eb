//! The per-tab card grid
//!
//! Every document in a category is rendered as a fixed-size card: preview,
//! display name, and the three actions. The grid is a fixed three columns,
//! row-major, and is rebuilt wholesale after every mutation.

use iced::widget::{button, column, container, row, scrollable, text, Space};
use iced::{Alignment, Element, Length};
use iced_aw::ContextMenu;

use crate::preview::{has_image_extension, PreviewCache, PREVIEW_THUMB_SIZE};
use crate::state::data::DocumentRecord;
use crate::state::store::Category;
use crate::Message;

/// Cards per row
const GRID_COLUMNS: usize = 3;

/// Build the scrollable card grid for one category.
pub fn card_grid<'a>(category: &'a Category, previews: &'a PreviewCache) -> Element<'a, Message> {
    if category.documents.is_empty() {
        return container(text("No GDDs in this tab yet. Use \"Load GDD\" to import one."))
            .width(Length::Fill)
            .padding(30)
            .center_x(Length::Fill)
            .into();
    }

    let mut grid = column![].spacing(10).padding(10);
    for (row_index, chunk) in category.documents.chunks(GRID_COLUMNS).enumerate() {
        let mut cards = row![].spacing(10);
        for (col_index, record) in chunk.iter().enumerate() {
            let index = row_index * GRID_COLUMNS + col_index;
            cards = cards.push(card(category, record, index, previews));
        }
        grid = grid.push(cards);
    }

    scrollable(grid).width(Length::Fill).height(Length::Fill).into()
}

/// One card: preview area, bold name, Open/Rename/Remove buttons.
/// Right-clicking anywhere on the card opens a context menu with the same
/// three actions.
fn card<'a>(
    category: &'a Category,
    record: &'a DocumentRecord,
    index: usize,
    previews: &'a PreviewCache,
) -> Element<'a, Message> {
    let content = column![
        preview_area(record, previews),
        text(&record.display_name).size(14).font(iced::font::Font {
            weight: iced::font::Weight::Bold,
            ..iced::font::Font::DEFAULT
        }),
        row![
            action_button("Open", Message::OpenDocument {
                category: category.name.clone(),
                index,
            }),
            action_button("Rename", Message::RenameDocument {
                category: category.name.clone(),
                index,
            }),
            action_button("Remove", Message::RemoveDocument {
                category: category.name.clone(),
                index,
            }),
        ]
        .spacing(4),
    ]
    .spacing(8)
    .align_x(Alignment::Center);

    let underlay = container(content)
        .padding(10)
        .width(220)
        .style(container::bordered_box);

    let menu_category = category.name.clone();
    ContextMenu::new(underlay, move || context_menu(menu_category.clone(), index)).into()
}

/// The right-click menu, carrying the same contract as the card buttons.
fn context_menu<'a>(category: String, index: usize) -> Element<'a, Message> {
    let item = |label, message| {
        button(text(label).size(14))
            .width(Length::Fill)
            .style(button::text)
            .on_press(message)
    };

    container(
        column![
            item("Open GDD", Message::OpenDocument {
                category: category.clone(),
                index,
            }),
            item("Rename GDD", Message::RenameDocument {
                category: category.clone(),
                index,
            }),
            item("Remove GDD from Tab", Message::RemoveDocument { category, index }),
        ]
        .width(180),
    )
    .style(container::bordered_box)
    .into()
}

/// Fixed-size preview slot: a decoded thumbnail for recognized image files,
/// a generic extension placeholder otherwise, inline error text when an
/// image fails to decode.
fn preview_area<'a>(
    record: &'a DocumentRecord,
    previews: &'a PreviewCache,
) -> Element<'a, Message> {
    let (width, height) = PREVIEW_THUMB_SIZE;

    let slot: Element<'a, Message> = if has_image_extension(&record.file_path) {
        match previews.peek(&record.file_path) {
            Some(Ok(handle)) => iced::widget::image(handle.clone())
                .width(width as f32)
                .height(height as f32)
                .into(),
            Some(Err(e)) => text(format!("Failed to load image: {e}"))
                .size(11)
                .style(text::danger)
                .into(),
            // Cache is refilled before every render; an absent entry only
            // happens for a record added in this same frame
            None => Space::new(width as f32, height as f32).into(),
        }
    } else {
        let extension = record.extension();
        let label = if extension.is_empty() {
            "Document".to_string()
        } else {
            format!("Document ({extension})")
        };
        text(label).size(12).into()
    };

    // center_x/center_y also fix the slot's size
    container(slot)
        .center_x(Length::Fixed((width + 40) as f32))
        .center_y(Length::Fixed((height + 20) as f32))
        .style(container::bordered_box)
        .into()
}

/// Small uniform button used for the card's action row.
fn action_button(label: &str, message: Message) -> Element<'_, Message> {
    button(text(label).size(12)).padding(4).on_press(message).into()
}
