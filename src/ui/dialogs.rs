//! Dialog surfaces
//!
//! Confirmation, info, warning and error dialogs are native blocking rfd
//! message boxes; they run to completion inside the update handler, which is
//! the whole concurrency model of this application. Text input (new tab
//! name, rename) has no native dialog, so it is an in-app modal overlay.

use iced::widget::{button, center, column, container, mouse_area, opaque, row, stack, text,
    text_input};
use iced::{Color, Element};
use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

use crate::Message;

/// Blocking info dialog with an OK button.
pub fn info(title: &str, message: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Info)
        .set_title(title)
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}

/// Blocking warning dialog with an OK button.
pub fn warn(title: &str, message: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title(title)
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}

/// Blocking error dialog with an OK button.
pub fn error(title: &str, message: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title(title)
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}

/// Blocking yes/no confirmation. Returns true only on an explicit yes.
pub fn confirm(title: &str, message: &str) -> bool {
    MessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title(title)
        .set_description(message)
        .set_buttons(MessageButtons::YesNo)
        .show()
        == MessageDialogResult::Yes
}

/// What a confirmed text prompt should do.
#[derive(Debug, Clone)]
pub enum PromptKind {
    NewTab,
    RenameDocument { category: String, index: usize },
}

/// State of the in-app modal text prompt.
#[derive(Debug, Clone)]
pub struct TextPrompt {
    pub kind: PromptKind,
    pub title: String,
    pub input: String,
}

impl TextPrompt {
    pub fn new_tab() -> Self {
        TextPrompt {
            kind: PromptKind::NewTab,
            title: "Enter the name of the new tab:".to_string(),
            input: String::new(),
        }
    }

    /// Rename prompt, pre-filled with the current display name.
    pub fn rename(category: String, index: usize, current_name: &str) -> Self {
        TextPrompt {
            kind: PromptKind::RenameDocument { category, index },
            title: format!("New name for '{current_name}':"),
            input: current_name.to_string(),
        }
    }
}

/// Overlay the text prompt on top of the main window content.
/// Clicking the dimmed backdrop cancels, like closing a native dialog.
pub fn modal<'a>(base: Element<'a, Message>, prompt: &'a TextPrompt) -> Element<'a, Message> {
    let body = container(
        column![
            text(&prompt.title).size(16),
            text_input("Name", &prompt.input)
                .on_input(Message::PromptInputChanged)
                .on_submit(Message::PromptConfirmed)
                .padding(8),
            row![
                button(text("OK").size(14))
                    .padding(6)
                    .on_press(Message::PromptConfirmed),
                button(text("Cancel").size(14))
                    .padding(6)
                    .style(button::secondary)
                    .on_press(Message::PromptCancelled),
            ]
            .spacing(8),
        ]
        .spacing(12),
    )
    .width(340)
    .padding(20)
    .style(container::rounded_box);

    let backdrop = mouse_area(center(opaque(body)).style(|_theme| {
        container::Style {
            background: Some(Color::from_rgba(0.0, 0.0, 0.0, 0.6).into()),
            ..container::Style::default()
        }
    }))
    .on_press(Message::PromptCancelled);

    stack![base, opaque(backdrop)].into()
}
