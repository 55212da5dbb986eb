//! Tab strip and toolbars

use iced::widget::{button, container, row, text};
use iced::{Element, Length};

use crate::state::store::Store;
use crate::Message;

/// The row of tab buttons; the selected tab is drawn with the primary style.
pub fn tab_strip(store: &Store, selected: usize) -> Element<'_, Message> {
    let mut strip = row![].spacing(2);
    for (index, category) in store.categories().iter().enumerate() {
        let style = if index == selected {
            button::primary
        } else {
            button::secondary
        };
        strip = strip.push(
            button(text(&category.name).size(14))
                .style(style)
                .padding(6)
                .on_press(Message::TabSelected(index)),
        );
    }
    container(strip).width(Length::Fill).into()
}

/// Global toolbar: add a tab, remove the current one.
pub fn tab_toolbar<'a>() -> Element<'a, Message> {
    row![
        button(text("Add Tab").size(14))
            .padding(6)
            .on_press(Message::AddTab),
        button(text("Remove Current Tab").size(14))
            .padding(6)
            .on_press(Message::RemoveCurrentTab),
    ]
    .spacing(8)
    .into()
}

/// Per-tab toolbar: the one import action.
pub fn category_toolbar<'a>() -> Element<'a, Message> {
    row![button(text("Load GDD").size(14))
        .padding(6)
        .on_press(Message::ImportDocument)]
    .into()
}
