use iced::widget::{column, container, horizontal_space, row, text};
use iced::{Element, Length, Task, Theme};
use rfd::FileDialog;
use std::collections::HashSet;
use std::path::Path;

mod error;
mod preview;
mod state;
mod ui;

use error::OrganizerError;
use preview::{has_image_extension, PreviewCache};
use state::paths::StorePaths;
use state::store::{RenameOutcome, Store};
use ui::dialogs::{self, PromptKind, TextPrompt};

/// Main application state
struct GddOrganizer {
    /// The persisted store of tabs and document records
    store: Store,
    /// Where the store file and managed assets live
    paths: StorePaths,
    /// Index of the selected tab
    selected: usize,
    /// Decoded card previews, kept alive for the lifetime of their cards
    previews: PreviewCache,
    /// In-app text prompt (new tab / rename), when one is open
    prompt: Option<TextPrompt>,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked a tab in the strip
    TabSelected(usize),
    /// User clicked "Add Tab"
    AddTab,
    /// User clicked "Remove Current Tab"
    RemoveCurrentTab,
    /// User clicked "Load GDD" on the current tab
    ImportDocument,
    /// Open a document with the platform's default application
    OpenDocument { category: String, index: usize },
    /// Start renaming a document (opens the text prompt)
    RenameDocument { category: String, index: usize },
    /// Remove a document from its tab (the file stays on disk)
    RemoveDocument { category: String, index: usize },
    /// Text typed into the open prompt
    PromptInputChanged(String),
    /// Prompt confirmed with OK or Enter
    PromptConfirmed,
    /// Prompt dismissed
    PromptCancelled,
}

impl GddOrganizer {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let paths = StorePaths::default_location();
        // If this fails, the app cannot function without its data directory
        paths
            .ensure_dirs()
            .expect("Failed to create application data directory. Check permissions.");

        let (mut store, report) = Store::load(&paths);
        match &report {
            state::store::LoadReport::Loaded | state::store::LoadReport::Missing => {}
            state::store::LoadReport::Corrupt(e) => dialogs::warn(
                "Read Error",
                &format!(
                    "The organizer data file is corrupted or invalid ({e}). \
                     Starting with empty data."
                ),
            ),
            state::store::LoadReport::Unreadable(e) => dialogs::error(
                "Load Failed",
                &format!("Could not load the organizer data: {e}"),
            ),
        }

        store.ensure_defaults();

        println!(
            "📁 Store loaded from: {} ({} tabs, {} GDDs)",
            paths.config_file.display(),
            store.categories().len(),
            store.document_count()
        );

        let mut app = GddOrganizer {
            store,
            paths,
            selected: 0,
            previews: PreviewCache::new(),
            prompt: None,
            status: String::new(),
        };
        app.refresh_previews();
        app.update_status();
        // Write the store back unconditionally, so a fresh or recovered
        // store exists on disk immediately
        app.persist();

        (app, Task::none())
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::TabSelected(index) => {
                if index < self.store.categories().len() {
                    self.selected = index;
                }
            }

            Message::AddTab => {
                self.prompt = Some(TextPrompt::new_tab());
            }

            Message::RemoveCurrentTab => self.remove_current_tab(),

            Message::ImportDocument => self.import_document(),

            Message::OpenDocument { category, index } => self.open_document(&category, index),

            Message::RenameDocument { category, index } => {
                let current = self.record(&category, index).map(|r| r.display_name.clone());
                if let Some(current) = current {
                    self.prompt = Some(TextPrompt::rename(category, index, &current));
                }
            }

            Message::RemoveDocument { category, index } => self.remove_document(&category, index),

            Message::PromptInputChanged(input) => {
                if let Some(prompt) = &mut self.prompt {
                    prompt.input = input;
                }
            }

            Message::PromptConfirmed => {
                if let Some(prompt) = self.prompt.take() {
                    match prompt.kind {
                        PromptKind::NewTab => self.create_tab(&prompt.input),
                        PromptKind::RenameDocument { category, index } => {
                            self.rename_document(&category, index, &prompt.input)
                        }
                    }
                }
            }

            Message::PromptCancelled => {
                self.prompt = None;
            }
        }

        Task::none()
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let content: Element<Message> = match self.store.categories().get(self.selected) {
            Some(category) => column![
                ui::tabs::category_toolbar(),
                ui::cards::card_grid(category, &self.previews),
            ]
            .spacing(10)
            .into(),
            None => container(text("No tabs. Use \"Add Tab\" to create one."))
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .into(),
        };

        let footer = row![
            ui::tabs::tab_toolbar(),
            horizontal_space(),
            text(&self.status).size(14),
        ]
        .spacing(10)
        .align_y(iced::Alignment::Center);

        let base: Element<Message> = column![
            ui::tabs::tab_strip(&self.store, self.selected),
            container(content).width(Length::Fill).height(Length::Fill),
            footer,
        ]
        .spacing(10)
        .padding(10)
        .into();

        match &self.prompt {
            Some(prompt) => dialogs::modal(base, prompt),
            None => base,
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }

    // ---- operation handlers -------------------------------------------------

    fn create_tab(&mut self, name: &str) {
        match self.store.create_category(name) {
            Ok(created) => {
                self.selected = self.store.categories().len() - 1;
                self.persist();
                self.update_status();
                println!("🗂️  Created tab: {created}");
            }
            Err(OrganizerError::BlankName) => {
                dialogs::warn("Invalid Name", "The tab name cannot be blank.");
            }
            Err(e @ OrganizerError::DuplicateCategory(_)) => {
                dialogs::warn("Tab Exists", &e.to_string());
            }
            Err(e) => dialogs::error("Add Tab Failed", &e.to_string()),
        }
    }

    fn remove_current_tab(&mut self) {
        let Some(category) = self.store.categories().get(self.selected) else {
            dialogs::info("No Tab Selected", "There is no tab selected to remove.");
            return;
        };
        let name = category.name.clone();

        let confirmed = dialogs::confirm(
            "Remove Tab",
            &format!(
                "Are you sure you want to remove the tab '{name}' and all of its \
                 associated GDDs? (The files will NOT be deleted.)"
            ),
        );
        if !confirmed {
            return;
        }

        match self.store.remove_category(&name) {
            Ok(()) => {
                self.selected = self
                    .selected
                    .min(self.store.categories().len().saturating_sub(1));
                self.refresh_previews();
                self.persist();
                self.update_status();
            }
            Err(e) => dialogs::error("Remove Tab Failed", &e.to_string()),
        }
    }

    fn import_document(&mut self) {
        let Some(category) = self.store.categories().get(self.selected) else {
            return;
        };
        let name = category.name.clone();

        // Show the native file picker dialog
        let Some(source) = FileDialog::new()
            .set_title("Select a GDD File")
            .pick_file()
        else {
            return;
        };

        match self.store.import_document(&name, &source, &self.paths) {
            Ok(record) => {
                dialogs::info(
                    "Success",
                    &format!("File '{}' copied to the asset folder.", record.basename()),
                );
                self.refresh_previews();
                self.persist();
                self.update_status();
            }
            Err(e @ OrganizerError::DuplicateDocument(_)) => {
                dialogs::warn("Duplicate GDD", &e.to_string());
            }
            Err(e) => {
                dialogs::error("Import Failed", &format!("Could not import the file: {e}"));
            }
        }
    }

    fn open_document(&self, category: &str, index: usize) {
        let Some(record) = self.record(category, index) else {
            dialogs::error("Error", &OrganizerError::DocumentNotFound.to_string());
            return;
        };
        let display_name = record.display_name.clone();
        let file_path = record.file_path.clone();

        if !Path::new(&file_path).exists() {
            dialogs::error(
                "File Not Found",
                &format!(
                    "The file '{display_name}' was not found at '{file_path}'. \
                     It may have been moved or deleted externally."
                ),
            );
            return;
        }

        match open::that(&file_path) {
            Ok(()) => dialogs::info("Open GDD", &format!("Opening '{display_name}'...")),
            Err(e) => dialogs::error("Open Failed", &format!("Could not open the file: {e}")),
        }
    }

    fn rename_document(&mut self, category: &str, index: usize, new_name: &str) {
        match self
            .store
            .rename_document(category, index, new_name, &self.paths)
        {
            Ok(RenameOutcome::Unchanged) => {}
            Ok(RenameOutcome::Renamed { file_moved }) => {
                if file_moved {
                    let new_basename = self
                        .record(category, index)
                        .map(|r| r.basename())
                        .unwrap_or_default();
                    dialogs::info("Success", &format!("File renamed to '{new_basename}'."));
                } else {
                    dialogs::warn(
                        "Warning",
                        "The original file was not found. Only the display name \
                         was updated.",
                    );
                }
                self.refresh_previews();
                self.persist();
            }
            Err(e) => dialogs::error("Rename Failed", &format!("Could not rename the GDD: {e}")),
        }
    }

    fn remove_document(&mut self, category: &str, index: usize) {
        let Some(record) = self.record(category, index) else {
            dialogs::error("Error", &OrganizerError::DocumentNotFound.to_string());
            return;
        };
        let display_name = record.display_name.clone();

        let confirmed = dialogs::confirm(
            "Remove GDD",
            &format!(
                "Are you sure you want to remove '{display_name}' from this tab? \
                 The physical file will NOT be deleted."
            ),
        );
        if !confirmed {
            return;
        }

        match self.store.remove_document(category, index) {
            Ok(_) => {
                self.refresh_previews();
                self.persist();
                self.update_status();
            }
            Err(e) => dialogs::error("Remove Failed", &e.to_string()),
        }
    }

    // ---- helpers ------------------------------------------------------------

    fn record(&self, category: &str, index: usize) -> Option<&state::data::DocumentRecord> {
        self.store
            .category(category)
            .and_then(|c| c.documents.get(index))
    }

    /// Decode previews for every image-backed record and drop stale handles.
    /// Runs after load and after every mutation, so `view` never decodes.
    fn refresh_previews(&mut self) {
        let mut live = HashSet::new();
        for category in self.store.categories() {
            for record in &category.documents {
                if has_image_extension(&record.file_path) {
                    let _ = self.previews.get(&record.file_path);
                    live.insert(record.file_path.clone());
                }
            }
        }
        self.previews.prune(&live);
    }

    /// Serialize the whole store after a mutation. On failure the state
    /// stays in memory and will be retried by the next mutating operation.
    fn persist(&self) {
        if let Err(e) = self.store.save(&self.paths) {
            eprintln!("⚠️  Save failed: {e}");
            dialogs::error(
                "Save Failed",
                &format!("Could not save the organizer data: {e}"),
            );
        }
    }

    fn update_status(&mut self) {
        self.status = format!(
            "{} tabs, {} GDDs.",
            self.store.categories().len(),
            self.store.document_count()
        );
    }
}

fn main() -> iced::Result {
    iced::application("GDD Organizer", GddOrganizer::update, GddOrganizer::view)
        .theme(GddOrganizer::theme)
        .window_size((1000.0, 700.0))
        .centered()
        .run_with(GddOrganizer::new)
}
