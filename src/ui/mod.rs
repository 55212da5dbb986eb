/// UI construction
///
/// Pure view builders: everything here turns the store into widgets and
/// emits `Message`s. No state is mutated from this module.

pub mod cards;
pub mod dialogs;
pub mod tabs;
