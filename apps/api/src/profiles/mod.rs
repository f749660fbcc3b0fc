// Recipient profiles: model, file-backed store, and the manager view's editor.

pub mod editor;
pub mod handlers;
pub mod models;
pub mod store;
