//! Change-set storage: reading fragments and release documents, writing new ones

pub mod loader;
pub mod store;

pub use loader::{list_json_files, load_entry, load_release, load_released, load_unreleased};
pub use store::{category_slug, release_path, remove_fragments, write_fragment, write_release};
