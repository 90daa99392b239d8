//! pantry-store: item repositories (in-memory, json file) and CSV import

pub mod import;
pub mod json_file;
pub mod memory;
pub mod repository;

pub use import::parse_items_csv;
pub use json_file::JsonFileItemStore;
pub use memory::MemoryItemStore;
pub use repository::{ItemLedger, ItemRepository};
