pub mod history_file;
pub mod manual_entry;

pub use history_file::HistoryFile;
pub use manual_entry::{MAX_MANUAL_NUMBERS, parse_manual_numbers};
