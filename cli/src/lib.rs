pub mod add_entry;
pub mod check;
pub mod list;
pub mod remove_entry;

pub use add_entry::AddEntryCommand;
pub use add_entry::run_add_entry;
pub use check::run_check;
pub use list::run_list;
pub use remove_entry::RemoveEntryCommand;
pub use remove_entry::run_remove_entry;
