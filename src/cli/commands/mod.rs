pub mod categories;
pub mod list;
pub mod system;

use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    let mut entries = Vec::new();
    entries.extend(system::definitions());
    entries.extend(list::definitions());
    entries.extend(categories::definitions());
    entries
}
