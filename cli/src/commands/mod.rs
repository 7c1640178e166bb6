mod helpers;
mod log;
mod search;
mod summary;

pub(crate) use log::{cmd_clear, cmd_delete, cmd_log, cmd_save};
pub(crate) use search::{cmd_presets, cmd_quick, cmd_search, cmd_staged};
pub(crate) use summary::{cmd_history, cmd_summary};
