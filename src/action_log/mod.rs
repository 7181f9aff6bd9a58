//! Action-log input: schema, categorized loading, and the reduction pass that
//! yields the final choice per attribute.

pub mod event;
pub mod loader;
pub mod reducer;

pub use event::{ActionEvent, ActionLogDocument, PLACEHOLDER_PARAMETER, SELECT_ACTION};
pub use loader::{load_action_log, LogError};
pub use reducer::reduce_latest_choices;
