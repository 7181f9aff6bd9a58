//! Replays a recorded avatar-customization session against a live editor:
//! the action log is reduced to one final choice per attribute, each choice
//! is resolved to a sequence of UI interactions through the navigation
//! taxonomy, and the interactions are driven over Chrome DevTools.

pub mod action_log;
pub mod config;
pub mod replay;
pub mod surface;
pub mod taxonomy;

pub use action_log::{load_action_log, reduce_latest_choices, ActionEvent, LogError};
pub use config::{Pacing, PageSelectors, Settings};
pub use replay::{resolve, Interaction, ReplayDriver, ReplayError, Resolution};
pub use surface::{AutomationSurface, CdpSurface, SelectOutcome, SurfaceError};
pub use taxonomy::{NavigationNode, Taxonomy, TaxonomyError, REPLAY_ORDER};
