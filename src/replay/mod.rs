//! The replay core: resolving attributes to interaction sequences and
//! driving them against the automation surface.

pub mod driver;
pub mod resolver;

pub use driver::{ReplayDriver, ReplayError};
pub use resolver::{resolve, Interaction, Resolution, BODY_SHAPE, GENDER};
