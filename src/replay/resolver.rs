//! Maps an attribute and its target value to the ordered UI interactions
//! that select it, using the navigation taxonomy.

use std::time::Duration;

use crate::config::Pacing;
use crate::taxonomy::{NavigationNode, Taxonomy, TaxonomyError};

/// Attribute with no directly replayable control in the editor. Kept as a
/// permanent no-op, matching the recorded tool.
pub const BODY_SHAPE: &str = "Body_Shape";

/// Attribute selected through labeled toggles on the body panel instead of
/// the asset list.
pub const GENDER: &str = "Gender";

const BODY_CATEGORY: &str = "Body";

/// One abstract UI action. Positions are 1-based, matching the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    OpenCategory { position: u32 },
    OpenSubcategory { position: u32 },
    /// Click the first list item whose identifier contains `needle`.
    SelectAsset { needle: String },
    /// Click the control whose accessible label equals `label` exactly.
    SelectLabel { label: String },
    /// Fixed pause for a UI transition.
    Settle(Duration),
}

impl Interaction {
    /// Settle pauses are pacing, not interaction phases.
    pub fn is_phase(&self) -> bool {
        !matches!(self, Interaction::Settle(_))
    }
}

/// Outcome of resolving one attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Perform(Vec<Interaction>),
    /// The editor has no replayable control for this attribute.
    Unsupported,
    /// The attribute is not in the taxonomy; skipped silently by design.
    Unknown,
}

impl Resolution {
    pub fn interactions(&self) -> &[Interaction] {
        match self {
            Resolution::Perform(interactions) => interactions,
            Resolution::Unsupported | Resolution::Unknown => &[],
        }
    }
}

/// How an attribute is selected once located. One variant per navigation
/// shape; adding a special case means one new variant and one new arm below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Unsupported,
    GenderToggle { body_position: u32 },
    Category { position: u32 },
    Subcategory { parent_position: u32, position: u32 },
}

/// Resolve `attribute` to the interactions selecting `value`.
///
/// Unknown attributes resolve to [`Resolution::Unknown`] rather than an
/// error. A nested node whose parent cannot be located is an error; taxonomy
/// verification makes that unreachable for taxonomies built through
/// [`Taxonomy::from_nodes`].
pub fn resolve(
    taxonomy: &Taxonomy,
    pacing: &Pacing,
    attribute: &str,
    value: &str,
) -> Result<Resolution, TaxonomyError> {
    let Some(node) = taxonomy.lookup(attribute) else {
        return Ok(Resolution::Unknown);
    };

    // Name-based special cases take precedence over the node shape.
    let route = match attribute {
        BODY_SHAPE => Route::Unsupported,
        GENDER => Route::GenderToggle {
            body_position: taxonomy.top_level_position(BODY_CATEGORY)?,
        },
        _ => match node {
            NavigationNode::Flat { position } => Route::Category { position },
            NavigationNode::Nested { parent, position } => Route::Subcategory {
                parent_position: taxonomy.top_level_position(parent)?,
                position,
            },
        },
    };

    let interactions = match route {
        Route::Unsupported => return Ok(Resolution::Unsupported),
        Route::GenderToggle { body_position } => vec![
            Interaction::OpenCategory {
                position: body_position,
            },
            Interaction::Settle(pacing.subcategory_settle()),
            Interaction::SelectLabel {
                label: value.to_string(),
            },
        ],
        Route::Category { position } => vec![
            Interaction::OpenCategory { position },
            Interaction::Settle(pacing.category_settle()),
            Interaction::SelectAsset {
                needle: value.to_string(),
            },
        ],
        Route::Subcategory {
            parent_position,
            position,
        } => vec![
            Interaction::OpenCategory {
                position: parent_position,
            },
            Interaction::Settle(pacing.subcategory_settle()),
            Interaction::OpenSubcategory { position },
            Interaction::Settle(pacing.subcategory_settle()),
            Interaction::SelectAsset {
                needle: value.to_string(),
            },
        ],
    };

    Ok(Resolution::Perform(interactions))
}
