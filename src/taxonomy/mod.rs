//! Static navigation taxonomy of the avatar editor: how each customizable
//! attribute is reached through the two-level category UI.

use std::collections::HashMap;

/// How one attribute is reached in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationNode {
    /// The attribute is itself a top-level category in the picker strip.
    /// `position` is 1-based among the top-level categories.
    Flat { position: u32 },

    /// The attribute lives in a subcategory panel under a top-level category,
    /// referenced by the parent's *name*. `position` is 1-based within the
    /// parent's subcategory list.
    Nested {
        parent: &'static str,
        position: u32,
    },
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TaxonomyError {
    /// A nested node declares a parent that is not a top-level category.
    #[error("taxonomy entry '{attribute}' references parent '{parent}' which does not resolve to a top-level category")]
    UnresolvedParent {
        attribute: &'static str,
        parent: &'static str,
    },
}

/// Read-only map from attribute name to its navigation node. Built once at
/// startup and verified: every nested parent must resolve to a flat node.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    nodes: HashMap<&'static str, NavigationNode>,
}

/// Order in which attributes are replayed. Deliberately independent of log
/// order: attributes sharing a panel must be applied together, and the body
/// shape/gender toggles reset parts of the outfit if applied late.
///
/// `Facewear` appears here but has no taxonomy entry in the recorded editor;
/// it resolves to a silent skip.
pub const REPLAY_ORDER: [&str; 17] = [
    "Gender",
    "Body_Shape",
    "Face_Shape",
    "Eye_Shape",
    "Eyebrow",
    "Nose_Shape",
    "Lip_Shape",
    "Beard",
    "Hair",
    "Top",
    "Bottom",
    "Shoes",
    "Outfit",
    "Glasses",
    "Makeup",
    "Facewear",
    "Headwear",
];

impl Taxonomy {
    /// Taxonomy of the recorded avatar editor.
    ///
    /// The positions of the two `Body` children are never used to click (the
    /// resolver handles both by name before looking at the node shape); they
    /// record the panel order only.
    pub fn editor_default() -> Result<Self, TaxonomyError> {
        use NavigationNode::{Flat, Nested};

        let nodes = HashMap::from([
            ("Body", Flat { position: 1 }),
            (
                "Body_Shape",
                Nested {
                    parent: "Body",
                    position: 1,
                },
            ),
            (
                "Gender",
                Nested {
                    parent: "Body",
                    position: 2,
                },
            ),
            ("Head", Flat { position: 2 }),
            (
                "Face_Shape",
                Nested {
                    parent: "Head",
                    position: 1,
                },
            ),
            (
                "Eye_Shape",
                Nested {
                    parent: "Head",
                    position: 2,
                },
            ),
            (
                "Eyebrow",
                Nested {
                    parent: "Head",
                    position: 3,
                },
            ),
            (
                "Nose_Shape",
                Nested {
                    parent: "Head",
                    position: 4,
                },
            ),
            (
                "Lip_Shape",
                Nested {
                    parent: "Head",
                    position: 5,
                },
            ),
            (
                "Beard",
                Nested {
                    parent: "Head",
                    position: 6,
                },
            ),
            ("Hair", Flat { position: 3 }),
            ("Clothes", Flat { position: 4 }),
            (
                "Top",
                Nested {
                    parent: "Clothes",
                    position: 1,
                },
            ),
            (
                "Bottom",
                Nested {
                    parent: "Clothes",
                    position: 2,
                },
            ),
            (
                "Shoes",
                Nested {
                    parent: "Clothes",
                    position: 3,
                },
            ),
            (
                "Outfit",
                Nested {
                    parent: "Clothes",
                    position: 4,
                },
            ),
            ("Glasses", Flat { position: 5 }),
            ("Makeup", Flat { position: 6 }),
            ("Mask", Flat { position: 7 }),
            ("Headwear", Flat { position: 8 }),
        ]);

        Self::from_nodes(nodes)
    }

    /// Build and verify a taxonomy from explicit nodes.
    pub fn from_nodes(
        nodes: HashMap<&'static str, NavigationNode>,
    ) -> Result<Self, TaxonomyError> {
        let taxonomy = Self { nodes };
        taxonomy.verify()?;
        Ok(taxonomy)
    }

    fn verify(&self) -> Result<(), TaxonomyError> {
        for (attribute, node) in &self.nodes {
            if let NavigationNode::Nested { parent, .. } = node {
                if !matches!(self.nodes.get(parent), Some(NavigationNode::Flat { .. })) {
                    return Err(TaxonomyError::UnresolvedParent { attribute, parent });
                }
            }
        }
        Ok(())
    }

    /// Navigation node for `attribute`, if the editor knows about it.
    pub fn lookup(&self, attribute: &str) -> Option<NavigationNode> {
        self.nodes.get(attribute).copied()
    }

    /// 1-based top-level position of the named category. Fails loudly for
    /// names that are missing or not top-level; `verify` makes this
    /// unreachable for parents of nested nodes in a constructed taxonomy.
    pub fn top_level_position(&self, name: &'static str) -> Result<u32, TaxonomyError> {
        match self.nodes.get(name) {
            Some(NavigationNode::Flat { position }) => Ok(*position),
            _ => Err(TaxonomyError::UnresolvedParent {
                attribute: name,
                parent: name,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_taxonomy_verifies() {
        let taxonomy = Taxonomy::editor_default().unwrap();
        assert_eq!(
            taxonomy.lookup("Hair"),
            Some(NavigationNode::Flat { position: 3 })
        );
        assert_eq!(
            taxonomy.lookup("Eyebrow"),
            Some(NavigationNode::Nested {
                parent: "Head",
                position: 3
            })
        );
    }

    #[test]
    fn facewear_is_absent_from_the_recorded_editor() {
        let taxonomy = Taxonomy::editor_default().unwrap();
        assert!(REPLAY_ORDER.contains(&"Facewear"));
        assert_eq!(taxonomy.lookup("Facewear"), None);
    }

    #[test]
    fn every_nested_parent_resolves_to_a_flat_position() {
        let taxonomy = Taxonomy::editor_default().unwrap();
        for attribute in REPLAY_ORDER {
            if let Some(NavigationNode::Nested { parent, .. }) = taxonomy.lookup(attribute) {
                assert!(taxonomy.top_level_position(parent).is_ok(), "{attribute}");
            }
        }
    }

    #[test]
    fn orphan_parent_is_rejected_at_construction() {
        let nodes = HashMap::from([(
            "Hat",
            NavigationNode::Nested {
                parent: "Accessories",
                position: 1,
            },
        )]);

        let err = Taxonomy::from_nodes(nodes).unwrap_err();
        assert_eq!(
            err,
            TaxonomyError::UnresolvedParent {
                attribute: "Hat",
                parent: "Accessories"
            }
        );
    }

    #[test]
    fn nested_parent_pointing_at_another_nested_node_is_rejected() {
        let nodes = HashMap::from([
            (
                "Outer",
                NavigationNode::Nested {
                    parent: "Middle",
                    position: 1,
                },
            ),
            (
                "Middle",
                NavigationNode::Nested {
                    parent: "Outer",
                    position: 1,
                },
            ),
        ]);

        assert!(Taxonomy::from_nodes(nodes).is_err());
    }
}
