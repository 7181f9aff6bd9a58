//! Sequences the whole replay: opening interactions, then one attribute at a
//! time in the fixed replay order.

use std::collections::HashMap;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::resolver::{resolve, Interaction, Resolution};
use crate::action_log::ActionEvent;
use crate::config::Settings;
use crate::surface::{AutomationSurface, SelectOutcome, SurfaceError};
use crate::taxonomy::{Taxonomy, TaxonomyError, REPLAY_ORDER};

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error(transparent)]
    Taxonomy(#[from] TaxonomyError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

/// Drives one replay run against an automation surface. The taxonomy and the
/// reduced choice map are read-only for the whole run; interactions are
/// strictly sequential because later steps depend on panel state left by
/// earlier ones.
pub struct ReplayDriver<S> {
    surface: S,
    taxonomy: Taxonomy,
    settings: Settings,
}

impl<S: AutomationSurface> ReplayDriver<S> {
    pub fn new(surface: S, taxonomy: Taxonomy, settings: Settings) -> Self {
        Self {
            surface,
            taxonomy,
            settings,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Open the editor and replay every attribute that has a recorded choice.
    ///
    /// Per-interaction failures abandon the current attribute only. Errors
    /// escaping this function (page open, taxonomy lookups) are left to the
    /// caller's outermost boundary.
    pub async fn run(&self, choices: &HashMap<String, ActionEvent>) -> Result<(), ReplayError> {
        let pacing = &self.settings.pacing;

        info!(url = %self.settings.editor_url, "opening avatar editor");
        self.surface
            .open_page(&self.settings.editor_url, pacing.page_timeout())
            .await?;

        self.click_through(&self.settings.page.connect_button).await;
        sleep(pacing.subcategory_settle()).await;
        self.click_through(&self.settings.page.modal_close).await;

        for attribute in REPLAY_ORDER {
            let Some(choice) = choices.get(attribute) else {
                continue;
            };

            let resolution = resolve(&self.taxonomy, pacing, &choice.parameter, &choice.new_value)?;
            match &resolution {
                Resolution::Unknown => {
                    debug!(attribute, "attribute not in the taxonomy, skipped");
                }
                Resolution::Unsupported => {
                    debug!(attribute, "editor has no replayable control, skipped");
                }
                Resolution::Perform(steps) => {
                    info!(attribute, value = %choice.new_value, "replaying attribute");
                    self.perform_all(attribute, steps).await;
                }
            }

            sleep(pacing.post_attribute_settle()).await;
        }

        Ok(())
    }

    /// Selector-wait click whose failure is logged, never propagated: the
    /// connect button and modal are not always present.
    async fn click_through(&self, selector: &str) {
        let timeout = self.settings.pacing.click_timeout();
        if let Err(err) = self.surface.wait_and_click(selector, timeout).await {
            warn!(selector, error = %err, "opening click failed, continuing");
        }
    }

    /// Execute one attribute's interaction list. The first miss or failure
    /// abandons the remaining steps of this attribute.
    async fn perform_all(&self, attribute: &str, steps: &[Interaction]) {
        for step in steps {
            match self.perform(step).await {
                Ok(None) => {}
                Ok(Some(outcome)) if outcome.success => {
                    if let Some(matched) = outcome.matched {
                        debug!(attribute, %matched, "selected");
                    }
                }
                Ok(Some(outcome)) => {
                    warn!(
                        attribute,
                        error = outcome.error.as_deref().unwrap_or("no match"),
                        "interaction missed, skipping the rest of this attribute"
                    );
                    return;
                }
                Err(err) => {
                    warn!(
                        attribute,
                        error = %err,
                        "interaction failed, skipping the rest of this attribute"
                    );
                    return;
                }
            }
        }
    }

    async fn perform(&self, step: &Interaction) -> Result<Option<SelectOutcome>, SurfaceError> {
        match step {
            Interaction::OpenCategory { position } => {
                Ok(Some(self.surface.open_category(*position).await?))
            }
            Interaction::OpenSubcategory { position } => {
                Ok(Some(self.surface.open_subcategory(*position).await?))
            }
            Interaction::SelectAsset { needle } => {
                Ok(Some(self.surface.select_asset_containing(needle).await?))
            }
            Interaction::SelectLabel { label } => {
                Ok(Some(self.surface.select_labeled(label).await?))
            }
            Interaction::Settle(duration) => {
                sleep(*duration).await;
                Ok(None)
            }
        }
    }
}
