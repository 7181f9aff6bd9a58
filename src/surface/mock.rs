//! Mock automation surface for deterministic testing.
//!
//! Models a scripted editor page (asset identifiers in document order,
//! accessible labels) and records every call, so driver sequencing and the
//! substring-vs-exact matching contract can be verified without a browser.

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{AutomationSurface, SelectOutcome, SurfaceError};

/// One recorded call against the mock surface.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    OpenPage { url: String },
    WaitAndClick { selector: String },
    OpenCategory { position: u32 },
    OpenSubcategory { position: u32 },
    SelectAsset { needle: String },
    SelectLabel { label: String },
}

/// Scripted page content and failure switches.
#[derive(Debug, Clone, Default)]
pub struct MockPage {
    /// Rendered asset identifiers, in document order.
    pub assets: Vec<String>,
    /// Accessible labels present on the current panel.
    pub labels: Vec<String>,
    /// Make `wait_and_click` time out (missing connect button, etc.).
    pub clicks_time_out: bool,
    /// Make every category/subcategory open report a miss.
    pub panels_missing: bool,
}

impl MockPage {
    pub fn with_assets<I, S>(mut self, assets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.assets = assets.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_missing_panels(mut self) -> Self {
        self.panels_missing = true;
        self
    }

    pub fn with_timed_out_clicks(mut self) -> Self {
        self.clicks_time_out = true;
        self
    }
}

#[derive(Default)]
pub struct MockSurface {
    page: MockPage,
    calls: Mutex<Vec<SurfaceCall>>,
}

impl MockSurface {
    pub fn new(page: MockPage) -> Self {
        Self {
            page,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Everything the driver asked for, in order.
    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.lock().clone()
    }

    fn record(&self, call: SurfaceCall) {
        self.calls.lock().push(call);
    }

    fn panel_outcome(&self) -> SelectOutcome {
        if self.page.panels_missing {
            SelectOutcome::miss("picker child not found")
        } else {
            SelectOutcome {
                success: true,
                matched: None,
                error: None,
            }
        }
    }
}

#[async_trait]
impl AutomationSurface for MockSurface {
    async fn open_page(&self, url: &str, _timeout: Duration) -> Result<(), SurfaceError> {
        self.record(SurfaceCall::OpenPage {
            url: url.to_string(),
        });
        Ok(())
    }

    async fn wait_and_click(&self, selector: &str, timeout: Duration) -> Result<(), SurfaceError> {
        self.record(SurfaceCall::WaitAndClick {
            selector: selector.to_string(),
        });
        if self.page.clicks_time_out {
            return Err(SurfaceError::Timeout(timeout, selector.to_string()));
        }
        Ok(())
    }

    async fn open_category(&self, position: u32) -> Result<SelectOutcome, SurfaceError> {
        self.record(SurfaceCall::OpenCategory { position });
        Ok(self.panel_outcome())
    }

    async fn open_subcategory(&self, position: u32) -> Result<SelectOutcome, SurfaceError> {
        self.record(SurfaceCall::OpenSubcategory { position });
        Ok(self.panel_outcome())
    }

    async fn select_asset_containing(&self, needle: &str) -> Result<SelectOutcome, SurfaceError> {
        self.record(SurfaceCall::SelectAsset {
            needle: needle.to_string(),
        });
        // First match in document order wins, substring semantics.
        let outcome = match self.page.assets.iter().find(|asset| asset.contains(needle)) {
            Some(asset) => SelectOutcome::hit(asset.clone()),
            None => SelectOutcome::miss(format!("no asset identifier contains {needle}")),
        };
        Ok(outcome)
    }

    async fn select_labeled(&self, label: &str) -> Result<SelectOutcome, SurfaceError> {
        self.record(SurfaceCall::SelectLabel {
            label: label.to_string(),
        });
        // Accessible labels match exactly, unlike asset identifiers.
        let outcome = if self.page.labels.iter().any(|l| l == label) {
            SelectOutcome::hit(label)
        } else {
            SelectOutcome::miss(format!("no control labeled {label}"))
        };
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn asset_selection_matches_substrings_in_document_order() {
        let surface = MockSurface::new(
            MockPage::default().with_assets(["hair-asset-41.png", "hair-asset-412.png"]),
        );

        let outcome = surface.select_asset_containing("asset-41").await.unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.matched.as_deref(), Some("hair-asset-41.png"));
    }

    #[tokio::test]
    async fn label_selection_requires_an_exact_match() {
        let surface = MockSurface::new(MockPage::default().with_labels(["Masculine"]));

        // A strict substring of a longer label is not a hit.
        let outcome = surface.select_labeled("Masc").await.unwrap();
        assert!(!outcome.success);

        let outcome = surface.select_labeled("Masculine").await.unwrap();
        assert!(outcome.success);
    }
}
