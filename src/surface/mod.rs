//! The automation surface: the interface the replay core drives, plus its
//! Chrome DevTools implementation and a scripted mock for tests.

pub mod cdp;
pub mod mock;
pub mod script;

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use cdp::CdpSurface;
pub use mock::{MockPage, MockSurface, SurfaceCall};

/// Transport- and protocol-level failures of the automation surface.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    /// WebSocket transport failure.
    #[error("websocket transport error: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),

    /// DevTools HTTP endpoint failure (target discovery).
    #[error("devtools endpoint error: {0}")]
    Endpoint(#[from] reqwest::Error),

    /// Malformed or error response from the protocol.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// An operation did not settle within its deadline.
    #[error("timed out after {0:?} waiting for {1}")]
    Timeout(Duration, String),

    /// No attachable page target behind the DevTools endpoint.
    #[error("no page target available at {0}")]
    NoPageTarget(String),
}

/// Structured result of an in-page selection or click attempt.
///
/// `success: false` is a soft miss (nothing matched, container absent); the
/// driver logs it and moves on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectOutcome {
    pub success: bool,

    /// Identifier of the element that was clicked, when one matched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SelectOutcome {
    pub fn hit(matched: impl Into<String>) -> Self {
        Self {
            success: true,
            matched: Some(matched.into()),
            error: None,
        }
    }

    pub fn miss(error: impl Into<String>) -> Self {
        Self {
            success: false,
            matched: None,
            error: Some(error.into()),
        }
    }
}

/// Operations the replay driver performs against the live editor.
///
/// Implementations must be usable from a single sequential driver; no call is
/// issued before the previous one returned.
#[async_trait]
pub trait AutomationSurface: Send + Sync {
    /// Navigate to `url` and wait until the page reports ready, bounded by
    /// `timeout`.
    async fn open_page(&self, url: &str, timeout: Duration) -> Result<(), SurfaceError>;

    /// Wait for `selector` to appear, then click it. Expiry of `timeout` is
    /// returned as [`SurfaceError::Timeout`]; callers treat it as soft.
    async fn wait_and_click(&self, selector: &str, timeout: Duration) -> Result<(), SurfaceError>;

    /// Click the top-level category at the 1-based `position`.
    async fn open_category(&self, position: u32) -> Result<SelectOutcome, SurfaceError>;

    /// Click the subcategory control at the 1-based `position` within the
    /// currently open category panel.
    async fn open_subcategory(&self, position: u32) -> Result<SelectOutcome, SurfaceError>;

    /// Reveal the lazy asset list, then click the first item (in document
    /// order) whose rendered identifier contains `needle`.
    async fn select_asset_containing(&self, needle: &str) -> Result<SelectOutcome, SurfaceError>;

    /// Click the control whose accessible label equals `label` exactly.
    async fn select_labeled(&self, label: &str) -> Result<SelectOutcome, SurfaceError>;
}
