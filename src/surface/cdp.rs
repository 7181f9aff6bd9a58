//! Chrome DevTools Protocol implementation of the automation surface.
//!
//! Attaches to an already-running Chrome started with
//! `--remote-debugging-port`: page targets are discovered over the DevTools
//! HTTP endpoint, then driven over a WebSocket speaking JSON-RPC. Every
//! interaction goes through `Runtime.evaluate` with `returnByValue` and
//! `awaitPromise`, so in-page snippets can return structured outcomes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::debug;

use super::script;
use super::{AutomationSurface, SelectOutcome, SurfaceError};
use crate::config::PageSelectors;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Upper bound on a single protocol command round-trip. Generous because the
/// asset-list scroll snippet runs for several seconds in-page.
const COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

const READY_POLL_INTERVAL: Duration = Duration::from_millis(200);
const SELECTOR_POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Deserialize)]
struct PageTarget {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    url: String,
    #[serde(rename = "webSocketDebuggerUrl")]
    web_socket_debugger_url: Option<String>,
}

pub struct CdpSurface {
    ws: Mutex<WsStream>,
    next_id: AtomicU64,
    selectors: PageSelectors,
    scroll_reveal: Duration,
}

impl CdpSurface {
    /// Attach to the first page target behind `endpoint`
    /// (e.g. `http://127.0.0.1:9222`).
    pub async fn connect(
        endpoint: &str,
        selectors: PageSelectors,
        scroll_reveal: Duration,
    ) -> Result<Self, SurfaceError> {
        let targets: Vec<PageTarget> = reqwest::get(format!("{endpoint}/json/list"))
            .await?
            .json()
            .await?;

        let (page_url, ws_url) = targets
            .into_iter()
            .filter(|t| t.kind == "page")
            .find_map(|t| t.web_socket_debugger_url.map(|ws| (t.url, ws)))
            .ok_or_else(|| SurfaceError::NoPageTarget(endpoint.to_string()))?;

        debug!(url = %page_url, "attaching to page target");
        let (ws, _response) = connect_async(ws_url.as_str()).await?;

        Ok(Self {
            ws: Mutex::new(ws),
            next_id: AtomicU64::new(1),
            selectors,
            scroll_reveal,
        })
    }

    /// Send one protocol command and wait for its response, skipping
    /// interleaved protocol events.
    async fn command(&self, method: &str, params: Value) -> Result<Value, SurfaceError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let payload = json!({ "id": id, "method": method, "params": params });

        let mut ws = self.ws.lock().await;
        ws.send(Message::Text(payload.to_string())).await?;

        let response = tokio::time::timeout(COMMAND_TIMEOUT, async {
            loop {
                let message = match ws.next().await {
                    Some(message) => message?,
                    None => {
                        return Err(SurfaceError::Protocol(
                            "websocket closed by the browser".to_string(),
                        ))
                    }
                };
                let Message::Text(text) = message else {
                    continue;
                };
                let value: Value = serde_json::from_str(&text)
                    .map_err(|err| SurfaceError::Protocol(format!("invalid frame: {err}")))?;
                if value.get("id").and_then(Value::as_u64) == Some(id) {
                    return Ok(value);
                }
            }
        })
        .await
        .map_err(|_| SurfaceError::Timeout(COMMAND_TIMEOUT, method.to_string()))??;

        if let Some(error) = response.get("error") {
            return Err(SurfaceError::Protocol(format!("{method} failed: {error}")));
        }
        Ok(response.get("result").cloned().unwrap_or(Value::Null))
    }

    /// Run a JS expression in the page and return its value. Promises are
    /// awaited; page exceptions surface as protocol errors.
    pub async fn evaluate(&self, expression: &str) -> Result<Value, SurfaceError> {
        let result = self
            .command(
                "Runtime.evaluate",
                json!({
                    "expression": expression,
                    "returnByValue": true,
                    "awaitPromise": true,
                }),
            )
            .await?;

        if let Some(details) = result.get("exceptionDetails") {
            return Err(SurfaceError::Protocol(format!("page exception: {details}")));
        }
        Ok(result.pointer("/result/value").cloned().unwrap_or(Value::Null))
    }

    /// Incrementally scroll a lazy container so virtualized items render.
    pub async fn scroll_reveal_list(
        &self,
        container: &str,
        duration: Duration,
    ) -> Result<SelectOutcome, SurfaceError> {
        self.outcome(&script::scroll_list(container, duration.as_secs()))
            .await
    }

    async fn outcome(&self, expression: &str) -> Result<SelectOutcome, SurfaceError> {
        let value = self.evaluate(expression).await?;
        serde_json::from_value(value)
            .map_err(|err| SurfaceError::Protocol(format!("unexpected outcome shape: {err}")))
    }
}

#[async_trait]
impl AutomationSurface for CdpSurface {
    async fn open_page(&self, url: &str, timeout: Duration) -> Result<(), SurfaceError> {
        self.command("Page.navigate", json!({ "url": url })).await?;

        let deadline = Instant::now() + timeout;
        loop {
            let state = self.evaluate(&script::ready_state()).await?;
            if state.as_str() == Some("complete") {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(SurfaceError::Timeout(timeout, format!("load of {url}")));
            }
            tokio::time::sleep(READY_POLL_INTERVAL).await;
        }
    }

    async fn wait_and_click(&self, selector: &str, timeout: Duration) -> Result<(), SurfaceError> {
        let deadline = Instant::now() + timeout;
        loop {
            let present = self.evaluate(&script::element_exists(selector)).await?;
            if present.as_bool() == Some(true) {
                break;
            }
            if Instant::now() >= deadline {
                return Err(SurfaceError::Timeout(timeout, selector.to_string()));
            }
            tokio::time::sleep(SELECTOR_POLL_INTERVAL).await;
        }

        let outcome = self.outcome(&script::click_selector(selector)).await?;
        if outcome.success {
            Ok(())
        } else {
            Err(SurfaceError::Protocol(
                outcome
                    .error
                    .unwrap_or_else(|| format!("click on {selector} failed")),
            ))
        }
    }

    async fn open_category(&self, position: u32) -> Result<SelectOutcome, SurfaceError> {
        self.outcome(&script::click_nth_category(
            &self.selectors.category_picker,
            position.saturating_sub(1),
        ))
        .await
    }

    async fn open_subcategory(&self, position: u32) -> Result<SelectOutcome, SurfaceError> {
        self.outcome(&script::click_nth_subcategory(
            &self.selectors.subcategory_picker,
            position.saturating_sub(1),
        ))
        .await
    }

    async fn select_asset_containing(&self, needle: &str) -> Result<SelectOutcome, SurfaceError> {
        let revealed = self
            .scroll_reveal_list(&self.selectors.asset_list, self.scroll_reveal)
            .await?;
        if !revealed.success {
            return Ok(revealed);
        }

        self.outcome(&script::select_asset_containing(
            &self.selectors.asset_list,
            &self.selectors.asset_item,
            needle,
        ))
        .await
    }

    async fn select_labeled(&self, label: &str) -> Result<SelectOutcome, SurfaceError> {
        self.outcome(&script::select_labeled(label)).await
    }
}
