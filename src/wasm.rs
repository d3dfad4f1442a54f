//! WebAssembly bindings for the extension's content script and popup
//!
//! Everything crosses the boundary as JSON strings. Storage stays on the JS
//! side: callers pass the `chrome.storage.local` object in and persist what
//! comes back.

use crate::config::ToolsConfig;
use crate::content::ContentSession;
use crate::messaging::ExtensionMessage;
use crate::models::DisplaySettings;
use crate::status::check_setup_status;
use crate::storage::{MemoryStorage, Storage, StoredState};
use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

macro_rules! console_log {
    ($($t:tt)*) => (web_sys::console::log_1(&JsValue::from_str(&format!($($t)*))))
}

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

#[wasm_bindgen]
pub struct TradeSession {
    inner: ContentSession,
}

#[wasm_bindgen]
impl TradeSession {
    #[wasm_bindgen(constructor)]
    pub fn new(html: &str, url: Option<String>, config_json: Option<String>) -> Result<TradeSession, JsValue> {
        let config = match config_json {
            Some(json) => ToolsConfig::from_json5(&json).context("invalid config").map_err(to_js)?,
            None => ToolsConfig::default(),
        };
        let inner = ContentSession::new(html, url.as_deref(), config);
        console_log!("trade session: {} cards", inner.board().len());
        Ok(TradeSession { inner })
    }

    /// Run both phases against the stored state; returns the summary
    #[wasm_bindgen(js_name = runAnalysis)]
    pub fn run_analysis(&mut self, stored_json: &str) -> Result<String, JsValue> {
        let started = js_sys::Date::now();
        let stored = stored_state_from_json(stored_json).map_err(to_js)?;
        let summary = self.inner.run_analysis(&stored, Utc::now());
        console_log!(
            "analysis: badge {} in {:.1}ms",
            summary.badge,
            js_sys::Date::now() - started
        );
        to_json(&summary)
    }

    /// Filter phase only
    #[wasm_bindgen(js_name = updateSettings)]
    pub fn update_settings(&mut self, settings_json: &str) -> Result<String, JsValue> {
        let settings: DisplaySettings = serde_json::from_str(settings_json)
            .context("invalid trading settings")
            .map_err(to_js)?;
        to_json(&self.inner.update_settings(settings))
    }

    #[wasm_bindgen(js_name = handleMessage)]
    pub fn handle_message(&mut self, message_json: &str) -> Result<String, JsValue> {
        let message: ExtensionMessage = serde_json::from_str(message_json)
            .context("unsupported message")
            .map_err(to_js)?;
        to_json(&self.inner.handle_message(message))
    }

    /// Per-card classes to mirror onto the live DOM
    pub fn annotations(&self) -> Result<String, JsValue> {
        to_json(&self.inner.annotations())
    }

    #[wasm_bindgen(js_name = pageStyle)]
    pub fn page_style(&self) -> Result<String, JsValue> {
        to_json(&self.inner.page_style())
    }

    #[wasm_bindgen(js_name = badgeState)]
    pub fn badge_state(&self) -> String {
        self.inner.badge().to_string()
    }
}

#[wasm_bindgen(js_name = checkSetupStatus)]
pub fn check_setup_status_json(stored_json: &str, stale_after_hours: Option<i32>) -> Result<String, JsValue> {
    let stored = stored_state_from_json(stored_json).map_err(to_js)?;
    let stale_after_hours = stale_after_hours
        .map(i64::from)
        .unwrap_or(ToolsConfig::default().stale_after_hours);
    let status = check_setup_status(
        stored.profile_url.as_deref(),
        stored.collection.as_ref(),
        Utc::now(),
        stale_after_hours,
    );
    to_json(&status)
}

#[wasm_bindgen(js_name = validateProfileUrl)]
pub fn validate_profile_url(url: &str) -> Result<(), JsValue> {
    crate::utils::validate_profile_url(url, &ToolsConfig::default().profile_url_prefix)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen(js_name = tradingStylesheet)]
pub fn trading_stylesheet() -> String {
    crate::highlighter::TRADING_STYLESHEET.to_string()
}

/// `id` of the `<style>` element the stylesheet is injected as
#[wasm_bindgen(js_name = tradingStylesheetId)]
pub fn trading_stylesheet_id() -> String {
    crate::highlighter::style::TRADING_STYLESHEET_ID.to_string()
}

fn stored_state_from_json(json: &str) -> Result<StoredState> {
    let values: serde_json::Map<String, Value> = serde_json::from_str(json).context("stored state must be an object")?;
    let storage = MemoryStorage::new();
    for (key, value) in values {
        storage.set(&key, value)?;
    }
    Ok(StoredState::load(&storage)?)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&format!("Failed to serialize: {}", e)))
}

fn to_js(error: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{error:#}"))
}
