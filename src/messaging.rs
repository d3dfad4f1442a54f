//! Messages between the popup, the background worker and content scripts
//!
//! Every request is answered at most once. The requester waits a bounded
//! time: a responder that goes away or never answers resolves to `None`.

use crate::content::ContentSession;
use crate::models::{Collection, DisplaySettings, TradingData};
use crate::status::BadgeState;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ExtensionMessage {
    GetTradingData,
    Scrape,
    UpdateTradingSettings { settings: DisplaySettings },
    GetBadgeState,
    UpdateBadge { state: BadgeState },
}

impl ExtensionMessage {
    pub fn action(&self) -> &'static str {
        match self {
            ExtensionMessage::GetTradingData => "getTradingData",
            ExtensionMessage::Scrape => "scrape",
            ExtensionMessage::UpdateTradingSettings { .. } => "updateTradingSettings",
            ExtensionMessage::GetBadgeState => "getBadgeState",
            ExtensionMessage::UpdateBadge { .. } => "updateBadge",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrapeResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<Collection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MessageResponse {
    TradingData(Option<TradingData>),
    Scrape(ScrapeResponse),
    Badge { state: BadgeState },
    Ack { success: bool },
}

/// Delivers a message to whoever answers it
pub trait MessageTransport {
    fn dispatch(&self, message: ExtensionMessage) -> oneshot::Receiver<MessageResponse>;
}

/// Send `message` and wait up to `timeout` for the answer.
pub async fn request<T>(transport: &T, message: ExtensionMessage, timeout: Duration) -> Option<MessageResponse>
where
    T: MessageTransport + ?Sized,
{
    let action = message.action();
    let receiver = transport.dispatch(message);

    match tokio::time::timeout(timeout, receiver).await {
        Ok(Ok(response)) => Some(response),
        Ok(Err(_)) => {
            warn!(action, "responder went away without answering");
            None
        }
        Err(_) => {
            warn!(action, timeout_ms = timeout.as_millis() as u64, "message timed out");
            None
        }
    }
}

/// Ask the page for its embedded trading payload
pub async fn get_trading_data<T>(transport: &T, timeout: Duration) -> Option<TradingData>
where
    T: MessageTransport + ?Sized,
{
    match request(transport, ExtensionMessage::GetTradingData, timeout).await? {
        MessageResponse::TradingData(data) => data,
        other => {
            debug!(?other, "unexpected response to getTradingData");
            None
        }
    }
}

/// Answers messages from a session in the same context
#[derive(Debug)]
pub struct LocalTransport {
    session: RefCell<ContentSession>,
}

impl LocalTransport {
    pub fn new(session: ContentSession) -> Self {
        Self {
            session: RefCell::new(session),
        }
    }

    pub fn into_session(self) -> ContentSession {
        self.session.into_inner()
    }
}

impl MessageTransport for LocalTransport {
    fn dispatch(&self, message: ExtensionMessage) -> oneshot::Receiver<MessageResponse> {
        let (sender, receiver) = oneshot::channel();
        let response = self.session.borrow_mut().handle_message(message);
        // The receiver is still held by the caller
        let _ = sender.send(response);
        receiver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_message_wire_format() {
        let message: ExtensionMessage = serde_json::from_value(json!({
            "action": "updateTradingSettings",
            "settings": { "showMatchedOnly": true }
        }))
        .unwrap();
        let ExtensionMessage::UpdateTradingSettings { settings } = &message else {
            panic!("wrong variant");
        };
        assert!(settings.show_matched_only);
        assert!(settings.show_trade_overlay);

        assert_eq!(
            serde_json::to_value(ExtensionMessage::UpdateBadge { state: BadgeState::Green }).unwrap(),
            json!({ "action": "updateBadge", "state": "green" })
        );
        assert_eq!(serde_json::to_value(MessageResponse::TradingData(None)).unwrap(), json!(null));
    }
}
