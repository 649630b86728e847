//! WebSocket Message Types
//!
//! Defines all message types for WebSocket communication between
//! a dashboard page and its server-side session.

use serde::{Deserialize, Serialize};

use crate::charts::ChartSpec;
use crate::dashboard::{ChartId, ChartUpdate, DashboardView, InputEvent};

/// Messages sent from client to server
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Line chart dropdown changed; a missing or null region clears it
    SelectLineRegion {
        #[serde(default)]
        region: Option<String>,
    },
    /// Bar chart multi-select changed
    SelectBarRegions {
        #[serde(default)]
        regions: Option<Vec<String>>,
    },
    /// Pie chart multi-select changed
    SelectPieRegions {
        #[serde(default)]
        regions: Option<Vec<String>>,
    },
    /// Ping for keepalive
    Ping,
}

impl ClientMessage {
    /// The dashboard input this message carries, if any
    pub fn into_event(self) -> Option<InputEvent> {
        match self {
            ClientMessage::SelectLineRegion { region } => Some(InputEvent::LineRegion(region)),
            ClientMessage::SelectBarRegions { regions } => Some(InputEvent::BarRegions(regions)),
            ClientMessage::SelectPieRegions { regions } => Some(InputEvent::PieRegions(regions)),
            ClientMessage::Ping => None,
        }
    }
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Connection established
    Connected {
        /// Unique session identifier
        session_id: String,
    },
    /// Full page state, sent once after `Connected`
    Dashboard { view: Box<DashboardView> },
    /// One chart was recomputed
    ChartUpdated {
        chart: ChartId,
        revision: u64,
        spec: ChartSpec,
    },
    /// Pong response to ping
    Pong,
    /// Error message
    Error {
        /// Error description
        message: String,
    },
}

impl ServerMessage {
    pub fn error(message: impl Into<String>) -> Self {
        ServerMessage::Error {
            message: message.into(),
        }
    }
}

impl From<ChartUpdate> for ServerMessage {
    fn from(update: ChartUpdate) -> Self {
        ServerMessage::ChartUpdated {
            chart: update.chart,
            revision: update.revision,
            spec: update.spec,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_message_deserialize_bar_selection() {
        let json = r#"{"type": "select_bar_regions", "regions": ["USA", "IND"]}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        assert_eq!(
            msg.into_event(),
            Some(InputEvent::BarRegions(Some(vec![
                "USA".to_string(),
                "IND".to_string()
            ])))
        );
    }

    #[test]
    fn test_client_message_cleared_selection() {
        let msg: ClientMessage = serde_json::from_str(r#"{"type": "select_pie_regions"}"#).unwrap();
        assert_eq!(msg.into_event(), Some(InputEvent::PieRegions(None)));

        let msg: ClientMessage =
            serde_json::from_str(r#"{"type": "select_line_region", "region": null}"#).unwrap();
        assert_eq!(msg.into_event(), Some(InputEvent::LineRegion(None)));
    }

    #[test]
    fn test_client_message_deserialize_ping() {
        let json = r#"{"type": "ping"}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        assert!(matches!(msg, ClientMessage::Ping));
        assert!(msg.into_event().is_none());
    }

    #[test]
    fn test_client_message_unknown_type_is_error() {
        assert!(serde_json::from_str::<ClientMessage>(r#"{"type": "subscribe"}"#).is_err());
    }

    #[test]
    fn test_server_message_serialize_connected() {
        let msg = ServerMessage::Connected {
            session_id: "abc-123".to_string(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"connected\""));
        assert!(json.contains("\"session_id\":\"abc-123\""));
    }

    #[test]
    fn test_server_message_serialize_error() {
        let json = serde_json::to_string(&ServerMessage::error("bad")).unwrap();
        assert_eq!(json, r#"{"type":"error","message":"bad"}"#);
    }
}
