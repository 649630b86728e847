//! WebSocket Dashboard Sessions
//!
//! One WebSocket connection is one dashboard session.
//!
//! ## Architecture
//!
//! - **SessionHub**: Registry of live sessions, enforces the session limit
//! - **Handler**: Upgrades the connection and drives the session's controller
//! - **Messages**: Client and server message formats
//!
//! ## Protocol
//!
//! On connect the server sends `connected` then `dashboard` (the full view).
//! Each `select_*` message recomputes exactly one chart and is answered with
//! `chart_updated`. Malformed messages get an `error` reply; the session
//! stays open.
//!
//! ## Example
//!
//! ```javascript
//! // Browser
//! const ws = new WebSocket('ws://localhost:8050/ws');
//!
//! ws.onopen = () => {
//!   ws.send(JSON.stringify({type: 'select_pie_regions', regions: ['USA', 'IND']}));
//! };
//!
//! ws.onmessage = (event) => {
//!   const msg = JSON.parse(event.data);
//!   if (msg.type === 'chart_updated') Plotly.react(msg.chart, msg.spec);
//! };
//! ```

mod handler;
mod hub;
mod messages;

pub use handler::websocket_handler;
pub use hub::{HubConfig, HubError, SessionHub, SessionId};
pub use messages::{ClientMessage, ServerMessage};
