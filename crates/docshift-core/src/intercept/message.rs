//! Inbound message protocol (JSON, tagged by `action`).

use serde::{Deserialize, Serialize};

use super::hook::RequestDetails;
use crate::affordance::TabId;

/// Identity of the page that sent a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSender {
    pub tab_id: TabId,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Message {
    /// Page detected a legacy docs page; reply is the candidate URL or null.
    Redirect { sender: MessageSender },
    /// Reply is the current flag.
    IsEnabled,
    /// No reply.
    SetEnabled { enabled: bool },
    /// Request hook for the browser shell; reply is `{redirectUrl}` or null.
    BeforeRequest(RequestDetails),
    /// Reply is the tab's indicator state or null.
    TabStatus {
        #[serde(rename = "tabId")]
        tab_id: TabId,
    },
    /// Drop every confirmed redirect; reply is the number removed.
    ClearCache,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intercept::hook::ResourceType;

    #[test]
    fn parses_redirect_with_sender() {
        let m: Message = serde_json::from_str(
            r#"{"action":"redirect","sender":{"tabId":4,"url":"http://www.postgresql.org/docs/9.6/a.html"}}"#,
        )
        .unwrap();
        assert_eq!(
            m,
            Message::Redirect {
                sender: MessageSender {
                    tab_id: 4,
                    url: "http://www.postgresql.org/docs/9.6/a.html".into()
                }
            }
        );
    }

    #[test]
    fn parses_enablement_messages() {
        let m: Message = serde_json::from_str(r#"{"action":"isEnabled"}"#).unwrap();
        assert_eq!(m, Message::IsEnabled);
        let m: Message =
            serde_json::from_str(r#"{"action":"setEnabled","enabled":false}"#).unwrap();
        assert_eq!(m, Message::SetEnabled { enabled: false });
    }

    #[test]
    fn clear_cache_round_trips_through_json() {
        let m: Message = serde_json::from_str(r#"{"action":"clearCache"}"#).unwrap();
        assert_eq!(m, Message::ClearCache);
        assert_eq!(
            serde_json::to_value(Message::ClearCache).unwrap(),
            serde_json::json!({"action": "clearCache"})
        );
    }

    #[test]
    fn parses_before_request() {
        let m: Message = serde_json::from_str(
            r#"{"action":"beforeRequest","url":"https://www.postgresql.org/docs/9.6/a.html","type":"main_frame"}"#,
        )
        .unwrap();
        match m {
            Message::BeforeRequest(details) => {
                assert_eq!(details.resource_type, ResourceType::MainFrame);
                assert_eq!(details.url, "https://www.postgresql.org/docs/9.6/a.html");
            }
            other => panic!("expected BeforeRequest, got {other:?}"),
        }
    }

    #[test]
    fn unknown_resource_type_maps_to_other() {
        let m: Message = serde_json::from_str(
            r#"{"action":"beforeRequest","url":"https://www.postgresql.org/","type":"websocket"}"#,
        )
        .unwrap();
        assert!(matches!(
            m,
            Message::BeforeRequest(RequestDetails {
                resource_type: ResourceType::Other,
                ..
            })
        ));
    }

    #[test]
    fn rejects_unknown_action_and_missing_fields() {
        assert!(serde_json::from_str::<Message>(r#"{"action":"crawl"}"#).is_err());
        assert!(serde_json::from_str::<Message>(r#"{"action":"setEnabled"}"#).is_err());
        assert!(serde_json::from_str::<Message>(r#"{"action":"redirect"}"#).is_err());
    }

    #[test]
    fn set_enabled_serializes_with_action_tag() {
        let json = serde_json::to_value(Message::SetEnabled { enabled: true }).unwrap();
        assert_eq!(json, serde_json::json!({"action": "setEnabled", "enabled": true}));
    }
}
