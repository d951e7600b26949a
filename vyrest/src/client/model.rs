//! Wire types exchanged with the REST service.
//!
//! Every field defaults to its empty value so that sparse or empty bodies
//! decode successfully.

use serde::{Deserialize, Deserializer, Serialize};

/// A configuration editing session on the device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    pub id: String,
    pub username: String,
    pub started: String,
    pub modified: String,
    pub updated: String,
    pub description: String,
}

/// A running or recently finished operational command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Process {
    pub id: String,
    pub username: String,
    pub started: String,
    pub updated: String,
    pub command: String,
}

/// Child entry of a configuration node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigChild {
    pub name: String,
    pub state: String,
}

/// Snapshot of a configuration tree node and its immediate children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigNode {
    pub name: String,
    pub state: String,
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub types: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub enumeration: Vec<String>,
    pub end: String,
    pub mandatory: String,
    pub multi: String,
    pub default: String,
    pub help: String,
    #[serde(deserialize_with = "nullable")]
    pub val_help: Vec<String>,
    pub comp_help: String,
    #[serde(deserialize_with = "nullable")]
    pub children: Vec<ConfigChild>,
}

/// Node of the operational command tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpNode {
    #[serde(deserialize_with = "nullable")]
    pub children: Vec<String>,
    #[serde(rename = "enum", deserialize_with = "nullable")]
    pub enumeration: Vec<String>,
    pub action: String,
    pub help: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct SessionListing {
    #[serde(rename = "session", deserialize_with = "nullable")]
    pub sessions: Vec<Session>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ProcessListing {
    #[serde(rename = "process", deserialize_with = "nullable")]
    pub processes: Vec<Process>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct MessageResponse {
    pub message: String,
}

/// Body of a failed lifecycle action.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct MessageErrorResponse {
    pub message: String,
    pub error: String,
}

impl MessageErrorResponse {
    /// The most specific non-empty text in the body.
    pub fn into_text(self) -> Option<String> {
        if !self.message.is_empty() {
            Some(self.message)
        } else if !self.error.is_empty() {
            Some(self.error)
        } else {
            None
        }
    }
}

/// Treat an explicit `null` like an absent field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_node_decode() {
        let body = r#"{
            "name": "ethernet",
            "state": "active",
            "type": ["txt"],
            "enumeration": null,
            "multi": "true",
            "help": "Ethernet interface name",
            "val_help": ["txt;Ethernet interface name"],
            "children": [{"name": "dp0s3", "state": "active"}, {"name": "dp0s4", "state": "added"}]
        }"#;
        let node: ConfigNode = serde_json::from_str(body).unwrap();
        assert_eq!(node.name, "ethernet");
        assert_eq!(node.types, vec!["txt"]);
        assert!(node.enumeration.is_empty());
        assert_eq!(node.children.len(), 2);
        assert_eq!(node.children[1].state, "added");
        assert_eq!(node.comp_help, "");
    }

    #[test]
    fn test_session_listing_null_sessions() {
        let listing: SessionListing =
            serde_json::from_str(r#"{"message": "ok", "session": null}"#).unwrap();
        assert!(listing.sessions.is_empty());
    }

    #[test]
    fn test_op_node_enum_field() {
        let node: OpNode =
            serde_json::from_str(r#"{"children": ["interfaces"], "enum": ["a", "b"], "action": "true"}"#)
                .unwrap();
        assert_eq!(node.children, vec!["interfaces"]);
        assert_eq!(node.enumeration, vec!["a", "b"]);
        assert_eq!(node.help, "");
    }

    #[test]
    fn test_message_error_text_preference() {
        let body = MessageErrorResponse {
            message: "Commit failed".into(),
            error: "internal".into(),
        };
        assert_eq!(body.into_text().as_deref(), Some("Commit failed"));

        let body = MessageErrorResponse {
            message: String::new(),
            error: "session not found".into(),
        };
        assert_eq!(body.into_text().as_deref(), Some("session not found"));

        assert!(MessageErrorResponse::default().into_text().is_none());
    }
}
