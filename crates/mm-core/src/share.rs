//! Share links: a map payload packed into a single URL path segment.
//!
//! The payload is camelCase JSON encoded as URL-safe base64 without padding.
//! Decoding also accepts standard (padded) base64 so links produced by older
//! clients keep working.

use crate::model::SceneData;
use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a share link carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharePayload {
    pub title: String,
    #[serde(flatten)]
    pub scene: SceneData,
    pub shared_at: DateTime<Utc>,
}

impl SharePayload {
    pub fn new(title: impl Into<String>, scene: SceneData) -> Self {
        Self {
            title: title.into(),
            scene,
            shared_at: Utc::now(),
        }
    }
}

/// Encode a payload as a path segment.
pub fn encode(payload: &SharePayload) -> String {
    // Serializing plain data with string keys cannot fail.
    let json = serde_json::to_vec(payload).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

/// Decode a path segment. Any malformed input yields `None`.
pub fn decode(segment: &str) -> Option<SharePayload> {
    let segment = segment.trim();
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .or_else(|_| STANDARD.decode(segment))
        .map_err(|err| log::debug!("share link is not base64: {err}"))
        .ok()?;
    serde_json::from_slice(&bytes)
        .map_err(|err| log::debug!("share link payload is not a map: {err}"))
        .ok()
}

/// Full share URL: `{origin}/shared/{segment}`.
pub fn share_url(origin: &str, payload: &SharePayload) -> String {
    format!("{}/shared/{}", origin.trim_end_matches('/'), encode(payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::NodeId;
    use crate::model::{Color, Connection, Node, Shape};
    use crate::ConnectionId;
    use pretty_assertions::assert_eq;

    fn payload() -> SharePayload {
        let a = Node {
            id: NodeId::intern("s1"),
            x: 0.0,
            y: 0.0,
            width: 120.0,
            height: 60.0,
            text: "Ünïcode & <tags>".into(),
            color: Color::rgb8(0x3b, 0x82, 0xf6),
            shape: Shape::Ellipse,
        };
        let b = Node {
            id: NodeId::intern("s2"),
            x: 200.0,
            ..a.clone()
        };
        SharePayload::new(
            "Roadmap",
            SceneData {
                connections: vec![Connection {
                    id: ConnectionId::intern("sc1"),
                    from: a.id,
                    to: b.id,
                }],
                nodes: vec![a, b],
            },
        )
    }

    #[test]
    fn encode_decode_roundtrip() {
        let original = payload();
        let segment = encode(&original);
        assert!(!segment.contains('/') && !segment.contains('='));
        assert_eq!(decode(&segment), Some(original));
    }

    #[test]
    fn decodes_standard_base64() {
        let original = payload();
        let json = serde_json::to_vec(&original).unwrap();
        let segment = STANDARD.encode(json);
        assert_eq!(decode(&segment), Some(original));
    }

    #[test]
    fn malformed_links_decode_to_none() {
        assert_eq!(decode("not base64 at all!"), None);
        assert_eq!(decode(&URL_SAFE_NO_PAD.encode("{\"title\": 3}")), None);
        assert_eq!(decode(""), None);
    }

    #[test]
    fn share_url_joins_origin() {
        let url = share_url("https://maps.example/", &payload());
        assert!(url.starts_with("https://maps.example/shared/"));
    }
}
