//! Frame protocol submission envelope.
//!
//! Signature verification of `trustedData` happens upstream; only the
//! untrusted section is read here.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameRequest {
    #[serde(default)]
    pub untrusted_data: UntrustedData,
    #[serde(default)]
    pub trusted_data: Option<TrustedData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UntrustedData {
    #[serde(default)]
    pub fid: Option<u64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub message_hash: Option<String>,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub network: Option<u32>,
    #[serde(default)]
    pub button_index: Option<u32>,
    #[serde(default)]
    pub input_text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustedData {
    pub message_bytes: String,
}

impl FrameRequest {
    /// The voter's identity, if the client supplied one.
    pub fn user_id(&self) -> Option<String> {
        self.untrusted_data.fid.map(|fid| fid.to_string())
    }

    /// 1-based button index; 0 means "no button" the same as a missing field.
    pub fn button_index(&self) -> Option<u32> {
        self.untrusted_data.button_index.filter(|&i| i > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_client_payload() {
        let req: FrameRequest = serde_json::from_str(
            r#"{
                "untrustedData": {"fid": 1234, "buttonIndex": 2, "url": "https://x"},
                "trustedData": {"messageBytes": "0a1b"}
            }"#,
        )
        .unwrap();

        assert_eq!(req.user_id().as_deref(), Some("1234"));
        assert_eq!(req.button_index(), Some(2));
        assert_eq!(req.trusted_data.unwrap().message_bytes, "0a1b");
    }

    #[test]
    fn test_missing_fields() {
        let req: FrameRequest = serde_json::from_str(r#"{"untrustedData": {}}"#).unwrap();
        assert!(req.user_id().is_none());
        assert!(req.button_index().is_none());
    }
}
