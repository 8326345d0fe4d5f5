use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug)]
pub struct TipAccountResult {
    pub accounts: Vec<String>,
}

impl TipAccountResult {
    pub fn from(accounts: Vec<String>) -> Result<Self> {
        Ok(TipAccountResult { accounts })
    }
}

/// Status of a submitted bundle, as reported by `getBundleStatuses`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleStatus {
    pub bundle_id: String,
    #[serde(default)]
    pub transactions: Vec<String>,
    #[serde(default)]
    pub slot: Option<u64>,
    #[serde(default)]
    pub confirmation_status: Option<String>,
}

impl BundleStatus {
    pub fn from_value(value: &Value) -> Result<Self> {
        serde_json::from_value(value.clone())
            .map_err(|e| anyhow!("malformed bundle status: {e}"))
    }

    pub fn is_landed(&self) -> bool {
        matches!(
            self.confirmation_status.as_deref(),
            Some("confirmed") | Some("finalized")
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_status_payload() {
        let value = json!({
            "bundle_id": "abc",
            "transactions": ["tx1", "tx2"],
            "slot": 12345,
            "confirmation_status": "confirmed",
            "err": {"Ok": null}
        });
        let status = BundleStatus::from_value(&value).unwrap();
        assert_eq!(status.bundle_id, "abc");
        assert_eq!(status.slot, Some(12345));
        assert!(status.is_landed());
    }

    #[test]
    fn processed_is_not_landed() {
        let value = json!({ "bundle_id": "abc", "confirmation_status": "processed" });
        assert!(!BundleStatus::from_value(&value).unwrap().is_landed());
    }
}
