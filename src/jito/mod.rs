//! JSON-RPC client for the block-engine bundle relay.
//!
//! Signed transactions are forwarded as base64-encoded bundles; tip accounts
//! are fetched once and picked at random per bundle.

use std::{future::Future, str::FromStr, time::Duration};

use anyhow::{anyhow, Result};
use base64::{engine::general_purpose, Engine as _};
use rand::seq::IteratorRandom;
use serde_json::{json, Value};
use solana_sdk::{
    pubkey::Pubkey,
    transaction::{Transaction, VersionedTransaction},
};
use tokio::sync::RwLock;
use tracing::{debug, error};

pub mod api;

use api::{BundleStatus, TipAccountResult};

pub struct JitoClient {
    base_url: String,
    tip_accounts: RwLock<Vec<String>>,
    client: reqwest::Client,
}

impl Clone for JitoClient {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            tip_accounts: RwLock::new(Vec::new()),
            client: self.client.clone(),
        }
    }
}

impl JitoClient {
    pub fn new(jito_url: &str) -> Self {
        Self {
            base_url: jito_url.to_string(),
            tip_accounts: RwLock::new(vec![]),
            client: reqwest::Client::new(),
        }
    }

    async fn send_request<T>(&self, method: &str, params: Value) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        let response: Value = self
            .client
            .post(&self.base_url)
            .json(&body)
            .send()
            .await?
            .json()
            .await?;

        if let Some(err) = response.get("error") {
            let code = err.get("code").and_then(Value::as_i64).unwrap_or(0);
            let message = err
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            debug!("{} {}", code, message);
            return Err(anyhow!("relay error {code}: {message}"));
        }

        let result = response
            .get("result")
            .cloned()
            .ok_or_else(|| anyhow!("relay response missing result"))?;
        Ok(serde_json::from_value(result)?)
    }

    /// Submits signed transactions as one bundle; returns the bundle id.
    pub async fn send_bundle(&self, transactions: &[VersionedTransaction]) -> Result<String> {
        if transactions.is_empty() {
            return Err(anyhow!("bundle is empty"));
        }
        let mut serialized_encoded: Vec<String> = Vec::with_capacity(transactions.len());
        for transaction in transactions {
            serialized_encoded.push(serialize_and_encode(transaction)?);
        }
        self.send_request(
            "sendBundle",
            json!([serialized_encoded, { "encoding": "base64" }]),
        )
        .await
    }

    pub async fn send_transaction(&self, transaction: &Transaction) -> Result<String> {
        let bundle = vec![VersionedTransaction::from(transaction.clone())];
        self.send_bundle(&bundle).await
    }

    pub async fn get_bundle_statuses(&self, bundle_ids: &[String]) -> Result<Vec<Value>> {
        let response: Value = self
            .send_request("getBundleStatuses", json!([bundle_ids]))
            .await?;
        let statuses = response
            .get("value")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        Ok(statuses)
    }

    pub async fn get_tip_accounts(&self) -> Result<TipAccountResult> {
        let result: Vec<String> = self.send_request("getTipAccounts", Value::Null).await?;
        TipAccountResult::from(result)
    }

    pub async fn init_tip_accounts(&self) -> Result<()> {
        let accounts = self.get_tip_accounts().await?;
        self.store_tip_accounts(accounts).await;
        Ok(())
    }

    async fn store_tip_accounts(&self, accounts: TipAccountResult) {
        let mut tip_accounts = self.tip_accounts.write().await;
        tip_accounts.clear();
        tip_accounts.extend(accounts.accounts);
    }

    async fn pick_cached_tip_account(&self) -> Option<Result<Pubkey>> {
        let accounts = self.tip_accounts.read().await;
        let acc = accounts.iter().choose(&mut rand::thread_rng())?;
        Some(Pubkey::from_str(acc).map_err(|err| {
            error!("jito: failed to parse Pubkey: {:?}", err);
            err.into()
        }))
    }

    pub async fn get_tip_account(&self) -> Result<Pubkey> {
        self.get_tip_account_with(|| self.get_tip_accounts()).await
    }

    /// Cached pick first; on a cache miss the relay is queried through
    /// `fetch` and the result cached. An empty relay answer falls back to
    /// the well-known list. The fetch is injected so every branch is
    /// testable offline.
    async fn get_tip_account_with<F, Fut>(&self, fetch: F) -> Result<Pubkey>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<TipAccountResult>>,
    {
        if let Some(picked) = self.pick_cached_tip_account().await {
            return picked;
        }

        self.store_tip_accounts(fetch().await?).await;

        match self.pick_cached_tip_account().await {
            Some(picked) => picked,
            // Relay returned nothing, fall back to the well-known list
            None => {
                let acc = crate::constants::accounts::JITO_TIP_ACCOUNTS
                    .iter()
                    .choose(&mut rand::thread_rng())
                    .ok_or_else(|| anyhow!("jito: no tip accounts available"))?;
                Ok(Pubkey::from_str(acc)?)
            }
        }
    }

    /// Polls bundle statuses until the bundle lands or the deadline passes.
    /// The status source is injected so the poll loop is testable offline.
    pub async fn wait_for_bundle_confirmation<F, Fut>(
        &self,
        fetch_statuses: F,
        bundle_id: String,
        interval: Duration,
        timeout: Duration,
    ) -> Result<()>
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = Result<Vec<Value>>>,
    {
        let start = tokio::time::Instant::now();
        loop {
            let statuses = fetch_statuses(bundle_id.clone()).await?;
            for raw in &statuses {
                let status = BundleStatus::from_value(raw)?;
                if status.bundle_id == bundle_id && status.is_landed() {
                    return Ok(());
                }
            }
            if start.elapsed() >= timeout {
                return Err(anyhow!("bundle {bundle_id} not confirmed within deadline"));
            }
            tokio::time::sleep(interval).await;
        }
    }
}

fn serialize_and_encode(transaction: &VersionedTransaction) -> Result<String> {
    let serialized = bincode::serialize(transaction)
        .map_err(|e| anyhow!("Serialization failed: {e}"))?;
    Ok(general_purpose::STANDARD.encode(serialized))
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use solana_sdk::{hash::Hash, signature::Keypair, signer::Signer, system_transaction};

    use super::*;

    fn generate_statuses(bundle_id: String, confirmation_status: &str) -> Vec<Value> {
        vec![json!({
            "bundle_id": bundle_id,
            "transactions": ["tx1", "tx2"],
            "slot": 12345,
            "confirmation_status": confirmation_status,
            "err": {"Ok": null}
        })]
    }

    #[tokio::test]
    async fn test_success_confirmation() {
        let client = JitoClient::new("http://localhost:8899");
        for &status in &["finalized", "confirmed"] {
            let wait_result = client
                .wait_for_bundle_confirmation(
                    |id| async { Ok(generate_statuses(id, status)) },
                    "6e4b90284778a40633b56e4289202ea79e62d2296bb3d45398bb93f6c9ec083d".to_string(),
                    Duration::from_secs(1),
                    Duration::from_secs(1),
                )
                .await;
            assert!(wait_result.is_ok());
        }
    }

    #[tokio::test]
    async fn test_error_confirmation() {
        let client = JitoClient::new("http://localhost:8899");
        let wait_result = client
            .wait_for_bundle_confirmation(
                |id| async { Ok(generate_statuses(id, "processed")) },
                "6e4b90284778a40633b56e4289202ea79e62d2296bb3d45398bb93f6c9ec083d".to_string(),
                Duration::from_millis(10),
                Duration::from_millis(30),
            )
            .await;
        assert!(wait_result.is_err());
    }

    #[test]
    fn encodes_transactions_as_base64() {
        let keypair = Keypair::new();
        let tx = VersionedTransaction::from(system_transaction::transfer(
            &keypair,
            &keypair.pubkey(),
            10_000,
            Hash::new_unique(),
        ));
        let encoded = serialize_and_encode(&tx).unwrap();
        let decoded = general_purpose::STANDARD.decode(encoded).unwrap();
        let round_tripped: VersionedTransaction = bincode::deserialize(&decoded).unwrap();
        assert_eq!(round_tripped.signatures, tx.signatures);
    }

    #[tokio::test]
    async fn empty_bundle_is_rejected() {
        let client = JitoClient::new("http://localhost:8899");
        assert!(client.send_bundle(&[]).await.is_err());
    }

    #[tokio::test]
    async fn cached_tip_account_skips_fetch() {
        let client = JitoClient::new("http://localhost:8899");
        let cached = Pubkey::new_unique();
        client.tip_accounts.write().await.push(cached.to_string());

        let picked = client
            .get_tip_account_with(|| async { Err(anyhow!("fetch must not run")) })
            .await
            .unwrap();
        assert_eq!(picked, cached);
    }

    #[tokio::test]
    async fn cache_miss_fetches_and_caches() {
        let client = JitoClient::new("http://localhost:8899");
        let fetched = Pubkey::new_unique();

        let picked = client
            .get_tip_account_with(|| async move {
                TipAccountResult::from(vec![fetched.to_string()])
            })
            .await
            .unwrap();
        assert_eq!(picked, fetched);
        assert_eq!(client.tip_accounts.read().await.len(), 1);
    }

    #[tokio::test]
    async fn empty_relay_answer_falls_back_to_known_tips() {
        let client = JitoClient::new("http://localhost:8899");

        let picked = client
            .get_tip_account_with(|| async { TipAccountResult::from(vec![]) })
            .await
            .unwrap();
        assert!(crate::constants::accounts::JITO_TIP_ACCOUNTS
            .contains(&picked.to_string().as_str()));
    }
}
