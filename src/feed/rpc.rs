//! JSON-RPC client for the ledger's `account_tx` and `account_info` commands

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use super::TransactionFeed;
use crate::config::RpcConfig;
use crate::error::FeedError;
use crate::types::{Cursor, FeedPage, LedgerTransaction, SUBUNITS_PER_PFT};

const SUCCESS_RESULT: &str = "tesSUCCESS";

#[derive(Debug, Deserialize)]
struct RpcEnvelope {
    result: Value,
}

#[derive(Debug, Deserialize)]
struct AccountTxResult {
    #[serde(default)]
    transactions: Vec<AccountTxEntry>,
    #[serde(default)]
    marker: Option<Cursor>,
}

/// API v2 nests the transaction under `tx_json`, v1 under `tx`
#[derive(Debug, Deserialize)]
struct AccountTxEntry {
    #[serde(default)]
    tx_json: Option<LedgerTransaction>,
    #[serde(default)]
    tx: Option<LedgerTransaction>,
    #[serde(default)]
    meta: Option<Value>,
}

impl AccountTxEntry {
    fn into_transaction(self) -> Option<LedgerTransaction> {
        let mut tx = self.tx_json.or(self.tx)?;
        tx.success = self
            .meta
            .as_ref()
            .and_then(|meta| meta.get("TransactionResult"))
            .and_then(Value::as_str)
            .map_or(true, |result| result == SUCCESS_RESULT);
        Some(tx)
    }
}

pub struct RpcLedgerClient {
    client: reqwest::Client,
    endpoint: String,
}

impl RpcLedgerClient {
    pub fn new(config: &RpcConfig) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    async fn call(&self, command: &'static str, params: Value) -> Result<Value, FeedError> {
        let body = json!({ "method": command, "params": [params] });

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        let bytes = response.bytes().await?;

        let envelope: RpcEnvelope =
            serde_json::from_slice(&bytes).map_err(|e| FeedError::Decode {
                command,
                reason: e.to_string(),
            })?;

        if envelope.result.get("status").and_then(Value::as_str) == Some("error") {
            let message = ["error_message", "error"]
                .iter()
                .find_map(|key| envelope.result.get(*key).and_then(Value::as_str))
                .unwrap_or("unknown error")
                .to_string();
            return Err(FeedError::Rpc { command, message });
        }

        Ok(envelope.result)
    }

    /// Validated balance of `account` in display units
    pub async fn account_balance(&self, account: &str) -> Result<f64, FeedError> {
        let result = self
            .call(
                "account_info",
                json!({ "account": account, "ledger_index": "validated" }),
            )
            .await?;

        let raw = result
            .pointer("/account_data/Balance")
            .and_then(Value::as_str)
            .ok_or_else(|| FeedError::Decode {
                command: "account_info",
                reason: "missing account_data.Balance".to_string(),
            })?;

        let subunits: u64 = raw.parse().map_err(|_| FeedError::Decode {
            command: "account_info",
            reason: format!("balance is not an integer: {}", raw),
        })?;

        Ok(subunits as f64 / SUBUNITS_PER_PFT as f64)
    }
}

#[async_trait]
impl TransactionFeed for RpcLedgerClient {
    async fn fetch_page(
        &self,
        account: &str,
        limit: u32,
        cursor: Option<&Cursor>,
    ) -> Result<FeedPage, FeedError> {
        let mut params = json!({
            "account": account,
            "limit": limit,
            "forward": false,
            "ledger_index_min": -1,
            "ledger_index_max": -1,
        });
        if let Some(cursor) = cursor {
            params["marker"] = cursor.0.clone();
        }

        let result = self.call("account_tx", params).await?;
        let parsed: AccountTxResult =
            serde_json::from_value(result).map_err(|e| FeedError::Decode {
                command: "account_tx",
                reason: e.to_string(),
            })?;

        let received = parsed.transactions.len();
        let transactions: Vec<LedgerTransaction> = parsed
            .transactions
            .into_iter()
            .filter_map(AccountTxEntry::into_transaction)
            .collect();
        if transactions.len() < received {
            debug!(
                "Skipped {} account_tx entries without a transaction body",
                received - transactions.len()
            );
        }

        Ok(FeedPage {
            transactions,
            received,
            cursor: parsed.marker,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::PaginatedFeedReader;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> RpcLedgerClient {
        RpcLedgerClient::new(&RpcConfig {
            endpoint: server.uri(),
            timeout_secs: 5,
            page_size: 400,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_account_balance_scaled_to_pft() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "method": "account_info" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": {
                    "account_data": { "Account": "rTop", "Balance": "12345678900" },
                    "status": "success"
                }
            })))
            .mount(&server)
            .await;

        let balance = client_for(&server).account_balance("rTop").await.unwrap();
        assert_eq!(balance, 12_345.6789);
    }

    #[tokio::test]
    async fn test_fetch_page_reads_both_api_versions_and_meta() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "method": "account_tx" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": {
                    "transactions": [
                        {
                            "tx_json": { "Account": "rA", "Destination": "rTop",
                                         "TransactionType": "Payment", "DeliverMax": "1000000" },
                            "meta": { "TransactionResult": "tesSUCCESS" }
                        },
                        {
                            "tx": { "Account": "rB", "Destination": "rTop",
                                    "TransactionType": "Payment", "Amount": "2000000" },
                            "meta": { "TransactionResult": "tecPATH_DRY" }
                        },
                        { "meta": { "TransactionResult": "tesSUCCESS" } }
                    ],
                    "marker": { "ledger": 100, "seq": 7 },
                    "status": "success"
                }
            })))
            .mount(&server)
            .await;

        let page = client_for(&server).fetch_page("rTop", 400, None).await.unwrap();

        assert_eq!(page.transactions.len(), 2);
        assert_eq!(page.received, 3);
        assert_eq!(page.transactions[0].sender, "rA");
        assert!(page.transactions[0].success);
        assert_eq!(page.transactions[1].sender, "rB");
        assert!(!page.transactions[1].success);
        assert_eq!(page.cursor, Some(Cursor(json!({ "ledger": 100, "seq": 7 }))));
    }

    #[tokio::test]
    async fn test_rpc_error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": { "error": "actNotFound", "error_message": "Account not found.",
                            "status": "error" }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_page("rNobody", 400, None).await.unwrap_err();
        match err {
            FeedError::Rpc { command, message } => {
                assert_eq!(command, "account_tx");
                assert_eq!(message, "Account not found.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_page_without_transaction_bodies_does_not_end_scan() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "params": [ { "marker": "m2" } ] })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": {
                    "transactions": [
                        {
                            "tx_json": { "Account": "rA", "Destination": "rTop",
                                         "TransactionType": "Payment", "Amount": "4000000" },
                            "meta": { "TransactionResult": "tesSUCCESS" }
                        }
                    ],
                    "status": "success"
                }
            })))
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": {
                    "transactions": [ { "meta": { "TransactionResult": "tesSUCCESS" } } ],
                    "marker": "m2",
                    "status": "success"
                }
            })))
            .with_priority(2)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let txs = PaginatedFeedReader::new(&client, 400).scan_all("rTop").await.unwrap();

        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].sender, "rA");
        assert_eq!(server.received_requests().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_http_failure_mid_scan_aborts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": {
                    "transactions": [
                        { "tx_json": { "Account": "rA", "TransactionType": "Payment" } }
                    ],
                    "marker": "next",
                    "status": "success"
                }
            })))
            .up_to_n_times(1)
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result = PaginatedFeedReader::new(&client, 400).scan_all("rTop").await;

        assert!(matches!(result, Err(FeedError::Transport(_))));
    }
}
