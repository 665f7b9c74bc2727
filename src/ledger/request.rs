//! Ledger requests and responses
//!
//! Serializable form of the four mutating operations, so a host (or the
//! replay CLI) can feed the ledger a stream of requests.

use serde::{Deserialize, Serialize};

use super::error::{LedgerError, LedgerResult};
use super::service::Ledger;
use crate::storage::RecordStore;
use crate::types::Identity;

/// A mutating ledger request, caller identity already authenticated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum LedgerRequest {
    Initialize {
        requester: Identity,
    },
    OpenAccount {
        requester: Identity,
    },
    Mint {
        caller: Identity,
        target: Identity,
        amount: u64,
    },
    Transfer {
        caller: Identity,
        from: Identity,
        to: Identity,
        amount: u64,
    },
}

impl LedgerRequest {
    pub fn name(&self) -> &'static str {
        match self {
            LedgerRequest::Initialize { .. } => "initialize",
            LedgerRequest::OpenAccount { .. } => "open_account",
            LedgerRequest::Mint { .. } => "mint",
            LedgerRequest::Transfer { .. } => "transfer",
        }
    }
}

/// Outcome of one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LedgerResponse {
    Ok,
    Rejected {
        code: u32,
        error: String,
        message: String,
    },
}

impl LedgerResponse {
    pub fn is_ok(&self) -> bool {
        matches!(self, LedgerResponse::Ok)
    }
}

impl From<&LedgerError> for LedgerResponse {
    fn from(err: &LedgerError) -> Self {
        LedgerResponse::Rejected {
            code: err.code(),
            error: err.error_code().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<LedgerResult<()>> for LedgerResponse {
    fn from(result: LedgerResult<()>) -> Self {
        match result {
            Ok(()) => LedgerResponse::Ok,
            Err(e) => LedgerResponse::from(&e),
        }
    }
}

impl<S: RecordStore> Ledger<S> {
    /// Dispatch a request to its operation
    pub async fn execute(&self, request: &LedgerRequest) -> LedgerResult<()> {
        match *request {
            LedgerRequest::Initialize { requester } => self.initialize(requester).await,
            LedgerRequest::OpenAccount { requester } => self.open_account(requester).await,
            LedgerRequest::Mint {
                caller,
                target,
                amount,
            } => self.mint(caller, target, amount).await,
            LedgerRequest::Transfer {
                caller,
                from,
                to,
                amount,
            } => self.transfer(caller, from, to, amount).await,
        }
    }

    /// Execute requests in order, one response per request
    ///
    /// A rejected request does not stop the batch.
    pub async fn execute_all(&self, requests: &[LedgerRequest]) -> Vec<LedgerResponse> {
        let mut responses: Vec<LedgerResponse> = Vec::with_capacity(requests.len());
        for request in requests {
            responses.push(self.execute(request).await.into());
        }
        responses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derivation::SeedResolver;
    use crate::storage::MemoryRecordStore;

    #[test]
    fn test_request_json_shape() {
        let json = format!(
            r#"{{"op":"mint","caller":"{}","target":"{}","amount":100}}"#,
            "01".repeat(32),
            "02".repeat(32)
        );
        let request: LedgerRequest = serde_json::from_str(&json).unwrap();

        assert_eq!(
            request,
            LedgerRequest::Mint {
                caller: Identity::new([1; 32]),
                target: Identity::new([2; 32]),
                amount: 100,
            }
        );
        assert_eq!(request.name(), "mint");
    }

    #[test]
    fn test_rejected_response_json() {
        let response = LedgerResponse::from(&LedgerError::InsufficientBalance);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["status"], "rejected");
        assert_eq!(json["code"], 6005);
        assert_eq!(json["error"], "INSUFFICIENT_BALANCE");
    }

    #[tokio::test]
    async fn test_execute_all_continues_after_rejection() {
        let ledger = Ledger::new(MemoryRecordStore::new(), SeedResolver::default());
        let authority = Identity::new([1; 32]);
        let holder = Identity::new([2; 32]);

        let responses = ledger
            .execute_all(&[
                LedgerRequest::Initialize { requester: authority },
                LedgerRequest::Initialize { requester: holder },
                LedgerRequest::OpenAccount { requester: holder },
                LedgerRequest::Mint {
                    caller: authority,
                    target: holder,
                    amount: 25,
                },
            ])
            .await;

        assert!(responses[0].is_ok());
        assert_eq!(responses[1], LedgerResponse::from(&LedgerError::AlreadyInitialized));
        assert!(responses[2].is_ok());
        assert!(responses[3].is_ok());
        assert_eq!(ledger.total_supply().await.unwrap(), 25);
    }
}
