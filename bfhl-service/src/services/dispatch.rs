//! Routes a parsed `/bfhl` request to the matching utility.

use super::ai::AiDelegate;
use super::math;
use crate::error::DispatchError;
use crate::models::{BfhlData, BfhlRequest};

#[derive(Clone)]
pub struct Dispatcher {
    ai: AiDelegate,
}

impl Dispatcher {
    pub fn new(ai: AiDelegate) -> Self {
        Self { ai }
    }

    /// Parse and execute a raw request body.
    pub async fn handle(&self, body: &[u8]) -> Result<BfhlData, DispatchError> {
        let request = BfhlRequest::from_body(body)?;
        tracing::debug!(kind = request.kind(), "Dispatching request");
        self.execute(request).await
    }

    pub async fn execute(&self, request: BfhlRequest) -> Result<BfhlData, DispatchError> {
        match request {
            BfhlRequest::Ai(question) => Ok(BfhlData::Text(self.ai.answer(&question).await)),
            // Number crunching runs on the blocking pool to keep workers free
            numeric => tokio::task::spawn_blocking(move || compute(numeric))
                .await
                .map_err(|e| DispatchError::Internal(e.into()))?,
        }
    }
}

fn compute(request: BfhlRequest) -> Result<BfhlData, DispatchError> {
    let data = match request {
        BfhlRequest::Fibonacci(n) => BfhlData::Sequence(math::fibonacci(n)?),
        BfhlRequest::Prime(values) => BfhlData::Primes(
            values
                .into_iter()
                .flatten()
                .filter(|v| math::is_prime(*v))
                .collect(),
        ),
        BfhlRequest::Hcf(values) => {
            BfhlData::Number(math::hcf(&values).ok_or(DispatchError::InvalidHcf)?)
        }
        BfhlRequest::Lcm(values) => {
            BfhlData::Number(math::lcm_of_list(&values)?.ok_or(DispatchError::InvalidLcm)?)
        }
        BfhlRequest::Ai(_) => {
            return Err(DispatchError::Internal(anyhow::anyhow!(
                "AI request routed to numeric pool"
            )))
        }
    };
    Ok(data)
}
