//! Sequential execution of a plan.

use std::time::Duration;

use punica_cryptography::KeyPair;
use punica_wallets::{Account, CredentialVault, ScryptParameters};
use tracing::{debug, info, warn};

use crate::client::{ChainClient, InvocationRequest};
use crate::context::ExecutionContext;
use crate::credentials::{CredentialResolver, Role};
use crate::error::{InvokeError, Result};
use crate::outcome::{BatchReport, CallStatus};
use crate::planner::{CallKind, PlanEntry, PlannedCall};
use crate::signing::{envelope_digest, envelope_message, sign_message};

/// Contract and gas settings shared by every call of a batch.
#[derive(Debug, Clone)]
pub struct BatchSettings {
    pub contract: String,
    pub gas_price: u64,
    pub gas_limit: u64,
    pub inter_call_delay: Duration,
}

pub struct Dispatcher<'a> {
    client: &'a dyn ChainClient,
    vault: &'a dyn CredentialVault,
    credentials: CredentialResolver<'a>,
    scrypt: &'a ScryptParameters,
    settings: BatchSettings,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        client: &'a dyn ChainClient,
        vault: &'a dyn CredentialVault,
        credentials: CredentialResolver<'a>,
        scrypt: &'a ScryptParameters,
        settings: BatchSettings,
    ) -> Self {
        Self {
            client,
            vault,
            credentials,
            scrypt,
            settings,
        }
    }

    /// Runs every entry in order. A failed call is reported and the next one
    /// runs; only cancellation stops the loop early.
    pub async fn run(&self, context: &mut ExecutionContext, plan: Vec<PlanEntry>) -> BatchReport {
        let mut report = BatchReport::default();
        let total = plan.len();

        for (index, entry) in plan.into_iter().enumerate() {
            if context.is_cancelled() {
                report.push(entry.function, CallStatus::Cancelled);
                continue;
            }

            info!(target: "punica", function = %entry.function, "Invoking {}...", entry.function);
            let mut sent = false;
            let status = match entry.call {
                Ok(call) => match self.execute(context, &call, &mut sent).await {
                    Ok(status) => status,
                    Err(e) => CallStatus::Failed(e),
                },
                Err(e) => CallStatus::Failed(e),
            };

            match &status {
                CallStatus::Submitted { transaction } => {
                    info!(target: "punica", function = %entry.function, transaction = %transaction, "Invocation was successful. Transaction: {}.", transaction)
                }
                CallStatus::PreExecuted { result } => {
                    info!(target: "punica", function = %entry.function, "Invocation was successful. Result: {}", result)
                }
                CallStatus::Failed(e) if context.debug => {
                    warn!(target: "punica", function = %entry.function, error = ?e, "Invocation failed: {}", e)
                }
                CallStatus::Failed(e) => {
                    warn!(target: "punica", function = %entry.function, "Invocation failed: {}", e)
                }
                CallStatus::Cancelled => {}
            }
            report.push(entry.function, status);

            // any state-changing request that reached the chain is followed by the delay
            if sent && index + 1 < total && !self.settings.inter_call_delay.is_zero() {
                tokio::time::sleep(self.settings.inter_call_delay).await;
            }
        }

        report
    }

    async fn execute(&self, context: &ExecutionContext, call: &PlannedCall, sent: &mut bool) -> Result<CallStatus> {
        match &call.kind {
            CallKind::PreExec => self.pre_execute(call).await,
            CallKind::StateChanging {
                payer,
                signers,
                threshold,
            } => self.submit(context, call, payer, signers, *threshold, sent).await,
        }
    }

    async fn pre_execute(&self, call: &PlannedCall) -> Result<CallStatus> {
        let request = InvocationRequest {
            contract: self.settings.contract.clone(),
            method: call.function.clone(),
            parameters: call.parameters.clone(),
            gas_price: self.settings.gas_price,
            gas_limit: self.settings.gas_limit,
            pre_exec: true,
            payer: None,
            threshold: None,
            witnesses: Vec::new(),
        };

        let response = self.client.invoke(request).await?;
        match response.pre_exec_result() {
            Some(result) => Ok(CallStatus::PreExecuted {
                result: result.clone(),
            }),
            None => Err(InvokeError::PreExecFailed(call.function.clone())),
        }
    }

    async fn submit(
        &self,
        context: &ExecutionContext,
        call: &PlannedCall,
        payer: &Account,
        signers: &[Account],
        threshold: Option<u32>,
        sent: &mut bool,
    ) -> Result<CallStatus> {
        let mut keys = vec![self.unlock(context, payer, Role::Payer)?];
        for signer in signers {
            if signer.address == payer.address {
                continue;
            }
            keys.push(self.unlock(context, signer, Role::Signer)?);
        }

        let message = envelope_message(
            &self.settings.contract,
            &call.function,
            &call.parameters,
            self.settings.gas_price,
            self.settings.gas_limit,
            &payer.address,
        )?;
        debug!(target: "punica", function = %call.function, envelope = %envelope_digest(&message), "signing invocation");

        let request = InvocationRequest {
            contract: self.settings.contract.clone(),
            method: call.function.clone(),
            parameters: call.parameters.clone(),
            gas_price: self.settings.gas_price,
            gas_limit: self.settings.gas_limit,
            pre_exec: false,
            payer: Some(payer.address.clone()),
            threshold,
            witnesses: sign_message(&message, &keys),
        };

        *sent = true;
        let response = self.client.invoke(request).await?;
        match response.transaction() {
            Some(transaction) => Ok(CallStatus::Submitted {
                transaction: transaction.to_string(),
            }),
            None => Err(InvokeError::SubmissionFailed {
                function: call.function.clone(),
                reason: format!("unexpected result {}", response.result),
            }),
        }
    }

    fn unlock(&self, context: &ExecutionContext, account: &Account, role: Role) -> Result<KeyPair> {
        let password = self.credentials.resolve(context, &account.address, role)?;
        Ok(self.vault.unlock(account, &password, self.scrypt)?)
    }
}
