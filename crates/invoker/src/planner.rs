//! Invocation planning.
//!
//! The planner matches the requested function names against the configured
//! calls and the ABI, encodes arguments, and works out who has to authorize
//! each state-changing call. It never touches credentials; every call that
//! cannot be planned becomes a failed entry and the rest of the plan is kept.

use punica_config::{FunctionCall, InvokeConfig};
use punica_smart_contract::{encode_arguments, AbiDescriptor, AbiFunction, TypedValue};
use punica_wallets::{Account, Wallet};

use crate::error::{InvokeError, Result};

/// How a planned call is authorized.
#[derive(Debug, Clone, PartialEq)]
pub enum CallKind {
    /// Read-only simulation, no credential needed.
    PreExec,
    /// Signed by the payer and, for multi-signature calls, the signers.
    StateChanging {
        payer: Account,
        signers: Vec<Account>,
        threshold: Option<u32>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedCall {
    pub function: String,
    pub parameters: Vec<TypedValue>,
    pub kind: CallKind,
}

impl PlannedCall {
    pub fn payer(&self) -> Option<&Account> {
        match &self.kind {
            CallKind::PreExec => None,
            CallKind::StateChanging { payer, .. } => Some(payer),
        }
    }

    pub fn is_pre_exec(&self) -> bool {
        matches!(self.kind, CallKind::PreExec)
    }
}

/// One step of the plan, in the order the calls were requested.
#[derive(Debug)]
pub struct PlanEntry {
    pub function: String,
    pub call: Result<PlannedCall>,
}

impl PlanEntry {
    /// True when the call is state-changing and paid by `address`.
    pub fn is_paid_by(&self, address: &str) -> bool {
        matches!(&self.call, Ok(call) if call.payer().map_or(false, |payer| payer.address == address))
    }
}

pub struct Planner<'a> {
    invoke: &'a InvokeConfig,
    abi: &'a AbiDescriptor,
    wallet: &'a Wallet,
}

impl<'a> Planner<'a> {
    pub fn new(invoke: &'a InvokeConfig, abi: &'a AbiDescriptor, wallet: &'a Wallet) -> Self {
        Self { invoke, abi, wallet }
    }

    /// Plans `requested` in the given order, or every configured call in
    /// configuration order.
    pub fn plan(&self, requested: Option<&[String]>) -> Vec<PlanEntry> {
        let configured = self.invoke.functions_by_name();
        let exported = self.abi.functions_by_name();

        let names: Vec<String> = match requested {
            Some(names) => names.iter().map(|name| name.trim().to_string()).collect(),
            None => configured.keys().map(|name| name.to_string()).collect(),
        };

        names
            .into_iter()
            .map(|function| {
                let call = configured
                    .get(function.as_str())
                    .ok_or_else(|| InvokeError::FunctionNotInConfig(function.clone()))
                    .and_then(|call| {
                        let abi_function = exported
                            .get(function.as_str())
                            .ok_or_else(|| InvokeError::FunctionNotInAbi(function.clone()))?;
                        self.plan_call(call, abi_function)
                    });
                PlanEntry { function, call }
            })
            .collect()
    }

    fn plan_call(&self, call: &FunctionCall, abi_function: &AbiFunction) -> Result<PlannedCall> {
        let parameters = encode_arguments(&call.args, abi_function)?;
        let function = abi_function.name.clone();

        if call.pre_exec {
            return Ok(PlannedCall {
                function,
                parameters,
                kind: CallKind::PreExec,
            });
        }

        let payer_address = call
            .payer
            .as_deref()
            .or(self.invoke.default_payer.as_deref())
            .filter(|address| !address.is_empty())
            .ok_or_else(|| InvokeError::MissingPayer(function.clone()))?;
        let payer = self.account(payer_address)?;

        let (signers, threshold) = match &call.signature {
            None => (Vec::new(), None),
            Some(signature) => {
                if signature.m == 0 || signature.m as usize > signature.signers.len() {
                    return Err(InvokeError::InvalidSignatureThreshold {
                        function,
                        m: signature.m,
                        signers: signature.signers.len(),
                    });
                }
                let signers = signature
                    .signers
                    .iter()
                    .map(|address| self.account(address))
                    .collect::<Result<Vec<_>>>()?;
                (signers, Some(signature.m))
            }
        };

        Ok(PlannedCall {
            function,
            parameters,
            kind: CallKind::StateChanging {
                payer,
                signers,
                threshold,
            },
        })
    }

    fn account(&self, address: &str) -> Result<Account> {
        self.wallet
            .account(address)
            .cloned()
            .ok_or_else(|| InvokeError::AccountNotInWallet(address.to_string()))
    }
}
