//! Punica Invoker
//!
//! Runs the contract calls described by a project's `invokeConfig` against a
//! chain endpoint, deploys compiled contracts and renders call templates.
//!
//! The chain endpoint and the operator prompt are capabilities
//! ([`ChainClient`], [`CredentialPrompt`]) supplied by the caller, so the
//! whole engine can run against in-memory stubs.

pub mod client;
pub mod context;
pub mod credentials;
pub mod deployer;
pub mod dispatch;
pub mod error;
pub mod invoker;
pub mod outcome;
pub mod planner;
pub mod prompt;
pub mod signing;
pub mod template;

pub use client::{
    ChainClient, ChainResponse, ClientError, ClientResult, DeploymentRequest, InvocationRequest,
    Witness,
};
pub use context::{CancelHandle, ExecutionContext, PasswordCache};
pub use credentials::{CredentialResolver, Role};
pub use deployer::{contract_hash, read_avm, DeployOptions, DeployOutcome, Deployer};
pub use dispatch::{BatchSettings, Dispatcher};
pub use error::{InvokeError, Result};
pub use invoker::{InvokeOptions, Invoker};
pub use outcome::{BatchReport, CallOutcome, CallStatus};
pub use planner::{CallKind, PlanEntry, PlannedCall, Planner};
pub use prompt::{CredentialPrompt, NoPrompt};
pub use template::{render_template, CallTemplate};
