use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for punica
#[derive(Parser, Debug, Clone)]
#[command(
    name = "punica",
    version = env!("CARGO_PKG_VERSION"),
    about = "Ontology smart-contract project tooling",
    long_about = "punica deploys compiled contracts, runs the invocations configured in punica-config.json, manages the project wallet and offers a few encoding helpers."
)]
pub struct Cli {
    /// Specify a punica project directory
    #[arg(short = 'p', long = "project", value_name = "PATH", global = true)]
    pub project: Option<PathBuf>,

    /// Print debug logs and full error chains
    #[arg(short = 'd', long = "debug", global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// The project directory, defaulting to the working directory.
    pub fn project_dir(&self) -> PathBuf {
        self.project.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Invoke the functions configured in invokeConfig
    Invoke(InvokeArgs),
    /// Deploy the compiled contract
    Deploy(DeployArgs),
    /// Write a call template for the configured functions
    Template(TemplateArgs),
    /// Manage the project wallet
    Wallet(WalletArgs),
    /// Encoding helpers
    #[command(subcommand)]
    Tool(ToolCommand),
}

#[derive(Args, Debug, Clone, Default)]
pub struct InvokeArgs {
    /// Specify which network the contracts are deployed to
    #[arg(long, value_name = "NETWORK")]
    pub network: Option<String>,

    /// Specify which wallet file will be used
    #[arg(long, value_name = "WALLET")]
    pub wallet: Option<String>,

    /// Specify which config file will be used
    #[arg(long, value_name = "CONFIG")]
    pub config: Option<String>,

    /// Specify which functions will be executed, comma separated
    #[arg(long, value_name = "FUNCTIONS", value_delimiter = ',')]
    pub functions: Option<Vec<String>>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct DeployArgs {
    /// Specify which network the contract will be deployed to
    #[arg(long, value_name = "NETWORK")]
    pub network: Option<String>,

    /// Specify which avm file will be deployed
    #[arg(long, value_name = "AVM")]
    pub avm: Option<String>,

    /// Specify which wallet file will be used
    #[arg(long, value_name = "WALLET")]
    pub wallet: Option<String>,

    /// Specify which config file will be used
    #[arg(long, value_name = "CONFIG")]
    pub config: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct TemplateArgs {
    /// Specify which config file will be used
    #[arg(long, value_name = "CONFIG")]
    pub config: Option<String>,

    /// ABI file; defaults to invokeConfig.abi
    #[arg(long, value_name = "PATH")]
    pub abi: Option<String>,

    /// Specify which wallet file will be referenced
    #[arg(long, value_name = "WALLET")]
    pub wallet: Option<String>,

    /// Write the template here instead of standard output
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct WalletArgs {
    /// Specify which wallet file will be used
    #[arg(long, value_name = "WALLET", global = true)]
    pub wallet: Option<String>,

    #[command(subcommand)]
    pub command: WalletCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum WalletCommand {
    /// Manage the accounts of the wallet
    #[command(subcommand)]
    Account(AccountCommand),
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum AccountCommand {
    /// Create a new account
    Add {
        #[arg(long, value_name = "LABEL")]
        label: Option<String>,
    },
    /// Delete an account after verifying its password
    Delete {
        #[arg(value_name = "ADDRESS")]
        address: String,
    },
    /// Import an account from a raw private key
    Import {
        #[arg(value_name = "PRIVATE_KEY_HEX")]
        private_key: String,
    },
    /// List the accounts of the wallet
    List,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ToolCommand {
    /// Convert a base58 address to hex
    AddressToHex {
        #[arg(value_name = "ADDRESS")]
        address: String,
    },
    /// Convert a string to hex
    StrToHex {
        #[arg(value_name = "STRING")]
        value: String,
    },
    /// Reverse the bytes of a hex string
    HexReverse {
        #[arg(value_name = "HEX")]
        hex: String,
    },
    /// Encode an integer as little-endian two's-complement hex
    NumToHex {
        #[arg(value_name = "NUMBER", allow_hyphen_values = true)]
        number: String,
    },
    /// Generate a random private key
    RandomPrivateKey,
    /// Decrypt an encrypted private key
    DecryptPrivateKey {
        #[arg(value_name = "KEY")]
        key: String,
        #[arg(value_name = "ADDRESS")]
        address: String,
        #[arg(value_name = "SALT")]
        salt: String,
        /// scrypt cost parameter
        #[arg(short = 'n', long = "n", default_value_t = 16384)]
        n: u32,
    },
}
