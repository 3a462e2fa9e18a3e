use clap::{Parser, Subcommand, ValueEnum};
use dual_address_common::DEFAULT_SS58_FORMAT;

/// Converts and resolves Substrate (SS58) and Ethereum addresses.
#[derive(Parser)]
#[command(version, propagate_version = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,

    /// The network identifier SS58 output is rendered under.
    #[arg(long, global = true, env = "SS58_FORMAT", default_value_t = DEFAULT_SS58_FORMAT)]
    pub(crate) ss58_format: u16,

    /// Parse address arguments as JSON (`{"Substrate": ..}`, `{"eth": .., "sub": ..}`, ..)
    /// rather than as bare strings.
    #[arg(long, global = true)]
    pub(crate) json: bool,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Prints the canonical form of an address: SS58 under the selected network,
    /// or the checksummed Ethereum address.
    Normalize { input: String },
    /// Decodes an SS58 address into its public key and network.
    Decode {
        address: String,
        /// Skip the checksum check.
        #[arg(long)]
        ignore_checksum: bool,
        /// Reject addresses rendered under any other network.
        #[arg(long)]
        expect_format: Option<u16>,
    },
    /// Derives the other chain's address of an account.
    Mirror {
        #[command(subcommand)]
        direction: MirrorDirection,
    },
    /// Converts between collection ids and collection addresses.
    Collection {
        #[command(subcommand)]
        conversion: CollectionConversion,
    },
    /// Converts between (collection, token) ids and nesting addresses.
    Nesting {
        #[command(subcommand)]
        conversion: NestingConversion,
    },
    /// Resolves any accepted input shape and prints one of its views.
    Extract {
        input: String,
        #[arg(short, long, value_enum, default_value = "cross-account-id")]
        view: View,
        /// Normalise the resolved address.
        #[arg(short, long)]
        normalize: bool,
    },
}

#[derive(Subcommand)]
pub(crate) enum MirrorDirection {
    /// The first 20 bytes of the public key.
    ToEthereum {
        address: String,
        #[arg(long)]
        ignore_checksum: bool,
    },
    /// The hash-derived Substrate account of an Ethereum address.
    ToSubstrate { address: String },
}

#[derive(Subcommand)]
pub(crate) enum CollectionConversion {
    ToAddress {
        #[arg(allow_negative_numbers = true)]
        collection_id: f64,
    },
    ToId { address: String },
}

#[derive(Subcommand)]
pub(crate) enum NestingConversion {
    ToAddress {
        #[arg(allow_negative_numbers = true)]
        collection_id: f64,
        #[arg(allow_negative_numbers = true)]
        token_id: f64,
    },
    ToIds { address: String },
}

#[derive(ValueEnum, Clone, Copy, PartialEq, Debug)]
pub(crate) enum View {
    Address,
    CrossAccountId,
    Uncapitalized,
    SubstrateOrMirror,
    Enhanced,
    EthCrossAccountId,
    Scan,
}
