use anyhow::{Context, Result};
use clap::Parser;
use dotenvy::dotenv;
use dual_address::{
    cross_account::CrossAccountId,
    ethereum::{collection, nesting},
    extract,
    hex_utils::dword,
    mirror, ss58,
};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::cli::{CollectionConversion, Command, MirrorDirection, NestingConversion, View};

mod cli;
mod init;

fn main() -> Result<()> {
    dotenv().ok();
    init::tracing();

    let args = cli::Cli::parse();
    let ss58_format = args.ss58_format;
    ss58::validate_format(ss58_format).context("Invalid --ss58-format")?;

    match args.command {
        Command::Normalize { input } => {
            let input = parse_input(&input, args.json)?;
            let normalized = match extract::cross_account_id_normalized(&input)
                .with_context(|| format!("Failed to resolve {input}"))?
            {
                CrossAccountId::Substrate(address) => ss58::normalize(&address, ss58_format)?,
                CrossAccountId::Ethereum(address) => address,
            };
            println!("{normalized}");
        }
        Command::Decode {
            address,
            ignore_checksum,
            expect_format,
        } => {
            let decoded = ss58::decode_with_options(&address, ignore_checksum, expect_format)
                .with_context(|| format!("Failed to decode {address}"))?;
            print_json(&decoded)?;
        }
        Command::Mirror { direction } => {
            let mirrored = match direction {
                MirrorDirection::ToEthereum {
                    address,
                    ignore_checksum,
                } => mirror::substrate_to_ethereum_with_options(&address, ignore_checksum)
                    .with_context(|| format!("Failed to mirror {address}"))?,
                MirrorDirection::ToSubstrate { address } => {
                    mirror::ethereum_to_substrate(&address, ss58_format)
                        .with_context(|| format!("Failed to mirror {address}"))?
                }
            };
            println!("{mirrored}");
        }
        Command::Collection { conversion } => match conversion {
            CollectionConversion::ToAddress { collection_id } => {
                let collection_id =
                    dword::check_u32(collection_id).context("Invalid collection id")?;
                println!("{}", collection::id_to_address(collection_id));
            }
            CollectionConversion::ToId { address } => {
                println!("{}", collection::address_to_id(&address)?);
            }
        },
        Command::Nesting { conversion } => match conversion {
            NestingConversion::ToAddress {
                collection_id,
                token_id,
            } => {
                let collection_id =
                    dword::check_u32(collection_id).context("Invalid collection id")?;
                let token_id = dword::check_u32(token_id).context("Invalid token id")?;
                println!("{}", nesting::ids_to_address(collection_id, token_id));
            }
            NestingConversion::ToIds { address } => {
                print_json(&nesting::address_to_ids(&address)?)?;
            }
        },
        Command::Extract {
            input,
            view,
            normalize,
        } => {
            let input = parse_input(&input, args.json)?;
            debug!(?view, normalize, "Extracting from {input}");
            extract_view(&input, view, normalize, ss58_format)
                .with_context(|| format!("Failed to extract {view:?} from {input}"))?;
        }
    };

    Ok(())
}

/// Bare arguments are addresses; `--json` arguments may be any accepted shape.
fn parse_input(input: &str, json: bool) -> Result<Value> {
    if json {
        serde_json::from_str(input).with_context(|| format!("{input} is not valid JSON"))
    } else {
        Ok(Value::String(input.to_owned()))
    }
}

fn extract_view(input: &Value, view: View, normalize: bool, ss58_format: u16) -> Result<()> {
    match view {
        View::Address if normalize => println!("{}", extract::address_normalized(input)?),
        View::Address => println!("{}", extract::address(input)?),
        View::CrossAccountId if normalize => {
            print_json(&extract::cross_account_id_normalized(input)?)?
        }
        View::CrossAccountId => print_json(&extract::cross_account_id(input)?)?,
        View::Uncapitalized => print_json(&extract::cross_account_id_uncapitalized(input)?)?,
        View::SubstrateOrMirror if normalize => println!(
            "{}",
            extract::substrate_or_mirror_if_ethereum_normalized(input)?
        ),
        View::SubstrateOrMirror => {
            println!("{}", extract::substrate_or_mirror_if_ethereum(input)?)
        }
        View::Enhanced => print_json(&extract::enhanced_cross_account_id(input, ss58_format)?)?,
        View::EthCrossAccountId => print_json(&extract::eth_cross_account_id(input)?)?,
        View::Scan => println!("{}", extract::address_for_scan_normalized(input)?),
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
