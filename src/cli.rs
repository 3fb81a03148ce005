use anyhow::Context;
use clap::{Parser, Subcommand};

use crockford_base32::{decode, encode};

#[derive(Parser, Debug)]
#[command(author, version, about = "Encode and decode integers with Crockford Base32", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Encode an integer value
    #[command(visible_alias = "e")]
    Encode {
        #[arg(allow_negative_numbers = true)]
        value: String,

        /// Append a check symbol to the encoded value
        #[arg(long = "check-symbol")]
        check_symbol: bool,
    },
    /// Decode a Crockford Base32 encoded value
    #[command(visible_alias = "d")]
    Decode {
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// The encoded value ends with a check symbol
        #[arg(long = "check-symbol")]
        check_symbol: bool,
    },
}

impl Command {
    pub fn run(&self) -> anyhow::Result<String> {
        match self {
            Command::Encode { value, check_symbol } => {
                let encoded = if value.starts_with('-') {
                    let value: i64 = value.parse().with_context(|| format!("'{value}' is not a valid integer"))?;
                    encode(value, *check_symbol)?
                } else {
                    let value: u64 = value.parse().with_context(|| format!("'{value}' is not a valid integer"))?;
                    encode(value, *check_symbol)?
                };
                Ok(encoded.into())
            }
            Command::Decode { value, check_symbol } => Ok(decode(value, *check_symbol)?.to_string()),
        }
    }
}

/// Rewrites the single-dash spellings `-cs` and `-?` into flags clap understands.
pub fn normalize_args<I>(args: I) -> impl Iterator<Item = String>
where
    I: IntoIterator<Item = String>,
{
    args.into_iter().map(|arg| match arg.as_str() {
        "-cs" => "--check-symbol".to_owned(),
        "-?" => "--help".to_owned(),
        _ => arg,
    })
}
