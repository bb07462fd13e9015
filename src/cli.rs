use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::writer::{SeedOptions, DEFAULT_OUTPUT};

#[derive(Parser, Debug)]
#[command(name = "item-seed")]
#[command(version, about = "Convert a game item CSV sheet into an SQL seed file")]
pub struct Cli {
    /// Item CSV with "Item Type" and "Component Name" columns
    pub input: PathBuf,

    /// Output SQL file
    #[arg(default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Rarity code every item references
    #[arg(short, long, default_value = "rarity1")]
    pub rarity: String,

    /// CSV field delimiter (single ASCII character)
    #[arg(short, long, default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Parse the process arguments. Usage errors exit with status 1.
    pub fn parse_args() -> Self {
        match Cli::try_parse() {
            Ok(cli) => cli,
            Err(err) => match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
                _ => {
                    let _ = err.print();
                    std::process::exit(1);
                }
            },
        }
    }

    pub fn seed_options(&self) -> SeedOptions {
        SeedOptions {
            rarity_code: self.rarity.clone(),
            delimiter: self.delimiter,
        }
    }
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(format!("delimiter must be a single ASCII character, got {:?}", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["item-seed", "items.csv"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("items.csv"));
        assert_eq!(cli.output, PathBuf::from("item-seed.sql"));
        assert_eq!(cli.rarity, "rarity1");
        assert_eq!(cli.delimiter, b',');
        assert!(!cli.json);
    }

    #[test]
    fn test_options() {
        let cli = Cli::try_parse_from([
            "item-seed", "items.csv", "out.sql", "-r", "rarity2", "-d", ";", "-vv", "--json",
        ])
        .unwrap();
        assert_eq!(cli.output, PathBuf::from("out.sql"));
        assert_eq!(cli.verbose, 2);
        let options = cli.seed_options();
        assert_eq!(options.rarity_code, "rarity2");
        assert_eq!(options.delimiter, b';');
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let err = Cli::try_parse_from(["item-seed"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter("\t"), Ok(b'\t'));
        assert!(parse_delimiter(";;").is_err());
        assert!(parse_delimiter("é").is_err());
    }
}
