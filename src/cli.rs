use std::path::PathBuf;

use clap::Parser;

/// Economics of a CHP unit with thermal storage and an auxiliary boiler,
/// dispatched by equal load following against a boiler-only baseline.
#[derive(Parser, Debug)]
#[command(author, version, about)]
#[must_use]
pub struct Args {
    /// Site configuration file (TOML).
    #[arg(long = "in", value_name = "FILE")]
    pub input: PathBuf,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_input_path() {
        let args = Args::try_parse_from(["chp-sim", "--in", "site.toml"]).unwrap();
        assert_eq!(args.input, PathBuf::from("site.toml"));
    }

    #[test]
    fn input_is_required() {
        assert!(Args::try_parse_from(["chp-sim"]).is_err());
    }
}
