use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "catalog", version, about = "Catalog admin service and data file tools")]
pub struct Cli {
    /// TOML config file. Defaults to ./config.toml when present.
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the HTTP admin UI (default).
    Serve,

    /// Replace the table with the records of a JSON data file.
    Import {
        /// Data file to load.
        file: PathBuf,
    },

    /// Write the table to a JSON data file.
    Export {
        /// Output file. Defaults to `catalog.export_path`.
        file: Option<PathBuf>,
    },

    /// Sort a JSON data file in place by type, then by name length.
    Sort {
        /// Data file to rewrite.
        file: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_is_optional() {
        let cli = Cli::try_parse_from(["catalog"]).expect("no subcommand");
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["catalog", "import", "data.json", "-c", "prod.toml"])
            .expect("import with global config flag");
        assert_eq!(cli.config, Some(PathBuf::from("prod.toml")));
        assert!(matches!(cli.command, Some(Command::Import { .. })));
    }
}
