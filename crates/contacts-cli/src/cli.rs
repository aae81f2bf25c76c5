use clap::{Parser, Subcommand};

/// CLI surface definition. The interactive menu is the main entry point.
#[derive(Parser, Debug)]
#[command(
    name = "contacts",
    about = "Keep a list of contacts in a plain text file",
    version,
    propagate_version = true
)]
pub struct Cli {
    /// Optional subcommand; defaults to the interactive menu when absent.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open the interactive menu (choose Exit to save changes).
    Shell,
    /// Print all contacts and exit.
    List,
    /// Print the first contact with exactly this name.
    Search {
        /// Case-sensitive name to look up.
        name: String,
    },
    /// Print version and exit.
    Version,
    /// Manage CLI configuration.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommand {
    /// Create a default config file if one does not exist.
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_shell_when_missing_subcommand() {
        let cli = Cli::try_parse_from(["contacts"]).expect("parse should succeed");
        assert_eq!(cli.command, None);
    }

    #[test]
    fn parses_list_subcommand() {
        let cli = Cli::try_parse_from(["contacts", "list"]).expect("parse should succeed");
        assert_eq!(cli.command, Some(Command::List));
    }

    #[test]
    fn parses_search_with_spaced_name() {
        let cli = Cli::try_parse_from(["contacts", "search", "Alice Smith"])
            .expect("parse should succeed");
        assert_eq!(
            cli.command,
            Some(Command::Search {
                name: "Alice Smith".into()
            })
        );
    }

    #[test]
    fn search_requires_a_name() {
        assert!(Cli::try_parse_from(["contacts", "search"]).is_err());
    }

    #[test]
    fn parses_config_init_subcommand() {
        let cli =
            Cli::try_parse_from(["contacts", "config", "init"]).expect("parse should succeed");
        assert_eq!(cli.command, Some(Command::Config(ConfigCommand::Init)));
    }
}
