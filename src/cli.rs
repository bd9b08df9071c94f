use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "linear-tasks")]
#[command(about = "Serve a page of your assigned Linear issues", version)]
#[command(after_help = "EXAMPLES:
    linear-tasks                          Serve the page on 127.0.0.1:3000
    linear-tasks serve --bind 0.0.0.0:8080
    linear-tasks issues                   Print your assigned issues
    linear-tasks init                     Write a config file")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the issues page (default)
    #[command(after_help = "EXAMPLES:
    linear-tasks serve
    linear-tasks serve --bind 0.0.0.0:8080
    LINEAR_API_KEY=lin_api_... linear-tasks serve")]
    Serve {
        /// Address to listen on (overrides config file)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Fetch your assigned issues once and print them
    #[command(after_help = "EXAMPLES:
    linear-tasks issues
    linear-tasks issues --json")]
    Issues {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    linear-tasks completions bash > ~/.bash_completion.d/linear-tasks
    linear-tasks completions zsh > ~/.zfunc/_linear-tasks")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Initialize configuration file interactively
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_parses() {
        let cli = Cli::try_parse_from(["linear-tasks"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_serve_bind() {
        let cli = Cli::try_parse_from(["linear-tasks", "serve", "--bind", "0.0.0.0:8080"]).unwrap();
        match cli.command {
            Some(Commands::Serve { bind }) => assert_eq!(bind.as_deref(), Some("0.0.0.0:8080")),
            _ => panic!("expected serve"),
        }
    }
}
