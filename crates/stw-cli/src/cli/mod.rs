use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `stw` binary.
#[derive(Debug, Parser)]
#[command(name = "stw", version, about = "Steward - Supabase admin directory tool")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Act as a member of this organization instead of the session's
    #[arg(long, global = true)]
    pub org: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            org: self.org.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::subcommands::{AuthCommands, TeamsCommands, UsersCommands};
    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "stw", "--format", "table", "--org", "acme", "--verbose", "teams", "list",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.org.as_deref(), Some("acme"));
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Teams {
                action: TeamsCommands::List { refresh: false }
            }
        ));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["stw", "users", "list", "--refresh", "--quiet", "-f", "raw"])
            .expect("cli should parse");

        assert!(cli.quiet);
        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(matches!(
            cli.command,
            Commands::Users {
                action: UsersCommands::List { refresh: true }
            }
        ));
    }

    #[test]
    fn global_flags_struct_mirrors_cli() {
        let cli =
            Cli::try_parse_from(["stw", "--org", "north", "license"]).expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.format, OutputFormat::Json);
        assert_eq!(flags.org.as_deref(), Some("north"));
    }

    #[test]
    fn users_create_collects_repeated_roles() {
        let cli = Cli::try_parse_from([
            "stw",
            "users",
            "create",
            "--email",
            "ada@example.com",
            "--password",
            "hunter22",
            "--user-name",
            "Ada",
            "--department",
            "Engineering",
            "--role",
            "admin",
            "--role",
            "editor",
        ])
        .expect("cli should parse");

        let Commands::Users {
            action: UsersCommands::Create(args),
        } = cli.command
        else {
            panic!("expected users create");
        };
        assert_eq!(args.email, "ada@example.com");
        assert_eq!(args.roles, vec!["admin".to_string(), "editor".to_string()]);
        assert!(args.phone.is_none());
    }

    #[test]
    fn users_create_requires_department() {
        let result = Cli::try_parse_from([
            "stw",
            "users",
            "create",
            "--email",
            "ada@example.com",
            "--password",
            "hunter22",
            "--user-name",
            "Ada",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn auth_login_parses_credentials() {
        let cli = Cli::try_parse_from([
            "stw",
            "auth",
            "login",
            "--email",
            "ops@example.com",
            "--password",
            "secret",
        ])
        .expect("cli should parse");

        let Commands::Auth {
            action: AuthCommands::Login(args),
        } = cli.command
        else {
            panic!("expected auth login");
        };
        assert_eq!(args.email, "ops@example.com");
        assert_eq!(args.password, "secret");
    }

    #[test]
    fn docs_location_is_optional() {
        let cli = Cli::try_parse_from(["stw", "docs"]).expect("cli should parse");
        let Commands::Docs(args) = cli.command else {
            panic!("expected docs");
        };
        assert!(args.location.is_none());
    }
}
