use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `agri` binary.
#[derive(Debug, Parser)]
#[command(name = "agri", version, about = "Agrilink - sell farm produce from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Quiet mode (errors only, no spinners)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use agri_publish::ImageSource;
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::subcommands::{AuthCommands, ListingCommands};
    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_and_after_subcommand() {
        let cli = Cli::try_parse_from(["agri", "--format", "json", "--verbose", "dashboard"])
            .expect("cli should parse");
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Dashboard));

        let cli = Cli::try_parse_from(["agri", "market", "--format", "raw", "--quiet"])
            .expect("cli should parse");
        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["agri", "--format", "xml", "analytics"]).is_err());
    }

    #[test]
    fn listing_create_collects_images_in_order() {
        let cli = Cli::try_parse_from([
            "agri",
            "listing",
            "create",
            "--nomenclature",
            "Seed Bag",
            "--price",
            "500",
            "--image",
            "/p/a.jpg",
            "--image",
            "camera:/p/b.jpg",
            "--image",
            "gallery:/p/c.jpg",
            "--logistics",
        ])
        .expect("cli should parse");

        let Commands::Listing {
            action: ListingCommands::Create(args),
        } = cli.command
        else {
            panic!("expected listing create");
        };
        assert_eq!(args.nomenclature, "Seed Bag");
        let images: Vec<_> = args
            .images
            .iter()
            .map(|image| (image.source, image.path.as_str()))
            .collect();
        assert_eq!(
            images,
            vec![
                (ImageSource::Gallery, "/p/a.jpg"),
                (ImageSource::Camera, "/p/b.jpg"),
                (ImageSource::Gallery, "/p/c.jpg"),
            ]
        );
        assert!(args.logistics);
        assert!(!args.no_provenance);
    }

    #[test]
    fn signup_requires_terms_flag_to_be_explicit() {
        let cli = Cli::try_parse_from([
            "agri",
            "auth",
            "signup",
            "--full-name",
            "Ann",
            "--farm-name",
            "Green Acres",
            "--email",
            "ann@farm.test",
            "--password",
            "secret1",
        ])
        .expect("cli should parse");
        let Commands::Auth {
            action: AuthCommands::Signup(args),
        } = cli.command
        else {
            panic!("expected auth signup");
        };
        assert!(!args.agree_terms);
    }

    #[test]
    fn listing_delete_takes_id() {
        let cli = Cli::try_parse_from(["agri", "listing", "delete", "abc123"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Listing {
                action: ListingCommands::Delete { ref id }
            } if id == "abc123"
        ));
    }
}
