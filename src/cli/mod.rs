//! Command-line interface.

pub mod add;
pub mod cat;
pub mod context;
pub mod crypt;
pub mod edit;
pub mod keys;
pub mod ls;
pub mod output;
pub mod resolve;
pub mod roster;

use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use crate::error::Result;
use context::Context;

/// Huddle - team secrets encrypted to a signed roster.
#[derive(Parser)]
#[command(
    name = "huddle",
    about = "Team secrets as encrypted files, recipients from a signed roster",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (default: ~/.huddle/config.toml)
    #[arg(long, global = true, env = "HUDDLE_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Create a new secret in $EDITOR (or from piped stdin)
    Add {
        /// File to create
        file: PathBuf,
    },

    /// Print a decrypted secret
    Cat {
        /// Encrypted file
        file: PathBuf,
    },

    /// Decrypt a secret in place
    Decrypt {
        /// Encrypted file
        file: PathBuf,
    },

    /// Encrypt a file in place, or re-encrypt it for the current roster
    #[command(visible_alias = "encrypt")]
    Enc {
        /// File to encrypt
        file: PathBuf,
    },

    /// Edit a secret in $EDITOR and re-encrypt it
    #[command(visible_alias = "mod")]
    Edit {
        /// Encrypted file
        file: PathBuf,
    },

    /// Manage roster keys in the keyring
    Keys {
        #[command(subcommand)]
        action: KeysAction,
    },

    /// List secrets (not implemented)
    Ls {
        /// Directory to list
        path: Option<PathBuf>,
    },

    /// Show who an access expression resolves to
    Resolve {
        /// Users and @groups, e.g. `alice @admins`
        #[arg(required = true, num_args = 1..)]
        expression: Vec<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the verified roster for this directory
    Roster {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// bash, elvish, fish, powershell, or zsh
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Key subcommands.
#[derive(Subcommand)]
pub enum KeysAction {
    /// Show every roster user's key and whether it is usable
    Display {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch every roster user's key from a keyserver
    Refresh {
        /// Keyserver URL (default from config)
        #[arg(long)]
        keyserver: Option<String>,
    },

    /// Import public keys from a file (or stdin)
    Import {
        /// Key file; reads stdin when omitted
        file: Option<PathBuf>,
    },
}

/// Execute a command.
///
/// Every command except `ls`, `keys import`, and `completions` first opens
/// the scope of the working directory, which verifies and parses its roster.
pub fn execute(command: Command, config: Option<&Path>) -> Result<()> {
    use Command::*;

    let open = || Context::open(config);

    match command {
        Add { file } => add::execute(&open()?, &file),
        Cat { file } => cat::execute(&open()?, &file),
        Decrypt { file } => crypt::decrypt(&open()?, &file),
        Enc { file } => crypt::encrypt(&open()?, &file),
        Edit { file } => edit::execute(&open()?, &file),
        Keys { action } => match action {
            KeysAction::Display { json } => keys::display(&open()?, json),
            KeysAction::Refresh { keyserver } => keys::refresh(&open()?, keyserver.as_deref()),
            KeysAction::Import { file } => keys::import(config, file.as_deref()),
        },
        Ls { path } => ls::execute(path.as_deref()),
        Resolve { expression, json } => resolve::execute(&open()?, &expression.join(" "), json),
        Roster { json } => roster::execute(&open()?, json),
        Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    }
}
