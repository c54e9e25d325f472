pub mod auth;
pub mod notes;

use crate::output;
use api::ApiError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Print an API failure for humans and turn it into the process exit error.
pub(crate) fn report(err: ApiError) -> anyhow::Error {
    if let ApiError::Validation(fields) = &err {
        for (field, messages) in fields.iter() {
            for message in messages {
                output::error(&format!("{field}: {message}"));
            }
        }
        return anyhow::anyhow!("validation failed");
    }
    output::error(&err.detail());
    anyhow::anyhow!(err)
}

#[derive(Parser)]
#[command(
    name = "inkpad",
    author,
    version,
    about = "Inkpad - command-line client for the Inkpad notes API",
    long_about = "Works against a running Inkpad backend.\n\nConfiguration comes from an optional \
                  TOML file plus INKPAD_* environment variables;\ntokens persist across \
                  invocations so you only log in once."
)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true, env = "INKPAD_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Log in and store the session tokens")]
    Login(auth::LoginArgs),

    #[command(about = "Create an account and log in")]
    Register(auth::RegisterArgs),

    #[command(about = "Invalidate the session and remove stored tokens")]
    Logout,

    #[command(about = "Show the currently authenticated user")]
    Whoami(auth::WhoamiArgs),

    #[command(subcommand, about = "List, show, create, edit, and delete notes")]
    Notes(NotesCommand),
}

#[derive(Subcommand)]
pub enum NotesCommand {
    #[command(about = "List notes with optional search, filters, and sorting")]
    List(notes::ListArgs),

    #[command(about = "Show a single note")]
    Show(notes::ShowArgs),

    #[command(about = "Create a note")]
    Create(notes::CreateArgs),

    #[command(about = "Replace a note's title and content")]
    Edit(notes::EditArgs),

    #[command(about = "Delete a note")]
    Delete(notes::DeleteArgs),
}
