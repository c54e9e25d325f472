use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod app;
mod commands;
mod output;

use commands::{Cli, Commands, NotesCommand};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let app = app::App::new(cli.config.as_deref())?;

    match cli.command {
        Commands::Login(args) => commands::auth::run_login(&app, args).await,
        Commands::Register(args) => commands::auth::run_register(&app, args).await,
        Commands::Logout => commands::auth::run_logout(&app).await,
        Commands::Whoami(args) => commands::auth::run_whoami(&app, args).await,
        Commands::Notes(cmd) => match cmd {
            NotesCommand::List(args) => commands::notes::run_list(&app, args).await,
            NotesCommand::Show(args) => commands::notes::run_show(&app, args).await,
            NotesCommand::Create(args) => commands::notes::run_create(&app, args).await,
            NotesCommand::Edit(args) => commands::notes::run_edit(&app, args).await,
            NotesCommand::Delete(args) => commands::notes::run_delete(&app, args).await,
        },
    }
}
