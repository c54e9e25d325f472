use clap::Args;
use dialoguer::Password;
use ink_core::{Credentials, Registration, User};
use serde_json::json;

use crate::app::App;
use crate::commands::report;
use crate::output;

#[derive(Args)]
pub struct LoginArgs {
    /// Email address or username
    pub identifier: String,

    /// Password (prompted when omitted)
    #[arg(short, long)]
    pub password: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct RegisterArgs {
    /// Display name
    #[arg(long)]
    pub name: String,

    /// Email address
    #[arg(long)]
    pub email: String,

    /// Username (defaults to logging in by email)
    #[arg(long)]
    pub username: Option<String>,

    /// Password (prompted with confirmation when omitted)
    #[arg(short, long)]
    pub password: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct WhoamiArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run_login(app: &App, args: LoginArgs) -> anyhow::Result<()> {
    let password = match args.password {
        Some(password) => password,
        None => Password::new().with_prompt("Password").interact()?,
    };

    // The backend accepts either identity; `@` marks it as an email.
    let credentials = if args.identifier.contains('@') {
        Credentials::with_email(args.identifier.as_str(), password)
    } else {
        Credentials::with_username(args.identifier.as_str(), password)
    };

    let session = app.session();
    let user = session.login(&credentials).await.map_err(report)?;
    print_user(&user, args.json, "Logged in as")
}

pub async fn run_register(app: &App, args: RegisterArgs) -> anyhow::Result<()> {
    let password = match args.password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()?,
    };

    let registration = Registration {
        name: args.name,
        username: args.username,
        email: args.email,
        password,
    };

    let session = app.session();
    let user = session.register(&registration).await.map_err(report)?;
    print_user(&user, args.json, "Registered and logged in as")
}

pub async fn run_logout(app: &App) -> anyhow::Result<()> {
    let session = app.session();
    session.logout().await.map_err(report)?;
    output::success("Logged out");
    Ok(())
}

pub async fn run_whoami(app: &App, args: WhoamiArgs) -> anyhow::Result<()> {
    let session = app.session();
    let state = session.initialize().await.map_err(report)?;
    match state.user() {
        Some(user) => print_user(user, args.json, "Authenticated as"),
        None => {
            output::warn("Not logged in.");
            output::info("Run 'inkpad login <email-or-username>' to start a session.");
            Ok(())
        }
    }
}

fn print_user(user: &User, as_json: bool, prefix: &str) -> anyhow::Result<()> {
    if as_json {
        let body = json!({
            "id": user.id,
            "username": user.username,
            "email": user.email,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        output::success(&format!("{prefix} {} <{}>", user.username, user.email));
    }
    Ok(())
}
