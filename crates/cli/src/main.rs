//! Linkbio CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations (tables and the session store)
//! linkbio-cli migrate
//!
//! # Create an admin user (password read from stdin)
//! echo 'a-long-password' | linkbio-cli admin create -u maria
//!
//! # Replace an admin's password
//! echo 'another-password' | linkbio-cli admin set-password -u maria
//!
//! # List admin users
//! linkbio-cli admin list
//!
//! # Insert default page content if none exists
//! linkbio-cli seed defaults
//!
//! # Replace existing page content with the defaults
//! linkbio-cli seed defaults --force
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `admin` - Manage admin users
//! - `seed` - Write default page content

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "linkbio-cli")]
#[command(author, version, about = "Link-in-bio CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage admin users
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Seed page content
    Seed {
        #[command(subcommand)]
        action: SeedAction,
    },
}

#[derive(Subcommand)]
enum SeedAction {
    /// Write the default page content
    Defaults {
        /// Replace existing content with the defaults
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin user, reading the password from stdin
    Create {
        /// Login name
        #[arg(short, long)]
        username: String,
    },
    /// Replace an admin's password, reading it from stdin
    SetPassword {
        /// Login name
        #[arg(short, long)]
        username: String,
    },
    /// List admin users
    List,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Admin { action } => match action {
            AdminAction::Create { username } => {
                commands::admin::create_user(&username).await?;
            }
            AdminAction::SetPassword { username } => {
                commands::admin::set_password(&username).await?;
            }
            AdminAction::List => commands::admin::list_users().await?,
        },
        Commands::Seed {
            action: SeedAction::Defaults { force },
        } => commands::seed::run(force).await?,
    }
    Ok(())
}
