//! # Sejour CLI
//!
//! Command-line client for the Sejour booking API.
//!
//! It shares the session storage of the desktop app, so signing in from
//! either one signs in both.
//!
//! ## Commands
//!
//! - `login` / `logout` / `whoami` - session management
//! - `list <resource> [--page N]` - print one page of a collection
//! - `bookings confirm|cancel|receipt <id>` - booking actions and PDF receipts
//! - `verification qr <id> -o file.svg` - owner verification QR code
//!

pub mod output;

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use sejour_client::{ClientConfig, ClientContext, ListQuery, verification_qr_svg};
use sejour_core::{EntityId, Resource};
use sejour_model::{
    Amenity, Booking, BookingAction, Credentials, Dwelling, Hotel, Lounge, MenuItem,
    OwnerVerification, Residence, Restaurant, Room,
};
use serde::de::DeserializeOwned;

use output::ListLine;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "sejour-cli", version, about = "Command-line client for the Sejour booking API")]
pub struct Cli {
    /// API base URL (defaults to SEJOUR_API_URL, then the local dev server)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Session storage file (defaults to SEJOUR_STORAGE_PATH)
    #[arg(long, global = true)]
    pub storage: Option<PathBuf>,

    /// Log requests (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and store the session token
    Login {
        #[arg(long, env = "SEJOUR_EMAIL")]
        email: String,

        #[arg(long, env = "SEJOUR_PASSWORD", hide_env_values = true)]
        password: String,

        /// Pre-fill this email on the next sign-in
        #[arg(long)]
        remember: bool,
    },

    /// Sign out and forget the token
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Print one page of a collection
    List {
        resource: ResourceKind,

        /// Server page (1-based)
        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// Booking actions
    Bookings {
        #[command(subcommand)]
        action: BookingsCommand,
    },

    /// Owner verification
    Verification {
        #[command(subcommand)]
        action: VerificationCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum BookingsCommand {
    /// Confirm a pending booking
    Confirm { id: EntityId },

    /// Cancel a booking
    Cancel {
        id: EntityId,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Download the PDF receipt of a booking
    Receipt {
        id: EntityId,

        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum VerificationCommand {
    /// Render the verification token as an SVG QR code
    Qr {
        id: EntityId,

        #[arg(short, long)]
        output: PathBuf,
    },
}

/// Collections `list` can print
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Hotels,
    Rooms,
    Residences,
    Dwellings,
    Restaurants,
    MenuItems,
    Lounges,
    Amenities,
    Bookings,
    Verifications,
}

// ============================================================================
// Runner
// ============================================================================

impl Cli {
    /// Client configuration: environment first, then the flags
    pub fn config(&self) -> anyhow::Result<ClientConfig> {
        let mut config = ClientConfig::from_env().context("Invalid client configuration")?;
        if let Some(url) = &self.api_url {
            config = config.with_api_url(url).context("Invalid --api-url")?;
        }
        if let Some(path) = &self.storage {
            config = config.with_storage_path(path);
        }
        Ok(config)
    }
}

/// Run a parsed command line
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = ClientContext::from_config(cli.config()?)?;

    match cli.command {
        Command::Login {
            email,
            password,
            remember,
        } => login(&ctx, email, password, remember).await,
        Command::Logout => {
            ctx.session.logout().await?;
            println!("Signed out");
            Ok(())
        }
        Command::Whoami => whoami(&ctx).await,
        Command::List { resource, page } => list(&ctx, resource, page).await,
        Command::Bookings { action } => bookings(&ctx, action).await,
        Command::Verification {
            action: VerificationCommand::Qr { id, output },
        } => verification_qr(&ctx, id, &output).await,
    }
}

async fn login(ctx: &ClientContext, email: String, password: String, remember: bool) -> anyhow::Result<()> {
    let mut credentials = Credentials::new(email, password);
    credentials.remember = remember;
    credentials
        .check()
        .to_result()
        .context("Invalid credentials")?;

    let user = ctx.session.login(&credentials).await?;
    println!("{} Signed in as {}", "✓".green(), output::user_card(&user));
    Ok(())
}

async fn whoami(ctx: &ClientContext) -> anyhow::Result<()> {
    match ctx.session.restore().await? {
        Some(user) => println!("{}", output::user_card(&user)),
        None => println!("Not signed in"),
    }
    Ok(())
}

/// Token restored before any authenticated call
async fn require_session(ctx: &ClientContext) -> anyhow::Result<()> {
    if ctx.session.restore().await?.is_none() {
        bail!("Not signed in, run `sejour-cli login` first");
    }
    Ok(())
}

async fn list(ctx: &ClientContext, resource: ResourceKind, page: u32) -> anyhow::Result<()> {
    require_session(ctx).await?;
    let query = ListQuery::new().page(page.max(1));
    match resource {
        ResourceKind::Hotels => print_page::<Hotel>(ctx, &query).await,
        ResourceKind::Rooms => print_page::<Room>(ctx, &query).await,
        ResourceKind::Residences => print_page::<Residence>(ctx, &query).await,
        ResourceKind::Dwellings => print_page::<Dwelling>(ctx, &query).await,
        ResourceKind::Restaurants => print_page::<Restaurant>(ctx, &query).await,
        ResourceKind::MenuItems => print_page::<MenuItem>(ctx, &query).await,
        ResourceKind::Lounges => print_page::<Lounge>(ctx, &query).await,
        ResourceKind::Amenities => print_page::<Amenity>(ctx, &query).await,
        ResourceKind::Bookings => print_page::<Booking>(ctx, &query).await,
        ResourceKind::Verifications => print_page::<OwnerVerification>(ctx, &query).await,
    }
}

async fn print_page<R>(ctx: &ClientContext, query: &ListQuery) -> anyhow::Result<()>
where
    R: Resource + DeserializeOwned + ListLine,
{
    let page = ctx
        .api()
        .list::<R>(query)
        .await
        .with_context(|| format!("Could not list {}", R::COLLECTION))?;
    for line in output::render_rows(&page.data) {
        println!("{}", line);
    }
    let footer = output::page_footer(page.data.len(), page.meta.as_ref());
    println!("{}", footer.as_str().dimmed());
    Ok(())
}

async fn bookings(ctx: &ClientContext, action: BookingsCommand) -> anyhow::Result<()> {
    require_session(ctx).await?;
    match action {
        BookingsCommand::Confirm { id } => booking_action(ctx, id, BookingAction::Confirm).await,
        BookingsCommand::Cancel { id, yes } => {
            if !yes && !confirm(&format!("Cancel {}?", output::record_ref("booking", id)))? {
                println!("Nothing changed");
                return Ok(());
            }
            booking_action(ctx, id, BookingAction::Cancel).await
        }
        BookingsCommand::Receipt { id, output } => {
            let pdf = ctx.api().booking_receipt(id).await?;
            write_output(&output, &pdf)?;
            println!("{} Receipt saved to {}", "✓".green(), output.display());
            Ok(())
        }
    }
}

async fn booking_action(ctx: &ClientContext, id: EntityId, action: BookingAction) -> anyhow::Result<()> {
    let booking = ctx.api().booking_action(id, action).await?;
    println!(
        "{} {} is now {}",
        "✓".green(),
        output::record_ref("Booking", booking.id),
        output::booking_status(booking.status)
    );
    Ok(())
}

async fn verification_qr(ctx: &ClientContext, id: EntityId, output: &Path) -> anyhow::Result<()> {
    require_session(ctx).await?;
    let token = ctx.api().verification_token(id).await?;
    let svg = verification_qr_svg(&token)?;
    write_output(output, svg.as_bytes())?;
    println!("{} QR code saved to {}", "✓".green(), output.display());
    Ok(())
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("Could not write {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "File saved");
    Ok(())
}

/// Ask a yes/no question on the terminal; anything but `y` means no
fn confirm(question: &str) -> anyhow::Result<bool> {
    print!("{} [y/N] ", question);
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

// ============================================================================
// Tests
// ============================================================================
