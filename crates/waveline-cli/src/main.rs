//! waveline — command-line front-end for the messaging-automation backend.
//!
//! Each subcommand constructs the stores, performs one operation against the
//! backend, prints the result inline, and exits. All cross-invocation state
//! lives in the persisted credential store; the CLI itself holds no state
//! machine beyond transient input.
//!
//! # Usage
//!
//! ```bash
//! waveline signup "Ada Lovelace" ada@example.com hunter2
//! waveline setup-2fa totp
//! waveline verify-2fa 123456
//! waveline connect-phone +15550100
//! waveline send c1 "hello there" --count 3
//! waveline schedule c1 "good morning" 2026-09-01 08:30
//! ```

use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use waveline_api::{ApiClient, ApiConfig};
use waveline_shared::TwoFactorMethod;
use waveline_store::{CredentialStore, PairingStore, SessionPhase, SessionStore};

#[derive(Parser)]
#[command(name = "waveline")]
#[command(about = "Send and schedule WhatsApp messages through a waveline backend")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account (two-factor setup follows)
    Signup {
        name: String,
        email: String,
        password: String,
    },

    /// Log in with email and password
    Login { email: String, password: String },

    /// Confirm a two-factor code
    #[command(name = "verify-2fa")]
    Verify2fa {
        code: String,
        /// Delivery method: totp or email
        #[arg(long)]
        method: Option<TwoFactorMethod>,
    },

    /// Request two-factor provisioning
    #[command(name = "setup-2fa")]
    Setup2fa {
        /// Delivery method: totp or email
        method: TwoFactorMethod,
    },

    /// Log out and clear stored credentials
    Logout,

    /// Show session and pairing status
    Status,

    /// Pair via QR code (prints the code, verifies after it is scanned)
    ConnectQr {
        /// Verify immediately instead of waiting for Enter
        #[arg(long)]
        no_wait: bool,
    },

    /// Pair via phone number
    ConnectPhone { phone_number: String },

    /// Tear down the WhatsApp pairing
    Disconnect,

    /// List contacts
    Contacts,

    /// Send a message now
    Send {
        contact: String,
        message: String,
        /// Number of repeats
        #[arg(long, default_value_t = 1)]
        count: u32,
    },

    /// Schedule a message for a future date and time
    Schedule {
        contact: String,
        message: String,
        /// Calendar date, YYYY-MM-DD
        date: NaiveDate,
        /// Wall-clock time, HH:MM (local timezone)
        time: String,
        /// Number of repeats
        #[arg(long, default_value_t = 1)]
        count: u32,
    },

    /// List sent messages
    Messages,

    /// List scheduled messages
    Scheduled,

    /// Cancel a scheduled message
    Cancel { id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let api = Arc::new(ApiClient::new(ApiConfig::from_env()));
    let credentials = CredentialStore::open_default().context("opening credential store")?;
    let mut session = SessionStore::new(api.clone(), credentials);
    let mut pairing = PairingStore::new(api.clone());

    match cli.command {
        Commands::Signup {
            name,
            email,
            password,
        } => {
            session.signup(&name, &email, &password).await?;
            println!("Signed up as {email}.");
            println!("Two-factor setup is required: run `waveline setup-2fa totp` or `waveline setup-2fa email`.");
        }

        Commands::Login { email, password } => {
            session.login(&email, &password).await?;
            if session.phase() == SessionPhase::AwaitingTwoFactor {
                println!("Logged in. Enter your code with `waveline verify-2fa <code>`.");
            } else {
                println!("Logged in as {email}.");
            }
        }

        Commands::Verify2fa { code, method } => {
            session.verify_two_factor(&code, method).await?;
            println!("Two-factor verification complete.");
        }

        Commands::Setup2fa { method } => {
            let setup = session.setup_two_factor(method).await?;
            if let Some(qr) = setup.qr_code {
                println!("Scan this provisioning code with your authenticator app:");
                println!("{qr}");
            }
            println!("{}", setup.message);
            println!("Confirm with `waveline verify-2fa <code>`.");
        }

        Commands::Logout => match session.logout().await {
            Ok(()) => println!("Logged out."),
            Err(e) => println!("Logged out locally; backend logout failed: {e}"),
        },

        Commands::Status => {
            match session.session() {
                Some(s) => println!(
                    "Session: {} <{}> ({:?})",
                    s.user.name,
                    s.user.email,
                    session.phase()
                ),
                None => println!("Session: anonymous"),
            }
            pairing.refresh_all().await;
            println!(
                "WhatsApp: {}",
                if pairing.is_connected() {
                    "connected"
                } else {
                    "not connected"
                }
            );
            println!(
                "Contacts: {}   Sent: {}   Scheduled: {}",
                pairing.contacts().len(),
                pairing.sent_messages().len(),
                pairing.scheduled_messages().len()
            );
        }

        Commands::ConnectQr { no_wait } => {
            let qr = pairing.connect_with_qr().await?;
            println!("Scan this code in WhatsApp (expires {}):", qr.expires_at);
            println!("{}", qr.qr_code);
            if !no_wait {
                println!("Press Enter once scanned...");
                let mut line = String::new();
                std::io::stdin().read_line(&mut line)?;
            }
            pairing.verify_qr_code().await?;
            println!("WhatsApp connected ({} contacts).", pairing.contacts().len());
        }

        Commands::ConnectPhone { phone_number } => {
            pairing.connect_with_phone(&phone_number).await?;
            println!("WhatsApp connected ({} contacts).", pairing.contacts().len());
        }

        Commands::Disconnect => {
            pairing.disconnect().await?;
            println!("WhatsApp disconnected.");
        }

        Commands::Contacts => {
            pairing.refresh_contacts().await;
            if pairing.contacts().is_empty() {
                println!("No contacts (is WhatsApp connected?).");
            }
            for c in pairing.contacts() {
                match &c.last_message_time {
                    Some(t) => println!("{}  {}  {}  (last activity {t})", c.id, c.name, c.phone_number),
                    None => println!("{}  {}  {}", c.id, c.name, c.phone_number),
                }
            }
        }

        Commands::Send {
            contact,
            message,
            count,
        } => {
            pairing.send_message(&contact, &message, count).await?;
            println!("Sent to {contact} (x{count}).");
        }

        Commands::Schedule {
            contact,
            message,
            date,
            time,
            count,
        } => {
            pairing
                .schedule_message(&contact, &message, count, date, &time)
                .await?;
            println!("Scheduled for {date} {time} (x{count}).");
        }

        Commands::Messages => {
            pairing.refresh_sent_messages().await;
            for m in pairing.sent_messages() {
                println!(
                    "{}  to {}  x{}  {}  {}",
                    m.id, m.contact, m.count, m.status, m.sent_at
                );
            }
        }

        Commands::Scheduled => {
            pairing.refresh_scheduled_messages().await;
            for m in pairing.scheduled_messages() {
                println!(
                    "{}  to {}  x{}  {}  at {}",
                    m.id, m.contact, m.count, m.status, m.scheduled_for
                );
            }
        }

        Commands::Cancel { id } => {
            pairing.cancel_scheduled_message(&id).await?;
            println!("Cancelled {id}.");
        }
    }

    Ok(())
}
