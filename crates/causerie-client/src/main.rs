//! # causerie
//!
//! Command-line front end for the local Causerie messenger state.  Every
//! command prints the aggregate it returns as pretty JSON on stdout; logs go
//! to stderr.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use causerie_client::{AppState, ClientConfig};
use causerie_store::CallType;

/// Local-first messenger client.
///
/// Configuration can be set via CLI arguments or environment variables.
/// CLI arguments take precedence over environment variables.
#[derive(Parser, Debug)]
#[command(name = "causerie", version, about)]
struct Cli {
    /// Directory holding the database [env: CAUSERIE_DATA_DIR]
    #[arg(long, short = 'd', global = true)]
    data_dir: Option<PathBuf>,

    /// Simulated latency of mutating calls, in milliseconds [env: CAUSERIE_LATENCY_MS] [default: 300]
    #[arg(long, global = true)]
    latency_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the profile after phone verification
    Onboard {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long, default_value = "")]
        avatar: String,
        /// Six-digit verification code
        #[arg(long)]
        code: String,
    },
    /// Show the profile
    Profile,
    /// List contacts
    Contacts {
        /// Only contacts whose name contains this text
        #[arg(long)]
        search: Option<String>,
        /// Only archived contacts
        #[arg(long)]
        archived: bool,
        /// Sort by name
        #[arg(long)]
        by_name: bool,
    },
    /// Add a contact
    AddContact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long, default_value = "")]
        avatar: String,
    },
    Archive { contact_id: i64 },
    Unarchive { contact_id: i64 },
    Block { contact_id: i64 },
    Unblock { contact_id: i64 },
    /// Mark a contact's status update as viewed
    ViewStatus { contact_id: i64, status_id: i64 },
    /// Show the messages exchanged with a contact
    Thread { contact_id: i64 },
    /// Send a text message
    Send { contact_id: i64, text: String },
    /// Toggle your reaction on a message
    React {
        contact_id: i64,
        message_id: i64,
        emoji: String,
    },
    /// Delete every message of a chat
    Clear { contact_id: i64 },
    /// Show the call log
    Calls,
    /// Call a contact
    Call {
        contact_id: i64,
        #[arg(long)]
        video: bool,
    },
    /// Assign the server identity (a random one when omitted)
    ServerId { id: Option<String> },
    /// Print a backup, or write it into a directory
    Export {
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Restore a backup file
    Import { file: PathBuf },
    /// Dump the raw stored records
    Inspect,
    /// Erase the profile and all data
    DeleteAccount,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    causerie_client::init_tracing();

    let cli = Cli::parse();
    let config = ClientConfig::from_env().with_overrides(cli.data_dir, cli.latency_ms);
    let state = AppState::open(config).context("failed to open the local store")?;

    match cli.command {
        Command::Onboard {
            name,
            phone,
            avatar,
            code,
        } => print_json(&state.complete_onboarding(&name, &phone, &avatar, &code).await?)?,
        Command::Profile => print_json(&state.get_profile().await?)?,
        Command::Contacts {
            search,
            archived,
            by_name,
        } => {
            let mut contacts = match search {
                Some(query) => state.search_contacts(&query).await?,
                None if by_name => state.contacts_by_name().await?,
                None if archived => state.archived_contacts().await?,
                None => state.list_contacts().await?,
            };
            if archived {
                contacts.retain(|c| c.is_archived);
            }
            if by_name {
                contacts.sort_by_cached_key(|c| c.name.to_lowercase());
            }
            print_json(&contacts)?
        }
        Command::AddContact {
            name,
            phone,
            avatar,
        } => print_json(&state.add_contact(&name, &phone, &avatar).await?)?,
        Command::Archive { contact_id } => print_json(&state.set_archived(contact_id, true).await?)?,
        Command::Unarchive { contact_id } => print_json(&state.set_archived(contact_id, false).await?)?,
        Command::Block { contact_id } => print_json(&state.set_blocked(contact_id, true).await?)?,
        Command::Unblock { contact_id } => print_json(&state.set_blocked(contact_id, false).await?)?,
        Command::ViewStatus {
            contact_id,
            status_id,
        } => print_json(&state.mark_status_viewed(contact_id, status_id).await?)?,
        Command::Thread { contact_id } => print_json(&state.get_thread(contact_id).await?)?,
        Command::Send { contact_id, text } => print_json(&state.send_text(contact_id, &text).await?)?,
        Command::React {
            contact_id,
            message_id,
            emoji,
        } => print_json(&state.toggle_reaction(contact_id, message_id, &emoji).await?)?,
        Command::Clear { contact_id } => {
            state.clear_thread(contact_id).await?;
            print_json(&state.get_thread(contact_id).await?)?
        }
        Command::Calls => print_json(&state.list_calls().await?)?,
        Command::Call { contact_id, video } => {
            let kind = if video { CallType::Video } else { CallType::Audio };
            print_json(&state.start_call(contact_id, kind).await?)?
        }
        Command::ServerId { id } => {
            let id = id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
            print_json(&state.assign_server_identity(&id).await?)?
        }
        Command::Export { dir: Some(dir) } => {
            let path = state.save_backup_to_file(&dir).await?;
            println!("{}", path.display());
        }
        Command::Export { dir: None } => println!("{}", state.export_backup().await?),
        Command::Import { file } => {
            let restored = state
                .restore_backup_from_file(&file)
                .await
                .with_context(|| format!("failed to read {}", file.display()))?;
            anyhow::ensure!(restored, "{} is not a valid backup", file.display());
            info!(path = %file.display(), "backup restored");
            print_json(&state.get_profile().await?)?
        }
        Command::Inspect => print_json(&state.inspect_records().await?)?,
        Command::DeleteAccount => {
            state.delete_account().await?;
            info!("account deleted");
        }
    }

    Ok(())
}
