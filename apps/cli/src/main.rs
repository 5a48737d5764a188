use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use client_core::{
    AddOutcome, GuestDirectory, HttpGuestStore, InitializeOutcome, RemoveOutcome, ToggleOutcome,
    UpdateStrategy,
};
use shared::domain::GuestId;
use tracing::info;

mod config;

use config::load_settings;

#[derive(Parser, Debug)]
#[command(name = "guestlist", about = "Manage a guest list backed by a remote guest store")]
struct Args {
    /// Overrides the configured guest store base URL.
    #[arg(long)]
    store_url: Option<String>,
    /// Refetch the record and send a full-field update instead of a
    /// partial attendance payload.
    #[arg(long)]
    refetch_merge: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the current guest list.
    List,
    /// Add a guest; new guests start as not attending.
    Add {
        first_name: String,
        last_name: String,
    },
    /// Set a guest's attending flag.
    Toggle { id: String, attending: bool },
    /// Remove a guest.
    Remove { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(url) = args.store_url {
        settings.store_url = url;
    }
    info!(store_url = %settings.store_url, "using guest store");

    let store = Arc::new(HttpGuestStore::new(&settings.store_url)?);
    let strategy = if args.refetch_merge {
        UpdateStrategy::RefetchMerge
    } else {
        UpdateStrategy::AttendingOnly
    };
    let mut directory = GuestDirectory::with_update_strategy(store, strategy);

    if let InitializeOutcome::StoreFailed(error) = directory.initialize().await {
        bail!("could not load the guest list: {error}");
    }

    match args.command {
        Command::List => {}
        Command::Add {
            first_name,
            last_name,
        } => {
            // Mirror the form flow: compose the draft, then submit it.
            directory.set_draft_first_name(first_name);
            directory.set_draft_last_name(last_name);
            match directory.submit_draft().await {
                AddOutcome::Added(guest) => {
                    println!(
                        "Added {} {} (id {}); draft cleared",
                        guest.first_name, guest.last_name, guest.id
                    );
                }
                AddOutcome::RejectedEmptyName => bail!("both first and last name are required"),
                AddOutcome::StoreFailed(error) => bail!("guest not added: {error}"),
            }
        }
        Command::Toggle { ref id, attending } => {
            match directory
                .toggle_attendance(&GuestId::new(id.clone()), attending)
                .await
            {
                ToggleOutcome::Confirmed(guest) => {
                    println!(
                        "{} {} is now {}",
                        guest.first_name,
                        guest.last_name,
                        attendance_label(guest.attending)
                    );
                }
                ToggleOutcome::UnknownId => bail!("no guest with id {id}"),
                ToggleOutcome::StoreFailed(error) => bail!("attendance not updated: {error}"),
            }
        }
        Command::Remove { ref id } => {
            match directory.remove_guest(&GuestId::new(id.clone())).await {
                RemoveOutcome::Removed(guest) => {
                    println!("Removed {} {}", guest.first_name, guest.last_name);
                }
                RemoveOutcome::UnknownId => bail!("no guest with id {id}"),
                RemoveOutcome::StoreFailed(error) => bail!("guest not removed: {error}"),
            }
        }
    }

    print_directory(&directory);
    Ok(())
}

fn attendance_label(attending: bool) -> &'static str {
    if attending {
        "attending"
    } else {
        "not attending"
    }
}

fn print_directory(directory: &GuestDirectory) {
    if !directory.is_ready() {
        println!("Loading...");
        return;
    }
    if directory.guests().is_empty() {
        println!("The guest list is currently empty");
        return;
    }
    for guest in directory.guests() {
        println!(
            "{}  {} {}  [{}]",
            guest.id,
            guest.first_name,
            guest.last_name,
            attendance_label(guest.attending)
        );
    }
}
