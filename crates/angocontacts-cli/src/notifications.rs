//! Notification command handlers and the outdated-search check.

use angocontacts_core::{AppConfig, Notification};
use angocontacts_store::{CollectionStore, KeyValueStore};
use chrono::{Duration, Utc};
use clap::Subcommand;

/// Sub-commands available under `notifications`.
#[derive(Debug, Subcommand)]
pub enum NotificationsCommands {
    /// List notifications, newest first
    List {
        /// Only show unread notifications
        #[arg(long)]
        unread: bool,
    },
    /// Mark one notification as read
    Read { id: String },
    /// Mark every notification as read
    ReadAll,
    /// Delete a notification
    Remove { id: String },
    /// Warn about saved searches that have not been refreshed recently
    Check,
}

pub(crate) fn run_notifications<S: KeyValueStore>(
    config: &AppConfig,
    store: &mut CollectionStore<S>,
    command: NotificationsCommands,
) -> anyhow::Result<()> {
    match command {
        NotificationsCommands::List { unread } => {
            let notifications = store.notifications();
            let shown: Vec<&Notification> =
                notifications.iter().filter(|n| !unread || !n.read).collect();
            print_notifications(&shown);
            println!("{} unread", store.unread_count());
        }
        NotificationsCommands::Read { id } => {
            if !store.mark_notification_read(&id) {
                anyhow::bail!("no notification with id '{id}'");
            }
        }
        NotificationsCommands::ReadAll => {
            store.mark_all_notifications_read();
            println!("all notifications marked as read");
        }
        NotificationsCommands::Remove { id } => {
            if !store.remove_notification(&id) {
                anyhow::bail!("no notification with id '{id}'");
            }
            println!("removed {id}");
        }
        NotificationsCommands::Check => {
            let created = flag_outdated_searches(config, store);
            println!("{created} outdated saved searches flagged");
        }
    }
    Ok(())
}

/// Adds a warning for every saved search older than
/// `config.outdated_search_days`. Returns the number of warnings created.
pub(crate) fn flag_outdated_searches<S: KeyValueStore>(
    config: &AppConfig,
    store: &mut CollectionStore<S>,
) -> usize {
    let max_age = Duration::days(i64::from(config.outdated_search_days));
    let created = store.flag_outdated_searches(Utc::now(), max_age);
    if created > 0 {
        tracing::info!(created, "flagged outdated saved searches");
    }
    created
}

fn print_notifications(notifications: &[&Notification]) {
    if notifications.is_empty() {
        println!("no notifications");
        return;
    }

    println!("{:<38}{:<18}{:<9}{:<6}TITLE", "ID", "WHEN", "TYPE", "READ");
    for n in notifications {
        println!(
            "{:<38}{:<18}{:<9}{:<6}{}",
            n.id,
            n.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            n.kind.to_string(),
            if n.read { "yes" } else { "no" },
            n.title
        );
        println!("    {}", n.message);
    }
}
