//! mage-net probe
//!
//! Connects to a game server, prints the message of the day and, given a room
//! id, a snapshot of that room:
//!
//! ```text
//! mage-net <host:port> [room-uuid]
//! ```
//!
//! Logs go to stderr; set `RUST_LOG` to adjust (default `info`).

use anyhow::{Context, Result, bail};
use mage_net_client::{ClientConfig, Connection, NotificationHandler};
use mage_net_core::{ChatId, ChatMessage, MageNetError, RoomView};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use uuid::Uuid;

/// Probes never wait on a silent server forever
const RESPONSE_TIMEOUT: Duration = Duration::from_secs(10);

/// Logs whatever the server pushes while we are connected
struct LogPushes;

impl NotificationHandler for LogPushes {
    fn on_chat_message(&self, chat_id: ChatId, message: ChatMessage) {
        info!("[chat {}] {}: {}", chat_id, message.username, message.message);
    }

    fn on_inform(&self, message: String) {
        info!("Server: {}", message);
    }

    fn on_disconnected(&self, reason: &MageNetError) {
        warn!("Disconnected: {}", reason);
    }
}

fn print_room(room: &RoomView) {
    println!("Room {}", room.room_id);
    println!("  {} user(s) online", room.users.len());
    for user in &room.users {
        let status = if user.in_game { " (in game)" } else { "" };
        println!("    {}{}", user.user_name, status);
    }
    println!("  {} table(s)", room.tables.len());
    for table in &room.tables {
        println!(
            "    {} [{:?}] {} / {}, {} free seat(s)",
            table.table_name,
            table.state,
            table.game_type,
            table.deck_type,
            table.free_seats()
        );
    }
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut args = std::env::args().skip(1);
    let Some(address) = args.next() else {
        bail!("usage: mage-net <host:port> [room-uuid]");
    };
    let room_id = args
        .next()
        .map(|arg| Uuid::parse_str(&arg).with_context(|| format!("Invalid room id: {}", arg)))
        .transpose()?;

    let config = ClientConfig::from_address(&address)?.with_response_timeout(RESPONSE_TIMEOUT);
    info!("mage-net probe connecting to {}", config.address());

    let mut connection = Connection::connect_tcp(config, Arc::new(LogPushes))
        .with_context(|| format!("Could not connect to {}", address))?;
    let client = connection.client();

    for line in client.server_messages()? {
        println!("{}", line);
    }

    if let Some(room_id) = room_id {
        let room = client.get_room(room_id)?;
        print_room(&room);
        let chat_id = client.chat_room_id(room_id)?;
        println!("  chat {}", chat_id);
    }

    connection.close();
    Ok(())
}
