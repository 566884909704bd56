//! Bot identification types
//!
//! A bot is addressed either by the hostname of the server it runs on or by
//! an already-resolved handle carrying the server-assigned identifier.

use serde::{Deserialize, Serialize};

/// An already-resolved bot on an Xcode Server instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bot {
    /// Server-assigned bot identifier
    pub id: String,
    /// Human-readable bot name
    pub name: String,
    /// Hostname of the server the bot runs on
    pub server_name: String,
}

impl Bot {
    /// Create a new bot handle
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        server_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            server_name: server_name.into(),
        }
    }
}

/// Reference to a bot, by server name or by resolved handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotReference {
    /// Bot addressed by the hostname of its server
    ByName(String),
    /// Bot addressed by an already-resolved handle
    ByHandle(Bot),
}

impl BotReference {
    /// Hostname of the server this reference points at
    pub fn server_name(&self) -> &str {
        match self {
            BotReference::ByName(server_name) => server_name,
            BotReference::ByHandle(bot) => &bot.server_name,
        }
    }

    /// The resolved handle, if this reference carries one
    pub fn bot(&self) -> Option<&Bot> {
        match self {
            BotReference::ByName(_) => None,
            BotReference::ByHandle(bot) => Some(bot),
        }
    }
}
