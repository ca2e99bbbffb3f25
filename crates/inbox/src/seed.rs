//! Seed data for the thread registry and initial ledgers
//!
//! Supports loading the seed from (in order of priority):
//! 1. An explicit JSON file
//! 2. `inbox-seed.json` in the Relay config directory
//! 3. The built-in demo conversations

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::models::{
    Channel, Classification, Contact, Message, MessageId, Thread, ThreadId, Urgency,
};

/// Seed filename in the Relay config directory
const SEED_FILE: &str = "inbox-seed.json";

/// Initial contents of an inbox store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboxSeed {
    pub threads: Vec<Thread>,
    /// Initial ledger per thread
    #[serde(default)]
    pub messages: HashMap<ThreadId, Vec<Message>>,
    /// Initial selection; defaults to the first thread
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_thread_id: Option<ThreadId>,
}

impl InboxSeed {
    pub fn new(threads: Vec<Thread>, messages: HashMap<ThreadId, Vec<Message>>) -> Self {
        Self {
            threads,
            messages,
            active_thread_id: None,
        }
    }

    /// Load the seed from the config directory, or fall back to the built-in one
    pub fn load() -> Result<Self> {
        if config::config_exists(SEED_FILE) {
            let seed: Self = config::load_json(SEED_FILE)?;
            info!("Loaded inbox seed from config ({} threads)", seed.threads.len());
            return Ok(seed);
        }

        Ok(Self::builtin())
    }

    /// Load a seed from a specific JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        config::load_json_file(path)
    }

    /// Parse a seed from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse inbox seed JSON")
    }

    /// Write this seed to the config directory so `load` picks it up
    pub fn save(&self) -> Result<()> {
        config::save_json(SEED_FILE, self)
    }

    /// Get the default seed file path (~/.config/relay/inbox-seed.json)
    pub fn default_seed_path() -> Option<PathBuf> {
        config::config_path(SEED_FILE)
    }

    /// The demo conversations the inbox ships with
    pub fn builtin() -> Self {
        let threads = vec![
            Thread::new(
                ThreadId::new("1"),
                Contact::new(
                    "Killan James",
                    "https://api.dicebear.com/7.x/avataaars/svg?seed=Felix",
                    "Client",
                ),
                Channel::Email,
                Some("Project Scope Update".to_string()),
                "Hi, are we still on track for the web design updates? Would love to see..."
                    .to_string(),
                "10:12 AM".to_string(),
                Classification::Sales,
                Urgency::High,
                true,
                "Hi Killan, yes we are on track! I've attached the latest design previews below. \
                 Let me know if you have any feedback before we proceed to the next phase."
                    .to_string(),
            ),
            Thread::new(
                ThreadId::new("2"),
                Contact::new(
                    "Design Team",
                    "https://api.dicebear.com/7.x/avataaars/svg?seed=Team",
                    "Internal",
                ),
                Channel::WhatsApp,
                None,
                "Do you need that design asset by EOD?".to_string(),
                "Yesterday".to_string(),
                Classification::Support,
                Urgency::Medium,
                false,
                "Yes, please send it over by 5 PM. Thanks!".to_string(),
            ),
            Thread::new(
                ThreadId::new("3"),
                Contact::new(
                    "Ahmed Medi",
                    "https://api.dicebear.com/7.x/avataaars/svg?seed=Ahmed",
                    "Vendor",
                ),
                Channel::Email,
                Some("Invoice #4022".to_string()),
                "Just following up on the invoice sent last week.".to_string(),
                "2 days ago".to_string(),
                Classification::Urgent,
                Urgency::High,
                true,
                "Hi Ahmed, apologies for the delay. I've processed the payment today, \
                 you should receive it within 24 hours."
                    .to_string(),
            ),
        ];

        let incoming = |id: &str, sender: &str, text: &str, timestamp: &str| {
            Message::builder(MessageId::new(id))
                .sender(sender)
                .text(text)
                .timestamp(timestamp)
                .build()
        };

        let mut messages = HashMap::new();
        messages.insert(
            ThreadId::new("1"),
            vec![
                incoming(
                    "m1",
                    "1",
                    "Hi, are we still on track for the web design updates?",
                    "10:00 AM",
                ),
                incoming("m2", "1", "Would love to see the progress.", "10:05 AM"),
            ],
        );
        messages.insert(
            ThreadId::new("2"),
            vec![incoming(
                "m3",
                "2",
                "Do you need that design asset by EOD?",
                "Yesterday",
            )],
        );
        messages.insert(
            ThreadId::new("3"),
            vec![incoming(
                "m4",
                "3",
                "Just following up on the invoice sent last week.",
                "2 days ago",
            )],
        );

        Self::new(threads, messages)
    }
}
