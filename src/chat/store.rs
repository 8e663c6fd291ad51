//! Multi-conversation store: the single owner of conversation state.
//!
//! Every mutation re-persists the full conversation list through the
//! configured [`StorageBackend`]. Persistence failures are reported and
//! swallowed; the in-memory state stays authoritative and no operation here
//! is fatal.

use colored::Colorize;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::{Conversation, Message, Role};
use crate::storage::{StorageBackend, CONVERSATIONS_KEY};

/// Placeholder title. While a conversation still carries it, the title is
/// auto-derived from the first user message on append.
pub const SENTINEL_TITLE: &str = "New Chat";

/// Greeting that opens every new conversation.
pub const WELCOME_TEXT: &str =
    "Hello! I am EduGen AI. How can I assist you with your academic tasks today?";

/// Auto-derived titles keep this many characters of the first user message.
const TITLE_PREVIEW_CHARS: usize = 30;

/// Current on-disk snapshot format version.
const SNAPSHOT_VERSION: u32 = 1;

/// Versioned on-disk form of the conversation list.
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    conversations: Vec<Conversation>,
}

/// Owns the conversation list and the current-selection pointer.
///
/// Invariants: the list is never empty, and the current id always refers to
/// an existing conversation. The selection pointer itself is session state
/// and is not persisted.
pub struct ChatStore {
    conversations: Vec<Conversation>,
    current_id: String,
    storage: Box<dyn StorageBackend>,
}

impl ChatStore {
    /// Load persisted conversations, seeding a single default conversation
    /// when nothing usable is stored. The first conversation in the loaded
    /// list becomes current.
    pub fn load(storage: Box<dyn StorageBackend>) -> Self {
        let conversations = match storage.get(CONVERSATIONS_KEY) {
            Ok(Some(raw)) => decode_snapshot(&raw),
            Ok(None) => Vec::new(),
            Err(e) => {
                eprintln!("{} Failed to load conversations: {}", "⚠️".yellow(), e);
                Vec::new()
            }
        };

        let mut store = Self {
            conversations,
            current_id: String::new(),
            storage,
        };

        if store.conversations.is_empty() {
            let conv = new_conversation(now_ms());
            store.current_id = conv.id.clone();
            store.conversations.push(conv);
            store.persist();
        } else {
            store.current_id = store.conversations[0].id.clone();
        }

        store
    }

    /// All conversations, head-first (newest created at the head).
    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    /// Id of the current conversation.
    pub fn current_id(&self) -> &str {
        &self.current_id
    }

    /// The current conversation, if the pointer is valid.
    pub fn current(&self) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == self.current_id)
    }

    /// Message sequence of the current conversation. Falls back to a single
    /// welcome message if the selection pointer dangles.
    pub fn messages(&self) -> Vec<Message> {
        self.current()
            .map(|c| c.messages.clone())
            .unwrap_or_else(|| vec![Message::assistant(WELCOME_TEXT)])
    }

    /// Append a message to the current conversation, refreshing its
    /// `updated_at` and auto-deriving the title while it is still the
    /// sentinel. Other conversations are untouched.
    pub fn add_message(&mut self, message: Message) {
        let now = now_ms();
        if let Some(conv) = self
            .conversations
            .iter_mut()
            .find(|c| c.id == self.current_id)
        {
            conv.messages.push(message);
            conv.updated_at = now;
            if conv.title == SENTINEL_TITLE {
                conv.title = derive_title(&conv.messages);
            }
            self.persist();
        }
    }

    /// Create a fresh conversation at the head of the list and select it.
    pub fn create_conversation(&mut self) -> &Conversation {
        let conv = new_conversation(now_ms());
        self.current_id = conv.id.clone();
        self.conversations.insert(0, conv);
        self.persist();
        &self.conversations[0]
    }

    /// Select `id` as the current conversation. Returns `false` and leaves
    /// the selection unchanged when no conversation has that id.
    pub fn switch_conversation(&mut self, id: &str) -> bool {
        if self.conversations.iter().any(|c| c.id == id) {
            self.current_id = id.to_string();
            true
        } else {
            false
        }
    }

    /// Remove a conversation. Deleting the last one atomically creates a
    /// fresh replacement; deleting the current one selects the new head.
    pub fn delete_conversation(&mut self, id: &str) {
        self.conversations.retain(|c| c.id != id);

        if self.conversations.is_empty() {
            let conv = new_conversation(now_ms());
            self.current_id = conv.id.clone();
            self.conversations.push(conv);
        } else if self.current_id == id {
            self.current_id = self.conversations[0].id.clone();
        }

        self.persist();
    }

    /// Set a conversation's title verbatim to the trimmed value. An empty
    /// title after trimming is a no-op. A renamed conversation is no longer
    /// eligible for title auto-derivation since it left the sentinel.
    pub fn rename_conversation(&mut self, id: &str, title: &str) {
        let title = title.trim();
        if title.is_empty() {
            return;
        }
        if let Some(conv) = self.conversations.iter_mut().find(|c| c.id == id) {
            conv.title = title.to_string();
            conv.updated_at = now_ms();
            self.persist();
        }
    }

    fn persist(&self) {
        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            conversations: self.conversations.clone(),
        };
        let json = match serde_json::to_string(&snapshot) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("{} Failed to serialize conversations: {}", "⚠️".yellow(), e);
                return;
            }
        };
        if let Err(e) = self.storage.set(CONVERSATIONS_KEY, &json) {
            eprintln!("{} Failed to save conversations: {}", "⚠️".yellow(), e);
        }
    }
}

/// Decode a persisted snapshot, ignoring malformed entries individually.
/// Legacy payloads (a bare array of conversations) are still accepted.
fn decode_snapshot(raw: &str) -> Vec<Conversation> {
    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("{} Stored conversations are corrupt: {}", "⚠️".yellow(), e);
            return Vec::new();
        }
    };

    let entries = match value {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(mut obj) => {
            let version = obj.get("version").and_then(serde_json::Value::as_u64);
            if version != Some(u64::from(SNAPSHOT_VERSION)) {
                eprintln!(
                    "{} Unsupported conversation snapshot version: {:?}",
                    "⚠️".yellow(),
                    version
                );
                return Vec::new();
            }
            match obj.remove("conversations") {
                Some(serde_json::Value::Array(items)) => items,
                _ => return Vec::new(),
            }
        }
        _ => return Vec::new(),
    };

    entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<Conversation>(entry).ok())
        .collect()
}

fn new_conversation(now: i64) -> Conversation {
    Conversation {
        id: generate_id(now),
        title: SENTINEL_TITLE.to_string(),
        messages: vec![Message::assistant(WELCOME_TEXT)],
        created_at: now,
        updated_at: now,
    }
}

/// Process-unique conversation id: creation time plus random entropy.
fn generate_id(now: i64) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(char::from)
        .collect();
    format!("conv_{}_{}", now, suffix.to_lowercase())
}

/// Title preview from the first user message, or the sentinel if there is
/// none yet. Truncation counts characters, not bytes.
fn derive_title(messages: &[Message]) -> String {
    let Some(first_user) = messages.iter().find(|m| m.role == Role::User) else {
        return SENTINEL_TITLE.to_string();
    };
    let total = first_user.content.chars().count();
    let preview: String = first_user.content.chars().take(TITLE_PREVIEW_CHARS).collect();
    if total > TITLE_PREVIEW_CHARS {
        format!("{}...", preview)
    } else {
        preview
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
