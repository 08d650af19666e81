//! # Chat Transcript
//!
//! In-memory conversation model. The network half lives in the app; this
//! module only owns message normalization and the transcript itself.

use crate::LabTrackError;
use crate::primitives::MAX_CHAT_MESSAGE_LENGTH;
use serde::{Deserialize, Serialize};

/// Shown when a chat request fails for any reason.
pub const FALLBACK_REPLY: &str = "Sorry, there was an error processing your request.";

/// Greeting printed at the top of a new session. Not part of the transcript.
pub const WELCOME_MESSAGE: &str =
    "Hello! Ask me anything about laboratory procedures, documents or temperature records.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

impl Speaker {
    /// Prefix used in exported transcripts.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Speaker::User => "User",
            Speaker::Assistant => "Assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub speaker: Speaker,
    pub text: String,
}

/// Ordered list of exchanged messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage {
            speaker: Speaker::User,
            text: text.into(),
        });
    }

    /// Record a reply. Markup is stripped before it is stored.
    pub fn push_assistant(&mut self, text: &str) {
        self.messages.push(ChatMessage {
            speaker: Speaker::Assistant,
            text: strip_markup(text),
        });
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}

/// Trim an outgoing message.
///
/// Blank input yields `Ok(None)` and must not be sent.
pub fn normalize_message(input: &str) -> Result<Option<String>, LabTrackError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > MAX_CHAT_MESSAGE_LENGTH {
        return Err(LabTrackError::FieldTooLong {
            field: "message",
            max: MAX_CHAT_MESSAGE_LENGTH,
        });
    }
    Ok(Some(trimmed.to_string()))
}

/// Remove HTML tags and decode the common entities.
///
/// `<br>` and block closers become line breaks.
#[must_use]
pub fn strip_markup(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let after = &rest[open..];
        match after.find('>') {
            Some(close) => {
                let tag = after[1..close].trim().to_ascii_lowercase();
                if is_line_break(&tag) {
                    out.push('\n');
                }
                rest = &after[close + 1..];
            }
            None => {
                // Unterminated '<' is literal text.
                out.push_str(after);
                rest = "";
            }
        }
    }
    out.push_str(rest);

    decode_entities(&out).trim().to_string()
}

fn is_line_break(tag: &str) -> bool {
    let name = tag.trim_end_matches('/').trim();
    matches!(name, "br" | "/p" | "/div" | "/li")
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
