//! # Chat Session
//!
//! Drives a conversation against `/chat`. Failures never surface to the
//! caller; they are recorded as the fallback reply.

use crate::client::LabTrackClient;
use chrono::NaiveDateTime;
use labtrack_core::chat::{FALLBACK_REPLY, normalize_message};
use labtrack_core::{ChatMessage, ExportFile, LabTrackError, Transcript, transcript_to_text};

pub struct ChatSession {
    client: LabTrackClient,
    transcript: Transcript,
}

impl ChatSession {
    pub fn new(client: LabTrackClient) -> Self {
        Self {
            client,
            transcript: Transcript::new(),
        }
    }

    /// Send a message and record the reply.
    ///
    /// Blank input is ignored and returns `Ok(None)`. Otherwise returns the
    /// assistant's message, which is the fallback reply if the request failed.
    pub async fn send(&mut self, input: &str) -> Result<Option<&ChatMessage>, LabTrackError> {
        let Some(message) = normalize_message(input)? else {
            return Ok(None);
        };

        self.transcript.push_user(message.as_str());
        match self.client.chat(&message).await {
            Ok(reply) => self.transcript.push_assistant(&reply),
            Err(e) => {
                tracing::warn!("Chat request failed: {}", e);
                self.transcript.push_assistant(FALLBACK_REPLY);
            }
        }
        Ok(self.transcript.messages().last())
    }

    /// Start over with an empty transcript.
    pub fn new_chat(&mut self) {
        self.transcript.clear();
    }

    /// Clear the transcript.
    pub fn clear(&mut self) {
        self.transcript.clear();
    }

    #[must_use]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Export the transcript as text.
    pub fn export(&self, generated_at: NaiveDateTime) -> Result<ExportFile, LabTrackError> {
        transcript_to_text(&self.transcript, generated_at)
    }
}
