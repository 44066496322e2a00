//! Submit → pending → reply cycle
//!
//! [`Conversation`] owns the transcript, the draft being typed, and the
//! pending state. A valid submission appends the user's message right away and
//! starts a delay task; when the delay ends the task resolves the query and
//! sends a [`Reply`] back over a channel. The UI loop hands that reply to
//! [`Conversation::deliver`], which appends it and returns to idle.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::draft::Draft;
use crate::quick_actions::quick_actions;
use crate::resolver::Resolver;
use crate::state::Message;
use crate::transcript::Transcript;

/// A computed bot reply, tagged with the submission it answers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    ticket: u64,
    content: String,
}

impl Reply {
    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Outcome of a submission attempt. Rejections are silent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Accepted,
    /// Blank or whitespace-only text
    Empty,
    /// A reply is still pending
    Busy,
}

enum Phase {
    Idle,
    Pending { ticket: u64, task: JoinHandle<()> },
}

pub struct Conversation {
    transcript: Transcript,
    draft: Draft,
    phase: Phase,
    next_ticket: u64,
    resolver: Arc<Resolver>,
    reply_delay: Duration,
    replies: mpsc::UnboundedSender<Reply>,
}

impl Conversation {
    pub fn new(config: &Config, replies: mpsc::UnboundedSender<Reply>) -> Self {
        Self {
            transcript: Transcript::with_greeting(),
            draft: Draft::new(),
            phase: Phase::Idle,
            next_ticket: 1,
            resolver: Arc::new(Resolver::campus()),
            reply_delay: config.reply_delay(),
            replies,
        }
    }

    pub fn with_resolver(mut self, resolver: Resolver) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    pub fn current_transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.phase, Phase::Pending { .. })
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    /// Whether the send control should be enabled
    pub fn can_send(&self) -> bool {
        !self.draft.is_blank() && !self.is_pending()
    }

    /// Must be called from within a tokio runtime.
    pub fn submit(&mut self, text: &str) -> Submission {
        if text.trim().is_empty() {
            tracing::debug!("ignoring blank submission");
            return Submission::Empty;
        }
        if self.is_pending() {
            tracing::debug!("ignoring submission while a reply is pending");
            return Submission::Busy;
        }

        self.transcript.append(Message::user(text));

        let ticket = self.next_ticket;
        self.next_ticket += 1;

        let query = text.to_string();
        let resolver = Arc::clone(&self.resolver);
        let delay = self.reply_delay;
        let tx = self.replies.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let topic = resolver.classify(&query);
            let content = resolver.resolve(&query).to_string();
            tracing::debug!(ticket, topic = topic.as_str(), "reply ready");
            // Receiver gone means the UI is shutting down
            let _ = tx.send(Reply { ticket, content });
        });

        tracing::info!(ticket, "submission accepted");
        self.phase = Phase::Pending { ticket, task };
        Submission::Accepted
    }

    /// Submit the draft, clearing it only if the submission is accepted
    pub fn submit_draft(&mut self) -> Submission {
        let text = self.draft.as_str().to_string();
        let outcome = self.submit(&text);
        if outcome == Submission::Accepted {
            self.draft.clear();
        }
        outcome
    }

    /// Same as submitting the action's query by hand. `None` for an unknown index.
    pub fn trigger_quick_action(&mut self, index: usize) -> Option<Submission> {
        let action = quick_actions().get(index)?;
        tracing::debug!(label = action.label, "quick action");
        Some(self.submit(action.query))
    }

    /// Apply a finished reply. Returns false if it doesn't answer the pending submission.
    pub fn deliver(&mut self, reply: Reply) -> bool {
        let expected = match &self.phase {
            Phase::Pending { ticket, .. } => Some(*ticket),
            Phase::Idle => None,
        };
        if expected != Some(reply.ticket) {
            tracing::warn!(ticket = reply.ticket, "dropping stale reply");
            return false;
        }

        self.transcript.append(Message::bot(reply.content));
        self.phase = Phase::Idle;
        true
    }

    /// Abort any in-flight delay task. Returns true if one was running.
    pub fn shutdown(&mut self) -> bool {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Pending { ticket, task } => {
                task.abort();
                tracing::debug!(ticket, "aborted pending reply");
                true
            }
            Phase::Idle => false,
        }
    }
}

impl Drop for Conversation {
    fn drop(&mut self) {
        self.shutdown();
    }
}
