use crate::state::Message;

pub const GREETING: &str = "Hello! I'm your campus AI assistant. I can help you with schedules, facilities, dining, library services, and administrative procedures. What would you like to know?";

/// Append-only, insertion-ordered list of messages
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
    revision: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transcript seeded with the assistant's opening message
    pub fn with_greeting() -> Self {
        let mut transcript = Self::new();
        transcript.append(Message::bot(GREETING));
        transcript
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
        self.revision += 1;
    }

    pub fn all(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Bumped on every append; views compare it to decide when to follow the tail
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Sender;

    #[test]
    fn test_greeting_is_first() {
        let transcript = Transcript::with_greeting();
        assert_eq!(transcript.len(), 1);
        let first = &transcript.all()[0];
        assert_eq!(first.sender(), Sender::Bot);
        assert_eq!(first.content(), GREETING);
    }

    #[test]
    fn test_append_keeps_insertion_order() {
        let mut transcript = Transcript::with_greeting();
        let inputs = [
            (Sender::User, "one"),
            (Sender::Bot, "two"),
            (Sender::User, "one"),
            (Sender::User, "three\nlines\nhere"),
        ];
        for (sender, text) in inputs {
            transcript.append(Message::new(sender, text));
        }

        assert_eq!(transcript.len(), inputs.len() + 1);
        for (msg, (sender, text)) in transcript.all()[1..].iter().zip(inputs) {
            assert_eq!(msg.sender(), sender);
            assert_eq!(msg.content(), text);
        }
        assert_eq!(transcript.last().map(|m| m.content()), Some("three\nlines\nhere"));
    }

    #[test]
    fn test_revision_tracks_appends() {
        let mut transcript = Transcript::new();
        assert!(transcript.is_empty());
        assert_eq!(transcript.revision(), 0);
        transcript.append(Message::user("a"));
        transcript.append(Message::user("a"));
        assert_eq!(transcript.revision(), 2);
    }
}
