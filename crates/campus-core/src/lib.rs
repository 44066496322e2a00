pub mod config;
pub mod conversation;
pub mod draft;
pub mod quick_actions;
pub mod resolver;
pub mod state;
pub mod transcript;

// Re-export main types for convenience
pub use config::Config;
pub use conversation::{Conversation, Reply, Submission};
pub use draft::Draft;
pub use quick_actions::{quick_actions, ColorTag, Icon, QuickAction, QUICK_ACTIONS};
pub use resolver::{resolve, Resolver, Rule, Topic};
pub use state::{Message, MessageId, Sender, TimeFormat};
pub use transcript::Transcript;
