pub mod conversation;
pub mod message;
pub mod user;

pub use conversation::{normalize_email, Conversation};
pub use message::{Message, Sender};
pub use user::{UserProfile, UserRecord};
