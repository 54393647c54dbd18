pub mod slack;

pub use slack::{SlackApi, SlackClient, UploadSlot, UploadedFile};
