pub mod chat;
pub mod completion;

pub use chat as ChatController;
pub use completion as CompletionController;
