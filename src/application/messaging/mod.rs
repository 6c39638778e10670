//! Message handling - Classification, rule resolution and reply generation

pub mod classifier;
pub mod generator;
pub mod resolver;

pub use classifier::MessageClassifier;
pub use generator::{Capability, ReplyGenerator};
pub use resolver::ReplyResolver;
