//! Canned "AI" responders behind the chat and scan endpoints.
//!
//! Neither responder performs inference. The chat responder picks a reply
//! from a keyword-matched topic bucket and the scanner returns a random
//! entry of a fixed condition table regardless of the submitted image.

pub mod responder;
pub mod scanner;

pub use responder::{classify, reply, Topic};
pub use scanner::{analyze, ScanCondition, CONDITIONS};
