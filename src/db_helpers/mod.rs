mod conversation_helpers;
mod diary_helpers;
mod forum_helpers;
mod program_helpers;
mod scan_helpers;
mod stats_helpers;
mod user_helpers;

pub use conversation_helpers::*;
pub use diary_helpers::*;
pub use forum_helpers::*;
pub use program_helpers::*;
pub use scan_helpers::*;
pub use stats_helpers::*;
pub use user_helpers::*;
