// Write-side use cases

pub mod checkin_commands;
pub mod event_commands;
pub mod user_commands;

pub use checkin_commands::*;
pub use event_commands::*;
pub use user_commands::*;
