// Domain entities
pub mod checkin;
pub mod config;
pub mod event;
pub mod listing;
pub mod roster;
pub mod user;

pub use checkin::*;
pub use config::*;
pub use event::*;
pub use listing::*;
pub use roster::*;
pub use user::*;
