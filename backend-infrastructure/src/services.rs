pub mod health_service;
pub mod identity_service;

pub use health_service::*;
pub use identity_service::*;
