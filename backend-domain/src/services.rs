// Domain services
// Pure decision logic over the ports; no transport or storage concerns

pub mod attendance_policy;
pub mod checkin_resolver;
pub mod confirmation_codec;
pub mod event_validation;
pub mod whitelist_reconciler;

#[cfg(test)]
pub(crate) mod test_support;

pub use attendance_policy::*;
pub use checkin_resolver::*;
pub use confirmation_codec::*;
pub use event_validation::*;
pub use whitelist_reconciler::*;
