// Domain value objects
pub mod attendance_mode;
pub mod identifiers;
pub mod revealed_field;
pub mod staff_role;

pub use attendance_mode::*;
pub use identifiers::*;
pub use revealed_field::*;
pub use staff_role::*;
