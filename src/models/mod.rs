pub mod doctor;
pub mod enums;
pub mod fields;
pub mod patient;
pub mod schedule;

pub use doctor::*;
pub use enums::*;
pub use fields::{FieldError, FieldMap, DATE_FORMAT};
pub use patient::*;
pub use schedule::{TimeRange, WeeklySchedule};
