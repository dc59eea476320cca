//! Data models for `EctsTracker`

pub mod area;
pub mod course;
pub mod elective;
pub mod grade;
pub mod math;

pub use area::Area;
pub use course::MandatoryCourse;
pub use elective::{ElectiveRecord, FreeElectiveRecord};
pub use grade::{GradeEntry, GradeInput, GradeMap, NO_GRADE, VALID_GRADES};
pub use math::MathCredits;
