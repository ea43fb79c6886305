pub mod date_range;
pub mod days_of_week;
pub mod extractor;
pub mod jwt;
pub mod ordering;
pub mod parameter_error_handler;
pub mod password;
pub mod sql;
pub mod validate;

pub use date_range::DateRange;
pub use days_of_week::{DaysOfWeek, WeekdayFlags};
pub use extractor::{SafeIDI64, parse_uuid};
pub use ordering::MoveTarget;
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
pub use sql::escape_like_pattern;
