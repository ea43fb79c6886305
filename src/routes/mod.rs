pub mod auth;
pub mod course_resources;
pub mod course_tasks;
pub mod courses;
pub mod grade_levels;
pub mod school_breaks;
pub mod school_years;
pub mod schools;
pub mod students;

pub use auth::configure_auth_routes;
pub use course_resources::configure_course_resource_routes;
pub use course_tasks::configure_course_task_routes;
pub use courses::configure_course_routes;
pub use grade_levels::configure_grade_level_routes;
pub use school_breaks::configure_school_break_routes;
pub use school_years::configure_school_year_routes;
pub use schools::configure_school_routes;
pub use students::configure_student_routes;
