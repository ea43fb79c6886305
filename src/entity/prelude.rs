//! 预导入模块，方便使用

pub use super::course_resources::{
    ActiveModel as CourseResourceActiveModel, Entity as CourseResources,
    Model as CourseResourceModel,
};
pub use super::course_tasks::{
    ActiveModel as CourseTaskActiveModel, Entity as CourseTasks, Model as CourseTaskModel,
};
pub use super::courses::{ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel};
pub use super::coursework::{
    ActiveModel as CourseworkActiveModel, Entity as Coursework, Model as CourseworkModel,
};
pub use super::enrollments::{
    ActiveModel as EnrollmentActiveModel, Entity as Enrollments, Model as EnrollmentModel,
};
pub use super::grade_level_courses::{
    ActiveModel as GradeLevelCourseActiveModel, Entity as GradeLevelCourses,
    Model as GradeLevelCourseModel,
};
pub use super::grade_levels::{
    ActiveModel as GradeLevelActiveModel, Entity as GradeLevels, Model as GradeLevelModel,
};
pub use super::graded_works::{
    ActiveModel as GradedWorkActiveModel, Entity as GradedWorks, Model as GradedWorkModel,
};
pub use super::grades::{ActiveModel as GradeActiveModel, Entity as Grades, Model as GradeModel};
pub use super::school_breaks::{
    ActiveModel as SchoolBreakActiveModel, Entity as SchoolBreaks, Model as SchoolBreakModel,
};
pub use super::school_years::{
    ActiveModel as SchoolYearActiveModel, Entity as SchoolYears, Model as SchoolYearModel,
};
pub use super::schools::{ActiveModel as SchoolActiveModel, Entity as Schools, Model as SchoolModel};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
