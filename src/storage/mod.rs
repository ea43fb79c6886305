use std::sync::Arc;

use chrono::NaiveDate;

use crate::models::{
    course_resources::entities::CourseResource,
    course_tasks::entities::{CourseTask, CourseTaskInput},
    courses::entities::{Course, CourseInput},
    grade_levels::entities::{GradeLevel, OrderedCourse},
    school_breaks::entities::{SchoolBreak, SchoolBreakInput},
    school_years::entities::{SchoolYear, SchoolYearDetail, SchoolYearInput},
    schools::entities::School,
    students::{
        entities::{Coursework, Enrollment, Grade, Student},
        requests::StudentListQuery,
        responses::StudentListResponse,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest},
    },
};
use crate::utils::{DateRange, MoveTarget};

use crate::errors::Result;

pub mod sea_orm_storage;

/// 存储抽象
///
/// 所有按外部标识（UUID）查询的方法都接收原始字符串，格式错误时返回 `None`。
/// 带 `school_id` 的查询只返回该学校名下的记录。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户与学校
    // 在同一事务中创建管理员及其学校
    async fn create_user_with_school(&self, user: CreateUserRequest) -> Result<(User, School)>;
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    async fn get_school_by_admin(&self, admin_id: i64) -> Result<Option<School>>;

    /// 学年
    async fn list_school_years(&self, school_id: i64) -> Result<Vec<SchoolYear>>;
    async fn get_school_year(&self, school_id: i64, id: i64) -> Result<Option<SchoolYear>>;
    // 不按学校过滤，仅用于写入前的归属校验
    async fn find_school_year_by_id(&self, id: i64) -> Result<Option<SchoolYear>>;
    async fn get_school_year_by_uuid(
        &self,
        school_id: i64,
        uuid: &str,
    ) -> Result<Option<SchoolYear>>;
    // 学年及其假期、年级
    async fn get_school_year_detail(
        &self,
        school_id: i64,
        id: i64,
    ) -> Result<Option<SchoolYearDetail>>;
    // 同一学校内与给定范围重叠的第一个学年（按 id 升序）
    async fn find_overlapping_school_year(
        &self,
        school_id: i64,
        range: DateRange,
        exclude_id: Option<i64>,
    ) -> Result<Option<SchoolYear>>;
    async fn create_school_year(&self, school_id: i64, input: SchoolYearInput)
    -> Result<SchoolYear>;
    async fn update_school_year(
        &self,
        id: i64,
        input: SchoolYearInput,
    ) -> Result<Option<SchoolYear>>;
    async fn delete_school_year(&self, school_id: i64, id: i64) -> Result<bool>;

    /// 学校假期
    async fn list_school_breaks(
        &self,
        school_id: i64,
        school_year_id: Option<i64>,
    ) -> Result<Vec<SchoolBreak>>;
    async fn get_school_break(&self, school_id: i64, id: i64) -> Result<Option<SchoolBreak>>;
    // 同一学年内与给定范围重叠的第一个假期（按 id 升序）
    async fn find_overlapping_school_break(
        &self,
        school_year_id: i64,
        range: DateRange,
        exclude_id: Option<i64>,
    ) -> Result<Option<SchoolBreak>>;
    async fn create_school_break(
        &self,
        school_year_id: i64,
        input: SchoolBreakInput,
    ) -> Result<SchoolBreak>;
    async fn update_school_break(
        &self,
        id: i64,
        school_year_id: i64,
        input: SchoolBreakInput,
    ) -> Result<Option<SchoolBreak>>;
    async fn delete_school_break(&self, school_id: i64, id: i64) -> Result<bool>;

    /// 年级
    async fn list_grade_levels(
        &self,
        school_id: i64,
        school_year_id: Option<i64>,
    ) -> Result<Vec<GradeLevel>>;
    async fn get_grade_level(&self, school_id: i64, id: i64) -> Result<Option<GradeLevel>>;
    // 只返回属于该学校的年级，不存在或不属于的 id 被忽略
    async fn get_grade_levels_by_ids(
        &self,
        school_id: i64,
        ids: &[i64],
    ) -> Result<Vec<GradeLevel>>;
    async fn create_grade_level(&self, school_year_id: i64, name: String) -> Result<GradeLevel>;
    async fn update_grade_level(
        &self,
        id: i64,
        school_year_id: i64,
        name: String,
    ) -> Result<Option<GradeLevel>>;
    // 同时删除因此不再属于任何年级的课程
    async fn delete_grade_level(&self, school_id: i64, id: i64) -> Result<bool>;
    async fn list_grade_level_courses(&self, grade_level_id: i64) -> Result<Vec<OrderedCourse>>;
    // 课程不在该年级中时返回 None
    async fn move_grade_level_course(
        &self,
        grade_level_id: i64,
        course_id: i64,
        target: MoveTarget,
    ) -> Result<Option<Vec<OrderedCourse>>>;

    /// 课程
    // 课程追加到每个年级的末尾
    async fn create_course(&self, input: CourseInput, grade_level_ids: &[i64]) -> Result<Course>;
    // 课程的任一年级属于该学校的学年时才返回
    async fn get_course_by_uuid(&self, school_id: i64, uuid: &str) -> Result<Option<Course>>;
    async fn get_course_grade_levels(&self, course_id: i64) -> Result<Vec<GradeLevel>>;
    async fn count_course_tasks(&self, course_id: i64) -> Result<u64>;
    async fn update_course(&self, id: i64, input: CourseInput) -> Result<Option<Course>>;
    async fn delete_course(&self, id: i64) -> Result<bool>;

    /// 课程任务
    async fn list_course_tasks(&self, course_id: i64) -> Result<Vec<CourseTask>>;
    async fn get_course_task_by_uuid(
        &self,
        school_id: i64,
        uuid: &str,
    ) -> Result<Option<CourseTask>>;
    async fn create_course_task(
        &self,
        course_id: i64,
        input: CourseTaskInput,
    ) -> Result<CourseTask>;
    async fn update_course_task(
        &self,
        id: i64,
        input: CourseTaskInput,
    ) -> Result<Option<CourseTask>>;
    async fn delete_course_task(&self, id: i64) -> Result<bool>;
    async fn move_course_task(&self, id: i64, target: MoveTarget) -> Result<Option<CourseTask>>;

    /// 课程资源
    async fn list_course_resources(&self, course_id: i64) -> Result<Vec<CourseResource>>;
    async fn get_course_resource_by_uuid(
        &self,
        school_id: i64,
        uuid: &str,
    ) -> Result<Option<CourseResource>>;
    async fn create_course_resource(
        &self,
        course_id: i64,
        title: String,
        details: String,
    ) -> Result<CourseResource>;
    async fn update_course_resource(
        &self,
        id: i64,
        title: String,
        details: String,
    ) -> Result<Option<CourseResource>>;
    async fn delete_course_resource(&self, id: i64) -> Result<bool>;

    /// 学生
    async fn create_student(
        &self,
        school_id: i64,
        first_name: String,
        last_name: String,
    ) -> Result<Student>;
    async fn list_students_with_pagination(
        &self,
        school_id: i64,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;
    async fn get_student_by_uuid(&self, school_id: i64, uuid: &str) -> Result<Option<Student>>;
    // 学生在某学年中的入学记录
    async fn get_enrollment_in_school_year(
        &self,
        student_id: i64,
        school_year_id: i64,
    ) -> Result<Option<(Enrollment, GradeLevel)>>;
    async fn create_enrollment(&self, student_id: i64, grade_level_id: i64) -> Result<Enrollment>;
    async fn list_enrolled_grade_level_ids(&self, student_id: i64) -> Result<Vec<i64>>;
    // 重复完成时更新完成日期
    async fn complete_task(
        &self,
        student_id: i64,
        course_task_id: i64,
        completed_date: NaiveDate,
    ) -> Result<Coursework>;
    async fn uncomplete_task(&self, student_id: i64, course_task_id: i64) -> Result<bool>;
    async fn list_coursework_for_tasks(
        &self,
        student_id: i64,
        course_task_ids: &[i64],
    ) -> Result<Vec<Coursework>>;
    // 返回 (任务 id, 成绩)
    async fn list_grades_for_tasks(
        &self,
        student_id: i64,
        course_task_ids: &[i64],
    ) -> Result<Vec<(i64, Grade)>>;
    // 任务不计分时返回 None，重复评分时覆盖分数
    async fn grade_task(
        &self,
        student_id: i64,
        course_task_id: i64,
        score: i32,
    ) -> Result<Option<Grade>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
