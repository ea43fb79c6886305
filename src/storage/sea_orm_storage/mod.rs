//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod course_resources;
mod course_tasks;
mod courses;
mod grade_levels;
mod school_breaks;
mod school_years;
mod students;
mod users;

use crate::config::AppConfig;
use crate::errors::{HomeschoolError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        Migrator::up(&db, None)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self::from_connection(db))
    }

    /// 使用已建立（且已迁移）的连接
    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        // 外键级联删除依赖 foreign_keys 打开
        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| HomeschoolError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| HomeschoolError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(2)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .map_err(|e| HomeschoolError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(HomeschoolError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 已迁移的内存 SQLite，单连接保证所有查询看到同一个库
#[cfg(test)]
pub(crate) async fn test_storage() -> SeaOrmStorage {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    SeaOrmStorage::from_connection(db)
}

/// 测试数据构造
#[cfg(test)]
pub(crate) mod fixtures {
    use super::SeaOrmStorage;
    use crate::models::{
        courses::entities::{Course, CourseInput},
        grade_levels::entities::GradeLevel,
        school_breaks::entities::{SchoolBreak, SchoolBreakInput},
        school_years::entities::{SchoolYear, SchoolYearInput},
        schools::entities::School,
        users::requests::CreateUserRequest,
    };
    use crate::utils::DaysOfWeek;
    use chrono::NaiveDate;

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub async fn school(storage: &SeaOrmStorage, username: &str) -> School {
        let (_, school) = storage
            .create_user_with_school_impl(CreateUserRequest {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password: "hash".to_string(),
                display_name: None,
            })
            .await
            .unwrap();
        school
    }

    pub async fn school_year(
        storage: &SeaOrmStorage,
        school_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> SchoolYear {
        storage
            .create_school_year_impl(
                school_id,
                SchoolYearInput {
                    start_date: start,
                    end_date: end,
                    days_of_week: DaysOfWeek::WEEKDAYS,
                },
            )
            .await
            .unwrap()
    }

    pub async fn school_break(
        storage: &SeaOrmStorage,
        school_year_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> SchoolBreak {
        storage
            .create_school_break_impl(
                school_year_id,
                SchoolBreakInput {
                    description: "Break".to_string(),
                    start_date: start,
                    end_date: end,
                },
            )
            .await
            .unwrap()
    }

    pub async fn grade_level(storage: &SeaOrmStorage, school_year_id: i64, name: &str) -> GradeLevel {
        storage
            .create_grade_level_impl(school_year_id, name.to_string())
            .await
            .unwrap()
    }

    pub async fn course(storage: &SeaOrmStorage, name: &str, grade_level_ids: &[i64]) -> Course {
        storage
            .create_course_impl(
                CourseInput {
                    name: name.to_string(),
                    days_of_week: DaysOfWeek::WEEKDAYS,
                    default_task_duration: 30,
                },
                grade_level_ids,
            )
            .await
            .unwrap()
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use crate::utils::{DateRange, MoveTarget};
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user_with_school(&self, user: CreateUserRequest) -> Result<(User, School)> {
        self.create_user_with_school_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn get_school_by_admin(&self, admin_id: i64) -> Result<Option<School>> {
        self.get_school_by_admin_impl(admin_id).await
    }

    // 学年模块
    async fn list_school_years(&self, school_id: i64) -> Result<Vec<SchoolYear>> {
        self.list_school_years_impl(school_id).await
    }

    async fn get_school_year(&self, school_id: i64, id: i64) -> Result<Option<SchoolYear>> {
        self.get_school_year_impl(school_id, id).await
    }

    async fn find_school_year_by_id(&self, id: i64) -> Result<Option<SchoolYear>> {
        self.find_school_year_by_id_impl(id).await
    }

    async fn get_school_year_by_uuid(
        &self,
        school_id: i64,
        uuid: &str,
    ) -> Result<Option<SchoolYear>> {
        self.get_school_year_by_uuid_impl(school_id, uuid).await
    }

    async fn get_school_year_detail(
        &self,
        school_id: i64,
        id: i64,
    ) -> Result<Option<SchoolYearDetail>> {
        self.get_school_year_detail_impl(school_id, id).await
    }

    async fn find_overlapping_school_year(
        &self,
        school_id: i64,
        range: DateRange,
        exclude_id: Option<i64>,
    ) -> Result<Option<SchoolYear>> {
        self.find_overlapping_school_year_impl(school_id, range, exclude_id)
            .await
    }

    async fn create_school_year(
        &self,
        school_id: i64,
        input: SchoolYearInput,
    ) -> Result<SchoolYear> {
        self.create_school_year_impl(school_id, input).await
    }

    async fn update_school_year(
        &self,
        id: i64,
        input: SchoolYearInput,
    ) -> Result<Option<SchoolYear>> {
        self.update_school_year_impl(id, input).await
    }

    async fn delete_school_year(&self, school_id: i64, id: i64) -> Result<bool> {
        self.delete_school_year_impl(school_id, id).await
    }

    // 学校假期模块
    async fn list_school_breaks(
        &self,
        school_id: i64,
        school_year_id: Option<i64>,
    ) -> Result<Vec<SchoolBreak>> {
        self.list_school_breaks_impl(school_id, school_year_id).await
    }

    async fn get_school_break(&self, school_id: i64, id: i64) -> Result<Option<SchoolBreak>> {
        self.get_school_break_impl(school_id, id).await
    }

    async fn find_overlapping_school_break(
        &self,
        school_year_id: i64,
        range: DateRange,
        exclude_id: Option<i64>,
    ) -> Result<Option<SchoolBreak>> {
        self.find_overlapping_school_break_impl(school_year_id, range, exclude_id)
            .await
    }

    async fn create_school_break(
        &self,
        school_year_id: i64,
        input: SchoolBreakInput,
    ) -> Result<SchoolBreak> {
        self.create_school_break_impl(school_year_id, input).await
    }

    async fn update_school_break(
        &self,
        id: i64,
        school_year_id: i64,
        input: SchoolBreakInput,
    ) -> Result<Option<SchoolBreak>> {
        self.update_school_break_impl(id, school_year_id, input)
            .await
    }

    async fn delete_school_break(&self, school_id: i64, id: i64) -> Result<bool> {
        self.delete_school_break_impl(school_id, id).await
    }

    // 年级模块
    async fn list_grade_levels(
        &self,
        school_id: i64,
        school_year_id: Option<i64>,
    ) -> Result<Vec<GradeLevel>> {
        self.list_grade_levels_impl(school_id, school_year_id).await
    }

    async fn get_grade_level(&self, school_id: i64, id: i64) -> Result<Option<GradeLevel>> {
        self.get_grade_level_impl(school_id, id).await
    }

    async fn get_grade_levels_by_ids(
        &self,
        school_id: i64,
        ids: &[i64],
    ) -> Result<Vec<GradeLevel>> {
        self.get_grade_levels_by_ids_impl(school_id, ids).await
    }

    async fn create_grade_level(&self, school_year_id: i64, name: String) -> Result<GradeLevel> {
        self.create_grade_level_impl(school_year_id, name).await
    }

    async fn update_grade_level(
        &self,
        id: i64,
        school_year_id: i64,
        name: String,
    ) -> Result<Option<GradeLevel>> {
        self.update_grade_level_impl(id, school_year_id, name).await
    }

    async fn delete_grade_level(&self, school_id: i64, id: i64) -> Result<bool> {
        self.delete_grade_level_impl(school_id, id).await
    }

    async fn list_grade_level_courses(&self, grade_level_id: i64) -> Result<Vec<OrderedCourse>> {
        self.list_grade_level_courses_impl(grade_level_id).await
    }

    async fn move_grade_level_course(
        &self,
        grade_level_id: i64,
        course_id: i64,
        target: MoveTarget,
    ) -> Result<Option<Vec<OrderedCourse>>> {
        self.move_grade_level_course_impl(grade_level_id, course_id, target)
            .await
    }

    // 课程模块
    async fn create_course(&self, input: CourseInput, grade_level_ids: &[i64]) -> Result<Course> {
        self.create_course_impl(input, grade_level_ids).await
    }

    async fn get_course_by_uuid(&self, school_id: i64, uuid: &str) -> Result<Option<Course>> {
        self.get_course_by_uuid_impl(school_id, uuid).await
    }

    async fn get_course_grade_levels(&self, course_id: i64) -> Result<Vec<GradeLevel>> {
        self.get_course_grade_levels_impl(course_id).await
    }

    async fn count_course_tasks(&self, course_id: i64) -> Result<u64> {
        self.count_course_tasks_impl(course_id).await
    }

    async fn update_course(&self, id: i64, input: CourseInput) -> Result<Option<Course>> {
        self.update_course_impl(id, input).await
    }

    async fn delete_course(&self, id: i64) -> Result<bool> {
        self.delete_course_impl(id).await
    }

    // 课程任务模块
    async fn list_course_tasks(&self, course_id: i64) -> Result<Vec<CourseTask>> {
        self.list_course_tasks_impl(course_id).await
    }

    async fn get_course_task_by_uuid(
        &self,
        school_id: i64,
        uuid: &str,
    ) -> Result<Option<CourseTask>> {
        self.get_course_task_by_uuid_impl(school_id, uuid).await
    }

    async fn create_course_task(
        &self,
        course_id: i64,
        input: CourseTaskInput,
    ) -> Result<CourseTask> {
        self.create_course_task_impl(course_id, input).await
    }

    async fn update_course_task(
        &self,
        id: i64,
        input: CourseTaskInput,
    ) -> Result<Option<CourseTask>> {
        self.update_course_task_impl(id, input).await
    }

    async fn delete_course_task(&self, id: i64) -> Result<bool> {
        self.delete_course_task_impl(id).await
    }

    async fn move_course_task(&self, id: i64, target: MoveTarget) -> Result<Option<CourseTask>> {
        self.move_course_task_impl(id, target).await
    }

    // 课程资源模块
    async fn list_course_resources(&self, course_id: i64) -> Result<Vec<CourseResource>> {
        self.list_course_resources_impl(course_id).await
    }

    async fn get_course_resource_by_uuid(
        &self,
        school_id: i64,
        uuid: &str,
    ) -> Result<Option<CourseResource>> {
        self.get_course_resource_by_uuid_impl(school_id, uuid).await
    }

    async fn create_course_resource(
        &self,
        course_id: i64,
        title: String,
        details: String,
    ) -> Result<CourseResource> {
        self.create_course_resource_impl(course_id, title, details)
            .await
    }

    async fn update_course_resource(
        &self,
        id: i64,
        title: String,
        details: String,
    ) -> Result<Option<CourseResource>> {
        self.update_course_resource_impl(id, title, details).await
    }

    async fn delete_course_resource(&self, id: i64) -> Result<bool> {
        self.delete_course_resource_impl(id).await
    }

    // 学生模块
    async fn create_student(
        &self,
        school_id: i64,
        first_name: String,
        last_name: String,
    ) -> Result<Student> {
        self.create_student_impl(school_id, first_name, last_name)
            .await
    }

    async fn list_students_with_pagination(
        &self,
        school_id: i64,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        self.list_students_with_pagination_impl(school_id, query)
            .await
    }

    async fn get_student_by_uuid(&self, school_id: i64, uuid: &str) -> Result<Option<Student>> {
        self.get_student_by_uuid_impl(school_id, uuid).await
    }

    async fn get_enrollment_in_school_year(
        &self,
        student_id: i64,
        school_year_id: i64,
    ) -> Result<Option<(Enrollment, GradeLevel)>> {
        self.get_enrollment_in_school_year_impl(student_id, school_year_id)
            .await
    }

    async fn create_enrollment(&self, student_id: i64, grade_level_id: i64) -> Result<Enrollment> {
        self.create_enrollment_impl(student_id, grade_level_id).await
    }

    async fn list_enrolled_grade_level_ids(&self, student_id: i64) -> Result<Vec<i64>> {
        self.list_enrolled_grade_level_ids_impl(student_id).await
    }

    async fn complete_task(
        &self,
        student_id: i64,
        course_task_id: i64,
        completed_date: NaiveDate,
    ) -> Result<Coursework> {
        self.complete_task_impl(student_id, course_task_id, completed_date)
            .await
    }

    async fn uncomplete_task(&self, student_id: i64, course_task_id: i64) -> Result<bool> {
        self.uncomplete_task_impl(student_id, course_task_id).await
    }

    async fn list_coursework_for_tasks(
        &self,
        student_id: i64,
        course_task_ids: &[i64],
    ) -> Result<Vec<Coursework>> {
        self.list_coursework_for_tasks_impl(student_id, course_task_ids)
            .await
    }

    async fn list_grades_for_tasks(
        &self,
        student_id: i64,
        course_task_ids: &[i64],
    ) -> Result<Vec<(i64, Grade)>> {
        self.list_grades_for_tasks_impl(student_id, course_task_ids)
            .await
    }

    async fn grade_task(
        &self,
        student_id: i64,
        course_task_id: i64,
        score: i32,
    ) -> Result<Option<Grade>> {
        self.grade_task_impl(student_id, course_task_id, score).await
    }
}
