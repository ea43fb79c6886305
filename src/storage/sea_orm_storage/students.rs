//! 学生、入学、任务完成与成绩存储操作

use super::SeaOrmStorage;
use crate::entity::coursework::{
    ActiveModel as CourseworkActiveModel, Column as CourseworkColumn, Entity as CourseworkEntity,
};
use crate::entity::enrollments::{
    ActiveModel as EnrollmentActiveModel, Column as EnrollmentColumn, Entity as Enrollments,
};
use crate::entity::graded_works::{Column as GradedWorkColumn, Entity as GradedWorks};
use crate::entity::grade_levels::{Column as GradeLevelColumn, Entity as GradeLevels};
use crate::entity::grades::{ActiveModel as GradeActiveModel, Column as GradeColumn, Entity as Grades};
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::{HomeschoolError, Result};
use crate::models::{
    PaginationInfo,
    grade_levels::entities::GradeLevel,
    students::{
        entities::{Coursework, Enrollment, Grade, Student},
        requests::StudentListQuery,
        responses::StudentListResponse,
    },
};
use crate::utils::{escape_like_pattern, parse_uuid};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 创建学生
    pub async fn create_student_impl(
        &self,
        school_id: i64,
        first_name: String,
        last_name: String,
    ) -> Result<Student> {
        let model = ActiveModel {
            uuid: Set(uuid::Uuid::new_v4()),
            school_id: Set(school_id),
            first_name: Set(first_name),
            last_name: Set(last_name),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("创建学生失败: {e}")))?;

        Ok(result.into_student())
    }

    /// 分页列出学校的学生
    pub async fn list_students_with_pagination_impl(
        &self,
        school_id: i64,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        let (page, size) = query.pagination.normalized();

        let mut select = Students::find().filter(Column::SchoolId.eq(school_id));

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::FirstName.contains(&escaped))
                    .add(Column::LastName.contains(&escaped)),
            );
        }

        let paginator = select
            .order_by_asc(Column::FirstName)
            .order_by_asc(Column::Id)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询学生总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询学生页数失败: {e}")))?;

        let students = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询学生列表失败: {e}")))?;

        Ok(StudentListResponse {
            items: students.into_iter().map(|m| m.into_student()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 通过 UUID 获取学生
    pub async fn get_student_by_uuid_impl(
        &self,
        school_id: i64,
        uuid: &str,
    ) -> Result<Option<Student>> {
        let Some(uuid) = parse_uuid(uuid) else {
            return Ok(None);
        };

        let result = Students::find()
            .filter(Column::Uuid.eq(uuid))
            .filter(Column::SchoolId.eq(school_id))
            .one(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 学生在某学年中的入学记录
    pub async fn get_enrollment_in_school_year_impl(
        &self,
        student_id: i64,
        school_year_id: i64,
    ) -> Result<Option<(Enrollment, GradeLevel)>> {
        let result = Enrollments::find()
            .find_also_related(GradeLevels)
            .filter(EnrollmentColumn::StudentId.eq(student_id))
            .filter(GradeLevelColumn::SchoolYearId.eq(school_year_id))
            .one(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询入学记录失败: {e}")))?;

        Ok(result.and_then(|(enrollment, grade_level)| {
            grade_level.map(|grade_level| {
                (enrollment.into_enrollment(), grade_level.into_grade_level())
            })
        }))
    }

    /// 创建入学记录
    pub async fn create_enrollment_impl(
        &self,
        student_id: i64,
        grade_level_id: i64,
    ) -> Result<Enrollment> {
        let model = EnrollmentActiveModel {
            student_id: Set(student_id),
            grade_level_id: Set(grade_level_id),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("创建入学记录失败: {e}")))?;

        Ok(result.into_enrollment())
    }

    /// 学生就读的所有年级 id
    pub async fn list_enrolled_grade_level_ids_impl(&self, student_id: i64) -> Result<Vec<i64>> {
        Enrollments::find()
            .select_only()
            .column(EnrollmentColumn::GradeLevelId)
            .filter(EnrollmentColumn::StudentId.eq(student_id))
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询入学记录失败: {e}")))
    }

    /// 标记任务完成，已完成时更新日期
    pub async fn complete_task_impl(
        &self,
        student_id: i64,
        course_task_id: i64,
        completed_date: NaiveDate,
    ) -> Result<Coursework> {
        let existing = CourseworkEntity::find()
            .filter(CourseworkColumn::StudentId.eq(student_id))
            .filter(CourseworkColumn::CourseTaskId.eq(course_task_id))
            .one(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询完成记录失败: {e}")))?;

        let result = match existing {
            Some(existing) => {
                let mut model: CourseworkActiveModel = existing.into();
                model.completed_date = Set(completed_date);
                model.update(&self.db).await
            }
            None => {
                CourseworkActiveModel {
                    student_id: Set(student_id),
                    course_task_id: Set(course_task_id),
                    completed_date: Set(completed_date),
                    created_at: Set(chrono::Utc::now().timestamp()),
                    ..Default::default()
                }
                .insert(&self.db)
                .await
            }
        }
        .map_err(|e| HomeschoolError::database_operation(format!("保存完成记录失败: {e}")))?;

        Ok(result.into_coursework())
    }

    /// 撤销任务完成
    pub async fn uncomplete_task_impl(&self, student_id: i64, course_task_id: i64) -> Result<bool> {
        let result = CourseworkEntity::delete_many()
            .filter(CourseworkColumn::StudentId.eq(student_id))
            .filter(CourseworkColumn::CourseTaskId.eq(course_task_id))
            .exec(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("删除完成记录失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 学生在给定任务上的完成记录
    pub async fn list_coursework_for_tasks_impl(
        &self,
        student_id: i64,
        course_task_ids: &[i64],
    ) -> Result<Vec<Coursework>> {
        if course_task_ids.is_empty() {
            return Ok(Vec::new());
        }

        let records = CourseworkEntity::find()
            .filter(CourseworkColumn::StudentId.eq(student_id))
            .filter(CourseworkColumn::CourseTaskId.is_in(course_task_ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询完成记录失败: {e}")))?;

        Ok(records.into_iter().map(|m| m.into_coursework()).collect())
    }

    /// 学生在给定任务上的成绩
    pub async fn list_grades_for_tasks_impl(
        &self,
        student_id: i64,
        course_task_ids: &[i64],
    ) -> Result<Vec<(i64, Grade)>> {
        if course_task_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = Grades::find()
            .find_also_related(GradedWorks)
            .filter(GradeColumn::StudentId.eq(student_id))
            .filter(GradedWorkColumn::CourseTaskId.is_in(course_task_ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|(grade, graded_work)| {
                graded_work.map(|graded_work| (graded_work.course_task_id, grade.into_grade()))
            })
            .collect())
    }

    /// 为计分任务评分，重复评分时覆盖分数
    pub async fn grade_task_impl(
        &self,
        student_id: i64,
        course_task_id: i64,
        score: i32,
    ) -> Result<Option<Grade>> {
        let Some(graded_work_id) = Self::graded_work_id_for_task(&self.db, course_task_id).await?
        else {
            return Ok(None);
        };

        let existing = Grades::find()
            .filter(GradeColumn::StudentId.eq(student_id))
            .filter(GradeColumn::GradedWorkId.eq(graded_work_id))
            .one(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询成绩失败: {e}")))?;

        let now = chrono::Utc::now().timestamp();
        let result = match existing {
            Some(existing) => {
                let mut model: GradeActiveModel = existing.into();
                model.score = Set(score);
                model.updated_at = Set(now);
                model.update(&self.db).await
            }
            None => {
                GradeActiveModel {
                    student_id: Set(student_id),
                    graded_work_id: Set(graded_work_id),
                    score: Set(score),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&self.db)
                .await
            }
        }
        .map_err(|e| HomeschoolError::database_operation(format!("保存成绩失败: {e}")))?;

        Ok(Some(result.into_grade()))
    }
}

#[cfg(test)]
mod tests {
    use super::super::{fixtures, fixtures::date, test_storage};
    use super::*;
    use crate::models::PaginationQuery;
    use crate::models::course_tasks::entities::CourseTaskInput;

    fn query(search: Option<&str>) -> StudentListQuery {
        StudentListQuery {
            pagination: PaginationQuery { page: 1, size: 20 },
            search: search.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_list_and_search_are_scoped() {
        let storage = test_storage().await;
        let school = fixtures::school(&storage, "alice").await;
        let other = fixtures::school(&storage, "bob").await;

        for (first, last) in [("Mark", "Smith"), ("Mary", "Jones"), ("Luke", "Smith")] {
            storage
                .create_student_impl(school.id, first.to_string(), last.to_string())
                .await
                .unwrap();
        }
        storage
            .create_student_impl(other.id, "Marcus".to_string(), "Brown".to_string())
            .await
            .unwrap();

        let all = storage
            .list_students_with_pagination_impl(school.id, query(None))
            .await
            .unwrap();
        assert_eq!(all.pagination.total, 3);

        let smiths = storage
            .list_students_with_pagination_impl(school.id, query(Some("Smith")))
            .await
            .unwrap();
        let names: Vec<String> = smiths.items.iter().map(|s| s.full_name()).collect();
        assert_eq!(names, ["Luke Smith", "Mark Smith"]);

        let marks = storage
            .list_students_with_pagination_impl(school.id, query(Some("Mar")))
            .await
            .unwrap();
        assert_eq!(marks.items.len(), 2);
    }

    #[tokio::test]
    async fn test_enrollment_lookup_per_school_year() {
        let storage = test_storage().await;
        let school = fixtures::school(&storage, "alice").await;
        let year =
            fixtures::school_year(&storage, school.id, date(2024, 9, 1), date(2025, 6, 1)).await;
        let next =
            fixtures::school_year(&storage, school.id, date(2025, 9, 1), date(2026, 6, 1)).await;
        let third = fixtures::grade_level(&storage, year.id, "Third Grade").await;
        let student = storage
            .create_student_impl(school.id, "Mark".to_string(), "Smith".to_string())
            .await
            .unwrap();

        assert!(
            storage
                .get_enrollment_in_school_year_impl(student.id, year.id)
                .await
                .unwrap()
                .is_none()
        );

        storage.create_enrollment_impl(student.id, third.id).await.unwrap();

        let (_, grade_level) = storage
            .get_enrollment_in_school_year_impl(student.id, year.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(grade_level.id, third.id);
        assert!(
            storage
                .get_enrollment_in_school_year_impl(student.id, next.id)
                .await
                .unwrap()
                .is_none()
        );
        assert_eq!(
            storage.list_enrolled_grade_level_ids_impl(student.id).await.unwrap(),
            vec![third.id]
        );

        // 同一年级重复入学被唯一索引拒绝
        assert!(storage.create_enrollment_impl(student.id, third.id).await.is_err());
    }

    #[tokio::test]
    async fn test_completion_and_grading() {
        let storage = test_storage().await;
        let school = fixtures::school(&storage, "alice").await;
        let other = fixtures::school(&storage, "bob").await;
        let year =
            fixtures::school_year(&storage, school.id, date(2024, 9, 1), date(2025, 6, 1)).await;
        let grade = fixtures::grade_level(&storage, year.id, "Third Grade").await;
        let course = fixtures::course(&storage, "Math", &[grade.id]).await;
        let student = storage
            .create_student_impl(school.id, "Mark".to_string(), "Smith".to_string())
            .await
            .unwrap();
        let quiz = storage
            .create_course_task_impl(
                course.id,
                CourseTaskInput {
                    description: "Quiz".to_string(),
                    duration: 20,
                    grade_level_id: None,
                    is_graded: true,
                },
            )
            .await
            .unwrap();
        let reading = storage
            .create_course_task_impl(
                course.id,
                CourseTaskInput {
                    description: "Reading".to_string(),
                    duration: 20,
                    grade_level_id: None,
                    is_graded: false,
                },
            )
            .await
            .unwrap();

        storage
            .complete_task_impl(student.id, quiz.id, date(2024, 9, 3))
            .await
            .unwrap();
        let again = storage
            .complete_task_impl(student.id, quiz.id, date(2024, 9, 4))
            .await
            .unwrap();
        assert_eq!(again.completed_date, date(2024, 9, 4));

        let records = storage
            .list_coursework_for_tasks_impl(student.id, &[quiz.id, reading.id])
            .await
            .unwrap();
        assert_eq!(records.len(), 1);

        assert!(storage.grade_task_impl(student.id, reading.id, 90).await.unwrap().is_none());
        storage.grade_task_impl(student.id, quiz.id, 80).await.unwrap().unwrap();
        let regraded = storage.grade_task_impl(student.id, quiz.id, 95).await.unwrap().unwrap();
        assert_eq!(regraded.score, 95);

        let grades = storage
            .list_grades_for_tasks_impl(student.id, &[quiz.id, reading.id])
            .await
            .unwrap();
        assert_eq!(grades.len(), 1);
        assert_eq!(grades[0].0, quiz.id);
        assert_eq!(grades[0].1.score, 95);

        assert!(storage.uncomplete_task_impl(student.id, quiz.id).await.unwrap());
        assert!(!storage.uncomplete_task_impl(student.id, quiz.id).await.unwrap());

        // 其他学校看不到该学生
        let uuid = student.uuid.to_string();
        assert!(storage.get_student_by_uuid_impl(other.id, &uuid).await.unwrap().is_none());
        assert!(storage.get_student_by_uuid_impl(school.id, "nope").await.unwrap().is_none());
    }
}
