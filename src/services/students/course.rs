use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StudentService, load_student};
use crate::models::ApiResponse;
use crate::models::course_tasks::entities::CourseTask;
use crate::models::students::entities::{Coursework, Grade};
use crate::models::students::responses::{StudentCourseResponse, StudentTaskItem};
use crate::services::courses::load_course;
use crate::services::{current_school, internal_error};

/// 按任务组合完成日期与成绩
pub fn build_task_items(
    tasks: Vec<CourseTask>,
    coursework: Vec<Coursework>,
    grades: Vec<(i64, Grade)>,
) -> Vec<StudentTaskItem> {
    let completed: HashMap<i64, _> = coursework
        .into_iter()
        .map(|work| (work.course_task_id, work.completed_date))
        .collect();
    let scores: HashMap<i64, i32> = grades
        .into_iter()
        .map(|(task_id, grade)| (task_id, grade.score))
        .collect();

    tasks
        .into_iter()
        .map(|task| StudentTaskItem {
            completed_date: completed.get(&task.id).copied(),
            score: scores.get(&task.id).copied(),
            task,
        })
        .collect()
}

pub async fn get_student_course(
    service: &StudentService,
    request: &HttpRequest,
    student_uuid: String,
    course_uuid: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let (_, school) = match current_school(&storage, request).await {
        Ok(found) => found,
        Err(response) => return Ok(response),
    };

    let student = match load_student(&storage, &school, &student_uuid).await {
        Ok(student) => student,
        Err(response) => return Ok(response),
    };

    let course = match load_course(&storage, &school, &course_uuid).await {
        Ok(course) => course,
        Err(response) => return Ok(response),
    };

    let enrolled = match storage.list_enrolled_grade_level_ids(student.id).await {
        Ok(ids) => ids,
        Err(e) => return Ok(internal_error("Failed to load enrollments", e)),
    };

    let tasks: Vec<CourseTask> = match storage.list_course_tasks(course.id).await {
        Ok(tasks) => tasks
            .into_iter()
            .filter(|task| task.is_visible_to(&enrolled))
            .collect(),
        Err(e) => return Ok(internal_error("Failed to list course tasks", e)),
    };
    let task_ids: Vec<i64> = tasks.iter().map(|task| task.id).collect();

    let coursework = match storage
        .list_coursework_for_tasks(student.id, &task_ids)
        .await
    {
        Ok(coursework) => coursework,
        Err(e) => return Ok(internal_error("Failed to load coursework", e)),
    };

    let grades = match storage.list_grades_for_tasks(student.id, &task_ids).await {
        Ok(grades) => grades,
        Err(e) => return Ok(internal_error("Failed to load grades", e)),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        StudentCourseResponse {
            student,
            course,
            tasks: build_task_items(tasks, coursework, grades),
        },
        "Student course retrieved successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn task(id: i64) -> CourseTask {
        let now = chrono::Utc::now();
        CourseTask {
            id,
            uuid: uuid::Uuid::new_v4(),
            course_id: 1,
            description: format!("Lesson {id}"),
            duration: 30,
            grade_level_id: None,
            order: id as i32,
            is_graded: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_build_task_items() {
        let now = chrono::Utc::now();
        let done = NaiveDate::from_ymd_opt(2024, 9, 3).unwrap();
        let coursework = vec![Coursework {
            id: 1,
            student_id: 1,
            course_task_id: 2,
            completed_date: done,
            created_at: now,
        }];
        let grades = vec![(
            2,
            Grade {
                id: 1,
                student_id: 1,
                graded_work_id: 9,
                score: 88,
                created_at: now,
                updated_at: now,
            },
        )];

        let items = build_task_items(vec![task(1), task(2)], coursework, grades);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].completed_date, None);
        assert_eq!(items[0].score, None);
        assert_eq!(items[1].completed_date, Some(done));
        assert_eq!(items[1].score, Some(88));
    }
}
