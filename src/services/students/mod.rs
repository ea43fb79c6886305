pub mod course;
pub mod coursework;
pub mod create;
pub mod enroll;
pub mod grade;
pub mod list;
pub mod validate;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::ErrorCode;
use crate::models::schools::entities::School;
use crate::models::students::entities::Student;
use crate::models::students::requests::{
    CompleteTaskRequest, CreateStudentRequest, EnrollRequest, GradeRequest, StudentListQuery,
};
use crate::storage::Storage;

use super::{internal_error, not_found};

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn create_student(
        &self,
        request: &HttpRequest,
        student_data: CreateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_student(self, request, student_data).await
    }

    pub async fn list_students(
        &self,
        request: &HttpRequest,
        query: StudentListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_students(self, request, query).await
    }

    // 学生在一个学年中只能就读一个年级
    pub async fn enroll(
        &self,
        request: &HttpRequest,
        student_uuid: String,
        school_year_uuid: String,
        enroll_data: EnrollRequest,
    ) -> ActixResult<HttpResponse> {
        enroll::enroll(self, request, student_uuid, school_year_uuid, enroll_data).await
    }

    // 学生视角的课程：可见任务及完成情况、成绩
    pub async fn get_course(
        &self,
        request: &HttpRequest,
        student_uuid: String,
        course_uuid: String,
    ) -> ActixResult<HttpResponse> {
        course::get_student_course(self, request, student_uuid, course_uuid).await
    }

    pub async fn complete_task(
        &self,
        request: &HttpRequest,
        student_uuid: String,
        task_uuid: String,
        complete_data: CompleteTaskRequest,
    ) -> ActixResult<HttpResponse> {
        coursework::complete_task(self, request, student_uuid, task_uuid, complete_data).await
    }

    pub async fn uncomplete_task(
        &self,
        request: &HttpRequest,
        student_uuid: String,
        task_uuid: String,
    ) -> ActixResult<HttpResponse> {
        coursework::uncomplete_task(self, request, student_uuid, task_uuid).await
    }

    pub async fn grade(
        &self,
        request: &HttpRequest,
        grade_data: GradeRequest,
    ) -> ActixResult<HttpResponse> {
        grade::grade(self, request, grade_data).await
    }
}

pub(crate) async fn load_student(
    storage: &Arc<dyn Storage>,
    school: &School,
    student_uuid: &str,
) -> Result<Student, HttpResponse> {
    match storage.get_student_by_uuid(school.id, student_uuid).await {
        Ok(Some(student)) => Ok(student),
        Ok(None) => Err(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => Err(internal_error("Failed to load student", e)),
    }
}
