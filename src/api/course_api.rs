// ==========================================
// 教室分配预测系统 - 课程管理 API
// ==========================================
// 职责: 课程 CRUD 与字段校验 (对预测引擎而言为薄封装)
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::course::Course;
use crate::repository::CourseRepository;
use std::sync::Arc;

// ==========================================
// CourseApi - 课程管理 API
// ==========================================
pub struct CourseApi {
    course_repo: Arc<CourseRepository>,
}

impl CourseApi {
    pub fn new(course_repo: Arc<CourseRepository>) -> Self {
        Self { course_repo }
    }

    /// 创建课程
    pub fn create_course(
        &self,
        name: &str,
        duration_terms: i32,
        dropout_rate_percent: f64,
    ) -> ApiResult<Course> {
        Self::validate(name, duration_terms, dropout_rate_percent)?;
        Ok(self
            .course_repo
            .create(name.trim(), duration_terms, dropout_rate_percent)?)
    }

    /// 查询全部课程
    pub fn list_courses(&self) -> ApiResult<Vec<Course>> {
        Ok(self.course_repo.find_all()?)
    }

    /// 按ID查询课程
    pub fn get_course(&self, id: i64) -> ApiResult<Course> {
        self.course_repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound(format!("Course (id={})", id)))
    }

    /// 更新课程
    pub fn update_course(
        &self,
        id: i64,
        name: &str,
        duration_terms: i32,
        dropout_rate_percent: f64,
    ) -> ApiResult<Course> {
        Self::validate(name, duration_terms, dropout_rate_percent)?;
        Ok(self
            .course_repo
            .update(id, name.trim(), duration_terms, dropout_rate_percent)?)
    }

    /// 删除课程
    pub fn delete_course(&self, id: i64) -> ApiResult<()> {
        Ok(self.course_repo.delete(id)?)
    }

    fn validate(name: &str, duration_terms: i32, dropout_rate_percent: f64) -> ApiResult<()> {
        if name.trim().is_empty() {
            return Err(ApiError::InvalidInput("课程名称不能为空".to_string()));
        }
        if duration_terms < 1 {
            return Err(ApiError::InvalidInput(
                "学制总学期数必须为正整数".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&dropout_rate_percent) {
            return Err(ApiError::InvalidInput(
                "课程流失率必须在 0 至 100 之间".to_string(),
            ));
        }
        Ok(())
    }
}
