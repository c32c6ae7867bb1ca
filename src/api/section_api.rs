// ==========================================
// 教室分配预测系统 - 班级管理 API
// ==========================================
// 职责: 班级 CRUD 与预测输入装配
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::section::{Section, SectionInput};
use crate::domain::types::Shift;
use crate::repository::{CourseRepository, SectionRepository};
use std::sync::Arc;

// ==========================================
// SectionApi - 班级管理 API
// ==========================================
pub struct SectionApi {
    section_repo: Arc<SectionRepository>,
    course_repo: Arc<CourseRepository>,
}

impl SectionApi {
    pub fn new(section_repo: Arc<SectionRepository>, course_repo: Arc<CourseRepository>) -> Self {
        Self {
            section_repo,
            course_repo,
        }
    }

    /// 创建班级
    pub fn create_section(
        &self,
        course_id: i64,
        shift: Shift,
        current_period: i32,
        student_count: i32,
        year: i32,
    ) -> ApiResult<Section> {
        let course = self
            .course_repo
            .find_by_id(course_id)?
            .ok_or_else(|| ApiError::NotFound(format!("Course (id={})", course_id)))?;

        Self::validate(current_period, student_count)?;
        if current_period > course.duration_terms {
            return Err(ApiError::InvalidInput(format!(
                "当前学期序号 {} 超出课程学制 {}",
                current_period, course.duration_terms
            )));
        }

        Ok(self
            .section_repo
            .create(course_id, shift, current_period, student_count, year)?)
    }

    /// 查询全部班级
    pub fn list_sections(&self) -> ApiResult<Vec<Section>> {
        Ok(self.section_repo.find_all()?)
    }

    /// 按ID查询班级
    pub fn get_section(&self, id: i64) -> ApiResult<Section> {
        self.section_repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound(format!("Section (id={})", id)))
    }

    /// 更新班级
    pub fn update_section(
        &self,
        id: i64,
        shift: Shift,
        current_period: i32,
        student_count: i32,
        year: i32,
    ) -> ApiResult<Section> {
        Self::validate(current_period, student_count)?;
        Ok(self
            .section_repo
            .update(id, shift, current_period, student_count, year)?)
    }

    /// 删除班级
    pub fn delete_section(&self, id: i64) -> ApiResult<()> {
        Ok(self.section_repo.delete(id)?)
    }

    /// 装配某学年的预测输入 (携带课程名称与学制)
    pub fn forecast_inputs(&self, year: i32) -> ApiResult<Vec<SectionInput>> {
        Ok(self.section_repo.find_for_forecast(year)?)
    }

    fn validate(current_period: i32, student_count: i32) -> ApiResult<()> {
        if current_period < 1 {
            return Err(ApiError::InvalidInput(
                "当前学期序号必须从 1 开始".to_string(),
            ));
        }
        if student_count <= 0 {
            return Err(ApiError::InvalidInput(
                "在读人数必须为正整数".to_string(),
            ));
        }
        Ok(())
    }
}
