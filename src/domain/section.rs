// ==========================================
// 教室分配预测系统 - 班级领域模型
// ==========================================
// 职责: 班级主数据、预测请求输入、投影结果定义
// 红线: 不含数据访问逻辑, 不含引擎逻辑
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::Shift;

// ==========================================
// Section - 班级主数据
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: i64,
    pub course_id: i64,
    pub shift: Shift,                 // 班次
    pub current_period: i32,          // 当前学期序号 (从 1 开始)
    pub student_count: i32,           // 当前在读人数
    pub year: i32,                    // 学年

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ==========================================
// SectionInput - 预测请求中的班级输入
// ==========================================
// 用途: 预测请求负载直接携带课程学制信息, 引擎不回查数据库
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionInput {
    pub id: i64,
    pub course_id: i64,
    pub shift: Shift,
    pub current_period: i32,
    pub student_count: i32,

    // ===== 归属课程信息 =====
    pub course_name: String,
    pub course_duration_terms: i32,
}

impl SectionInput {
    /// 展示用标签: "课程名 #班级ID"
    pub fn label(&self) -> String {
        format!("{} #{}", self.course_name, self.id)
    }
}

// ==========================================
// ProjectedSection - 投影后的班级
// ==========================================
// 用途: Enrollment Projector 的输出
// - forecast_enrollment: 按全局流失率折算后的预测人数
// - will_graduate: 当前学期等于学制总学期数时为毕业班
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedSection {
    pub section: SectionInput,
    pub forecast_enrollment: i32,
    pub will_graduate: bool,
}
