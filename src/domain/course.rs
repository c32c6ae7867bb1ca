// ==========================================
// 教室分配预测系统 - 课程领域模型
// ==========================================
// 职责: 课程主数据定义
// 红线: 不含数据访问逻辑
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Course - 课程
// ==========================================
// 用途: 班级的归属课程, duration_terms 用于毕业班判定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub name: String,                 // 课程名称
    pub duration_terms: i32,          // 学制总学期数
    pub dropout_rate_percent: f64,    // 课程级流失率 (仅供参考, 预测使用全局配置值)

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
