// ==========================================
// 教室分配预测系统 - 班级优先级排序引擎
// ==========================================
// 职责: 按预测人数降序排列班级 (大班优先的贪心装箱启发式)
// 红线: Engine 不拼 SQL
// ==========================================

use crate::domain::section::ProjectedSection;

// ==========================================
// SectionPrioritizer - 班级优先级排序引擎
// ==========================================
pub struct SectionPrioritizer {
    // 无状态引擎, 不需要注入依赖
}

impl SectionPrioritizer {
    pub fn new() -> Self {
        Self {}
    }

    /// 排序班级列表
    ///
    /// 排序键: forecast_enrollment 降序
    /// 约束: 必须使用稳定排序, 同值班级保持输入顺序 (保证结果可复现)
    pub fn sort(&self, mut sections: Vec<ProjectedSection>) -> Vec<ProjectedSection> {
        sections.sort_by(|a, b| b.forecast_enrollment.cmp(&a.forecast_enrollment));
        sections
    }
}

impl Default for SectionPrioritizer {
    fn default() -> Self {
        Self::new()
    }
}
