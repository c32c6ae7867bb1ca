// ==========================================
// 教室分配预测系统 - 人数投影引擎
// ==========================================
// 职责: 按全局流失率折算预测人数, 过滤毕业班
// 红线: Engine 不拼 SQL, 所有规则必须输出 reason
// ==========================================

use crate::domain::section::{ProjectedSection, SectionInput};
use tracing::debug;

// ==========================================
// EnrollmentProjector - 人数投影引擎
// ==========================================
pub struct EnrollmentProjector {
    // 无状态引擎, 不需要注入依赖
}

impl EnrollmentProjector {
    pub fn new() -> Self {
        Self {}
    }

    /// 投影班级列表
    ///
    /// 规则:
    /// 1) forecast_enrollment = round(student_count * (1 - dropout_rate/100)),
    ///    四舍五入 (远离零方向)
    /// 2) will_graduate = (current_period == course_duration_terms)
    /// 3) 毕业班直接剔除, 不为其保留教室容量
    ///
    /// # 参数
    /// - `sections`: 预测请求中的班级输入
    /// - `dropout_rate_percent`: 全局流失率 (0-100)
    ///
    /// # 返回
    /// 非毕业班的投影结果 (保持输入顺序)
    pub fn project(
        &self,
        sections: &[SectionInput],
        dropout_rate_percent: f64,
    ) -> Vec<ProjectedSection> {
        let retention = 1.0 - dropout_rate_percent / 100.0;

        let mut projected = Vec::with_capacity(sections.len());
        for section in sections {
            let forecast_enrollment = (section.student_count as f64 * retention).round() as i32;
            let will_graduate = section.current_period == section.course_duration_terms;

            if will_graduate {
                debug!(
                    section_id = section.id,
                    current_period = section.current_period,
                    "毕业班剔除, 不参与教室分配"
                );
                continue;
            }

            projected.push(ProjectedSection {
                section: section.clone(),
                forecast_enrollment,
                will_graduate,
            });
        }
        projected
    }
}

impl Default for EnrollmentProjector {
    fn default() -> Self {
        Self::new()
    }
}
