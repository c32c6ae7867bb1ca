// ==========================================
// 教室分配预测系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// 职责: 提供数据访问接口, 屏蔽数据库细节
// 约束: 所有查询使用参数化, 防止 SQL 注入
// ==========================================

pub mod course_repo;
pub mod error;
pub mod forecast_config_repo;
pub mod room_config_repo;
pub mod room_repo;
pub mod saved_forecast_repo;
pub mod section_repo;

// 重导出核心仓储
pub use course_repo::CourseRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use forecast_config_repo::ForecastConfigRepository;
pub use room_config_repo::{RoomConfigRepository, SizeStatistics};
pub use room_repo::RoomRepository;
pub use saved_forecast_repo::SavedForecastRepository;
pub use section_repo::SectionRepository;

use chrono::{DateTime, Utc};

/// 解析存储的 RFC3339 时间戳, 无法解析时退回纪元零点
pub(crate) fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// 当前时间的存储格式
pub(crate) fn now_timestamp() -> String {
    Utc::now().to_rfc3339()
}
