// ==========================================
// 教室分配预测系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口, 装配仓储与引擎
// ==========================================

pub mod config_api;
pub mod course_api;
pub mod error;
pub mod forecast_api;
pub mod room_api;
pub mod section_api;

// 重导出核心类型
pub use config_api::{ConfigApi, CreateForecastConfig, UpdateForecastConfig};
pub use course_api::CourseApi;
pub use error::{ApiError, ApiResult};
pub use forecast_api::ForecastApi;
pub use room_api::RoomApi;
pub use section_api::SectionApi;
