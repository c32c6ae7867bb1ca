// ==========================================
// 教室分配预测系统 - 引擎层
// ==========================================
// 职责: 实现预测业务规则, 不拼 SQL
// 红线: Engine 不拼 SQL, 未分配必须输出 reason
// ==========================================

pub mod export;
pub mod forecast;
pub mod prioritizer;
pub mod projector;
pub mod repositories;
pub mod strategy;

// 重导出核心引擎
pub use export::{to_spreadsheet_rows, write_csv, ExportError, SpreadsheetRow};
pub use forecast::{ForecastDataSource, ForecastEngine, ForecastError};
pub use prioritizer::SectionPrioritizer;
pub use projector::EnrollmentProjector;
pub use repositories::ForecastRepositories;
pub use strategy::{AllocationOutcome, AllocationStrategy, GreedyFirstFitStrategy};
