// ==========================================
// 教室分配预测系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体与基础类型
// 红线: 不含数据访问逻辑, 不含引擎逻辑
// ==========================================

pub mod course;
pub mod forecast;
pub mod room;
pub mod section;
pub mod types;

// 重导出核心类型
pub use course::Course;
pub use forecast::{
    AllocationRecord, ForecastConfig, ForecastRequest, ForecastResult, RoomAllocationSummary,
    SavedForecast, ShortfallEntry, SizeCapacities, UnallocatedSection,
};
pub use room::{Room, RoomConfiguration};
pub use section::{ProjectedSection, Section, SectionInput};
pub use types::{RoomKind, RoomSize, Shift};
