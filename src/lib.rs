// ==========================================
// 教室分配预测系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 决策支持系统 (排课人员最终控制权)
// 核心: 按容量/面积约束将班级分配到教室, 输出未分配
//       班级与各规格教室缺口
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 业务规则
pub mod engine;

// 数据库基础设施 (连接初始化/PRAGMA/Schema 统一)
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{RoomKind, RoomSize, Shift};

// 领域实体
pub use domain::{
    AllocationRecord, Course, ForecastConfig, ForecastRequest, ForecastResult, ProjectedSection,
    Room, RoomAllocationSummary, RoomConfiguration, SavedForecast, Section, SectionInput,
    ShortfallEntry, SizeCapacities, UnallocatedSection,
};

// 引擎
pub use engine::{
    AllocationStrategy, EnrollmentProjector, ForecastDataSource, ForecastEngine, ForecastError,
    GreedyFirstFitStrategy, SectionPrioritizer,
};

// API
pub use api::{ApiError, ConfigApi, CourseApi, ForecastApi, RoomApi, SectionApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "教室分配预测系统";
