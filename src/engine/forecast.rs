// ==========================================
// 教室分配预测系统 - 预测引擎编排器
// ==========================================
// 用途: 协调投影 → 排序 → 分配三个阶段, 组装预测结果
// 红线: Engine 不拼 SQL; 算法本体为同步纯内存计算,
//       外部数据统一经 ForecastDataSource 预先解析
// ==========================================

use crate::domain::forecast::{ForecastConfig, ForecastRequest, ForecastResult};
use crate::domain::room::RoomConfiguration;
use crate::engine::prioritizer::SectionPrioritizer;
use crate::engine::projector::EnrollmentProjector;
use crate::engine::strategy::{AllocationStrategy, GreedyFirstFitStrategy};
use crate::repository::error::RepositoryError;
use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

// ==========================================
// ForecastError - 预测引擎错误类型
// ==========================================

/// 预测引擎错误
///
/// "无可用教室"不是错误, 属于正常的预测输出
#[derive(Error, Debug)]
pub enum ForecastError {
    /// 预测配置不存在, 中止运行
    #[error("预测配置不存在, 请先创建配置")]
    NotConfigured,

    /// 结构性非法输入 (调用方数据完整性缺陷, 快速失败)
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

// ==========================================
// ForecastDataSource - 外部数据接口
// ==========================================

/// 预测引擎的外部数据接口
///
/// 配置与教室配置由持久化协作方提供, 引擎自身不做 I/O
#[async_trait]
pub trait ForecastDataSource: Send + Sync {
    /// 当前生效的预测配置 (不存在返回 None)
    async fn forecast_config(&self) -> Result<Option<ForecastConfig>, RepositoryError>;

    /// 某学年/学期的常规教室配置 (已过滤实验室)
    async fn classroom_configurations(
        &self,
        year: i32,
        term: i32,
    ) -> Result<Vec<RoomConfiguration>, RepositoryError>;
}

// ==========================================
// ForecastEngine - 预测引擎
// ==========================================

pub struct ForecastEngine<D>
where
    D: ForecastDataSource,
{
    source: D,
    projector: EnrollmentProjector,
    prioritizer: SectionPrioritizer,
    strategy: Box<dyn AllocationStrategy>,
}

impl<D> ForecastEngine<D>
where
    D: ForecastDataSource,
{
    /// 创建预测引擎 (默认首次适配贪心策略)
    pub fn new(source: D) -> Self {
        Self::with_strategy(source, Box::new(GreedyFirstFitStrategy::new()))
    }

    /// 创建预测引擎并指定分配策略
    pub fn with_strategy(source: D, strategy: Box<dyn AllocationStrategy>) -> Self {
        Self {
            source,
            projector: EnrollmentProjector::new(),
            prioritizer: SectionPrioritizer::new(),
            strategy,
        }
    }

    /// 校验请求负载 (字段缺失/非法为调用方缺陷, 快速失败)
    fn validate(request: &ForecastRequest) -> Result<(), ForecastError> {
        if !(1..=2).contains(&request.term) {
            return Err(ForecastError::InvalidInput(format!(
                "学期必须为 1 或 2, 实际为 {}",
                request.term
            )));
        }
        for section in &request.sections {
            if section.student_count <= 0 {
                return Err(ForecastError::InvalidInput(format!(
                    "班级 {} 在读人数必须为正数",
                    section.id
                )));
            }
            if section.current_period < 1 {
                return Err(ForecastError::InvalidInput(format!(
                    "班级 {} 当前学期序号必须从 1 开始",
                    section.id
                )));
            }
            if section.course_duration_terms < 1 {
                return Err(ForecastError::InvalidInput(format!(
                    "班级 {} 缺少有效的课程学制",
                    section.id
                )));
            }
        }
        Ok(())
    }

    /// 生成预测
    ///
    /// 流程: 校验 → 取配置 (缺失即中止) → 取教室池 →
    ///       投影 → 排序 → 分配 → 组装结果
    ///
    /// 幂等: 相同输入 (含教室池顺序) 产出相同的分配/缺口
    pub async fn generate(&self, request: &ForecastRequest) -> Result<ForecastResult, ForecastError> {
        Self::validate(request)?;

        // ==========================================
        // 步骤1: 预测配置 (全局单例, 缺失即中止)
        // ==========================================
        let config = self
            .source
            .forecast_config()
            .await?
            .ok_or(ForecastError::NotConfigured)?;

        // ==========================================
        // 步骤2: 本学期常规教室池
        // ==========================================
        let rooms = self
            .source
            .classroom_configurations(request.year, request.term)
            .await?;

        info!(
            year = request.year,
            term = request.term,
            sections_count = request.sections.len(),
            rooms_count = rooms.len(),
            "开始执行教室分配预测"
        );

        // ==========================================
        // 步骤3: 人数投影, 剔除毕业班
        // ==========================================
        debug!("步骤3: 执行人数投影");
        let projected = self
            .projector
            .project(&request.sections, config.dropout_rate_percent);
        info!(
            projected_count = projected.len(),
            excluded_count = request.sections.len() - projected.len(),
            "人数投影完成"
        );

        // ==========================================
        // 步骤4: 大班优先排序
        // ==========================================
        debug!("步骤4: 执行优先级排序");
        let sorted = self.prioritizer.sort(projected);

        // ==========================================
        // 步骤5: 教室匹配与缺口统计
        // ==========================================
        debug!("步骤5: 执行教室匹配");
        let outcome =
            self.strategy
                .allocate(sorted, rooms, &config.capacities(), config.area_per_student_m2);

        info!(
            allocated_count = outcome.allocation.iter().filter(|r| r.room.is_some()).count(),
            unallocated_count = outcome.unallocated.len(),
            shortfall_kinds = outcome.additional_rooms_needed.len(),
            "教室分配预测完成"
        );

        // ==========================================
        // 步骤6: 组装预测结果
        // ==========================================
        Ok(ForecastResult {
            run_id: Uuid::new_v4().to_string(),
            year: request.year,
            term: request.term,
            allocation: outcome.allocation,
            unallocated: outcome.unallocated,
            additional_rooms_needed: outcome.additional_rooms_needed,
            room_summary: outcome.room_summary,
            config,
            generated_at: Utc::now(),
        })
    }
}
