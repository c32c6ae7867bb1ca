// ==========================================
// 教室分配预测系统 - 预测配置 API
// ==========================================
// 职责: 预测配置的查询/创建/更新与字段校验
// 约束: 全局单例 - 系统内最多一条配置, 创建后只允许原地更新
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::forecast::ForecastConfig;
use crate::repository::ForecastConfigRepository;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

// ===== 字段上限 (沿用历史系统的校验边界) =====
const MAX_SMALL_CAPACITY: i32 = 100;
const MAX_MEDIUM_CAPACITY: i32 = 150;
const MAX_LARGE_CAPACITY: i32 = 200;
const MAX_AREA_PER_STUDENT_M2: f64 = 10.0;

/// 创建配置的请求负载
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateForecastConfig {
    pub small_capacity: i32,
    pub medium_capacity: i32,
    pub large_capacity: i32,
    pub area_per_student_m2: f64,
    pub dropout_rate_percent: f64,
}

/// 更新配置的请求负载 (未提供的字段保持原值)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateForecastConfig {
    pub small_capacity: Option<i32>,
    pub medium_capacity: Option<i32>,
    pub large_capacity: Option<i32>,
    pub area_per_student_m2: Option<f64>,
    pub dropout_rate_percent: Option<f64>,
}

// ==========================================
// ConfigApi - 预测配置 API
// ==========================================
pub struct ConfigApi {
    config_repo: Arc<ForecastConfigRepository>,
}

impl ConfigApi {
    pub fn new(config_repo: Arc<ForecastConfigRepository>) -> Self {
        Self { config_repo }
    }

    /// 查询当前生效配置
    pub fn get_config(&self) -> ApiResult<Option<ForecastConfig>> {
        Ok(self.config_repo.find()?)
    }

    /// 创建配置
    ///
    /// # 错误
    /// - BusinessRuleViolation: 已存在配置 (单例约束)
    /// - InvalidInput: 字段校验失败
    pub fn create_config(&self, data: CreateForecastConfig) -> ApiResult<ForecastConfig> {
        if self.config_repo.count()? > 0 {
            return Err(ApiError::BusinessRuleViolation(
                "预测配置已存在, 系统只允许一条配置".to_string(),
            ));
        }

        Self::validate(
            data.small_capacity,
            data.medium_capacity,
            data.large_capacity,
            data.area_per_student_m2,
            data.dropout_rate_percent,
        )?;

        let config = self.config_repo.create(
            data.small_capacity,
            data.medium_capacity,
            data.large_capacity,
            data.area_per_student_m2,
            data.dropout_rate_percent,
        )?;

        info!(config_id = config.id, "预测配置已创建");
        Ok(config)
    }

    /// 原地更新配置 (部分字段)
    ///
    /// # 错误
    /// - NotFound: 配置不存在
    /// - InvalidInput: 合并后字段校验失败
    pub fn update_config(&self, data: UpdateForecastConfig) -> ApiResult<ForecastConfig> {
        let current = self
            .config_repo
            .find()?
            .ok_or_else(|| ApiError::NotFound("ForecastConfig".to_string()))?;

        let small = data.small_capacity.unwrap_or(current.small_capacity);
        let medium = data.medium_capacity.unwrap_or(current.medium_capacity);
        let large = data.large_capacity.unwrap_or(current.large_capacity);
        let area = data.area_per_student_m2.unwrap_or(current.area_per_student_m2);
        let dropout = data
            .dropout_rate_percent
            .unwrap_or(current.dropout_rate_percent);

        Self::validate(small, medium, large, area, dropout)?;

        let config = self
            .config_repo
            .update(current.id, small, medium, large, area, dropout)?;

        info!(config_id = config.id, "预测配置已更新");
        Ok(config)
    }

    /// 字段校验
    ///
    /// 规则:
    /// - 三档容量为正整数且严格递增, 各有规格上限
    /// - 人均面积在 (0, 10] 平方米
    /// - 流失率在 [0, 100]
    fn validate(
        small: i32,
        medium: i32,
        large: i32,
        area: f64,
        dropout: f64,
    ) -> ApiResult<()> {
        if small <= 0 || medium <= 0 || large <= 0 {
            return Err(ApiError::InvalidInput(
                "教室容量必须为正整数".to_string(),
            ));
        }
        if small > MAX_SMALL_CAPACITY {
            return Err(ApiError::InvalidInput(format!(
                "小教室容量不得超过 {} 人",
                MAX_SMALL_CAPACITY
            )));
        }
        if medium > MAX_MEDIUM_CAPACITY {
            return Err(ApiError::InvalidInput(format!(
                "中教室容量不得超过 {} 人",
                MAX_MEDIUM_CAPACITY
            )));
        }
        if large > MAX_LARGE_CAPACITY {
            return Err(ApiError::InvalidInput(format!(
                "大教室容量不得超过 {} 人",
                MAX_LARGE_CAPACITY
            )));
        }
        if !(small < medium && medium < large) {
            return Err(ApiError::InvalidInput(
                "教室容量必须严格递增: 小 < 中 < 大".to_string(),
            ));
        }
        if area <= 0.0 || area > MAX_AREA_PER_STUDENT_M2 {
            return Err(ApiError::InvalidInput(format!(
                "人均面积必须在 0.01 至 {:.2} 平方米之间",
                MAX_AREA_PER_STUDENT_M2
            )));
        }
        if !(0.0..=100.0).contains(&dropout) {
            return Err(ApiError::InvalidInput(
                "流失率必须在 0 至 100 之间".to_string(),
            ));
        }
        Ok(())
    }
}
