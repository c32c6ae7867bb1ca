// ==========================================
// 教室分配预测系统 - 引擎数据源适配
// ==========================================
// 职责: 将仓储层适配为 ForecastDataSource, 供预测引擎消费
// 说明: 常规预测只取 classroom 类型配置, 实验室在查询侧过滤
// ==========================================

use crate::domain::forecast::ForecastConfig;
use crate::domain::room::RoomConfiguration;
use crate::domain::types::RoomKind;
use crate::engine::forecast::ForecastDataSource;
use crate::repository::error::RepositoryError;
use crate::repository::{ForecastConfigRepository, RoomConfigRepository};
use async_trait::async_trait;
use std::sync::Arc;

// ==========================================
// ForecastRepositories - 仓储数据源
// ==========================================

/// 基于 SQLite 仓储的预测数据源
pub struct ForecastRepositories {
    config_repo: Arc<ForecastConfigRepository>,
    room_config_repo: Arc<RoomConfigRepository>,
}

impl ForecastRepositories {
    pub fn new(
        config_repo: Arc<ForecastConfigRepository>,
        room_config_repo: Arc<RoomConfigRepository>,
    ) -> Self {
        Self {
            config_repo,
            room_config_repo,
        }
    }
}

#[async_trait]
impl ForecastDataSource for ForecastRepositories {
    async fn forecast_config(&self) -> Result<Option<ForecastConfig>, RepositoryError> {
        self.config_repo.find()
    }

    async fn classroom_configurations(
        &self,
        year: i32,
        term: i32,
    ) -> Result<Vec<RoomConfiguration>, RepositoryError> {
        self.room_config_repo
            .find_for_term(year, term, RoomKind::Classroom)
    }
}
