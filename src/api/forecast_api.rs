// ==========================================
// 教室分配预测系统 - 预测 API
// ==========================================
// 职责: 预测生成、归档保存/查询、结果导出
// 说明: 算法流程在引擎层, 本层负责装配数据源与错误转换
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::forecast::{ForecastRequest, ForecastResult, SavedForecast};
use crate::engine::export::{self, SpreadsheetRow};
use crate::engine::forecast::ForecastEngine;
use crate::engine::repositories::ForecastRepositories;
use crate::engine::strategy::AllocationStrategy;
use crate::repository::{ForecastConfigRepository, RoomConfigRepository, SavedForecastRepository};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

// ==========================================
// ForecastApi - 预测 API
// ==========================================
pub struct ForecastApi {
    engine: ForecastEngine<ForecastRepositories>,
    saved_repo: Arc<SavedForecastRepository>,
}

impl ForecastApi {
    /// 创建预测API实例 (默认贪心策略)
    pub fn new(
        config_repo: Arc<ForecastConfigRepository>,
        room_config_repo: Arc<RoomConfigRepository>,
        saved_repo: Arc<SavedForecastRepository>,
    ) -> Self {
        let source = ForecastRepositories::new(config_repo, room_config_repo);
        Self {
            engine: ForecastEngine::new(source),
            saved_repo,
        }
    }

    /// 创建预测API实例并指定分配策略
    pub fn with_strategy(
        config_repo: Arc<ForecastConfigRepository>,
        room_config_repo: Arc<RoomConfigRepository>,
        saved_repo: Arc<SavedForecastRepository>,
        strategy: Box<dyn AllocationStrategy>,
    ) -> Self {
        let source = ForecastRepositories::new(config_repo, room_config_repo);
        Self {
            engine: ForecastEngine::with_strategy(source, strategy),
            saved_repo,
        }
    }

    /// 生成预测
    ///
    /// # 错误
    /// - NotConfigured: 预测配置不存在
    /// - InvalidInput: 请求负载结构性非法
    pub async fn generate_forecast(&self, request: &ForecastRequest) -> ApiResult<ForecastResult> {
        Ok(self.engine.generate(request).await?)
    }

    /// 以名称归档预测结果
    pub fn save_forecast(&self, name: &str, result: &ForecastResult) -> ApiResult<SavedForecast> {
        if name.trim().is_empty() {
            return Err(ApiError::InvalidInput("归档名称不能为空".to_string()));
        }
        let payload = serde_json::to_value(result)
            .map_err(|e| ApiError::InternalError(format!("预测结果序列化失败: {}", e)))?;
        let saved = self.saved_repo.create(name.trim(), &payload)?;
        info!(saved_id = saved.id, name = %saved.name, "预测结果已归档");
        Ok(saved)
    }

    /// 查询全部归档
    pub fn list_forecasts(&self) -> ApiResult<Vec<SavedForecast>> {
        Ok(self.saved_repo.find_all()?)
    }

    /// 按ID查询归档
    ///
    /// # 错误
    /// - NotFound: 归档不存在 (结构化结果, 区别于计算错误)
    pub fn get_forecast(&self, id: i64) -> ApiResult<SavedForecast> {
        self.saved_repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound(format!("SavedForecast (id={})", id)))
    }

    /// 预测结果 → 表格行 (供导出协作方消费)
    pub fn export_rows(&self, result: &ForecastResult) -> Vec<SpreadsheetRow> {
        export::to_spreadsheet_rows(result)
    }

    /// 预测结果写出为 CSV 文件
    pub fn export_csv<P: AsRef<Path>>(&self, result: &ForecastResult, path: P) -> ApiResult<()> {
        export::write_csv(result, path).map_err(|e| ApiError::ExportError(e.to_string()))
    }
}
