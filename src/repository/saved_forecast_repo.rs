// ==========================================
// 教室分配预测系统 - 预测归档仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 说明: 预测结果以不透明 JSON 文本存储, 按名称归档
// ==========================================

use crate::domain::forecast::SavedForecast;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::{now_timestamp, parse_timestamp};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// SavedForecastRepository - 预测归档仓储
// ==========================================

/// 预测归档仓储
/// 职责: 管理 saved_forecasts 表 (保存/列表/按ID查询)
pub struct SavedForecastRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SavedForecastRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row) -> rusqlite::Result<SavedForecast> {
        let payload_raw: String = row.get(2)?;
        let payload = serde_json::from_str(&payload_raw).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                2,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })?;
        Ok(SavedForecast {
            id: row.get(0)?,
            name: row.get(1)?,
            payload,
            created_at: parse_timestamp(&row.get::<_, String>(3)?),
        })
    }

    /// 保存一条预测归档
    pub fn create(&self, name: &str, payload: &serde_json::Value) -> RepositoryResult<SavedForecast> {
        let payload_raw = serde_json::to_string(payload)?;
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT INTO saved_forecasts (name, payload, created_at)
            VALUES (?1, ?2, ?3)
            "#,
            params![name, payload_raw, now_timestamp()],
        )?;

        let id = conn.last_insert_rowid();
        drop(conn);
        self.find_by_id(id)?.ok_or(RepositoryError::NotFound {
            entity: "SavedForecast".to_string(),
            id: id.to_string(),
        })
    }

    /// 按ID查询归档
    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<SavedForecast>> {
        let conn = self.get_conn()?;
        let forecast = conn
            .query_row(
                "SELECT id, name, payload, created_at FROM saved_forecasts WHERE id = ?1",
                params![id],
                Self::map_row,
            )
            .optional()?;
        Ok(forecast)
    }

    /// 查询全部归档 (新的在前)
    pub fn find_all(&self) -> RepositoryResult<Vec<SavedForecast>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, payload, created_at FROM saved_forecasts ORDER BY id DESC",
        )?;
        let forecasts = stmt
            .query_map([], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(forecasts)
    }
}
