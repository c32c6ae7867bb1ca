// ==========================================
// 教室分配预测系统 - 预测配置仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 说明: 单例约束 (最多一条配置) 由 API 层检查, 本层只提供计数
// ==========================================

use crate::domain::forecast::ForecastConfig;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::{now_timestamp, parse_timestamp};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// ForecastConfigRepository - 预测配置仓储
// ==========================================

/// 预测配置仓储
/// 职责: 管理 forecast_config 表 (全局单例记录)
pub struct ForecastConfigRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ForecastConfigRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row) -> rusqlite::Result<ForecastConfig> {
        Ok(ForecastConfig {
            id: row.get(0)?,
            small_capacity: row.get(1)?,
            medium_capacity: row.get(2)?,
            large_capacity: row.get(3)?,
            area_per_student_m2: row.get(4)?,
            dropout_rate_percent: row.get(5)?,
            created_at: parse_timestamp(&row.get::<_, String>(6)?),
            updated_at: parse_timestamp(&row.get::<_, String>(7)?),
        })
    }

    /// 查询当前生效配置 (单例, 取最早创建的一条)
    pub fn find(&self) -> RepositoryResult<Option<ForecastConfig>> {
        let conn = self.get_conn()?;
        let config = conn
            .query_row(
                r#"
                SELECT id, small_capacity, medium_capacity, large_capacity,
                       area_per_student_m2, dropout_rate_percent, created_at, updated_at
                FROM forecast_config ORDER BY id LIMIT 1
                "#,
                [],
                Self::map_row,
            )
            .optional()?;
        Ok(config)
    }

    /// 配置记录数
    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM forecast_config", [], |row| {
            row.get(0)
        })?;
        Ok(count)
    }

    /// 创建配置
    pub fn create(
        &self,
        small_capacity: i32,
        medium_capacity: i32,
        large_capacity: i32,
        area_per_student_m2: f64,
        dropout_rate_percent: f64,
    ) -> RepositoryResult<ForecastConfig> {
        let conn = self.get_conn()?;
        let now = now_timestamp();

        conn.execute(
            r#"
            INSERT INTO forecast_config
                (small_capacity, medium_capacity, large_capacity,
                 area_per_student_m2, dropout_rate_percent, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
            "#,
            params![
                small_capacity,
                medium_capacity,
                large_capacity,
                area_per_student_m2,
                dropout_rate_percent,
                now
            ],
        )?;
        drop(conn);

        self.find()?.ok_or(RepositoryError::InternalError(
            "配置创建后读取失败".to_string(),
        ))
    }

    /// 原地更新配置
    pub fn update(
        &self,
        id: i64,
        small_capacity: i32,
        medium_capacity: i32,
        large_capacity: i32,
        area_per_student_m2: f64,
        dropout_rate_percent: f64,
    ) -> RepositoryResult<ForecastConfig> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            UPDATE forecast_config
            SET small_capacity = ?1, medium_capacity = ?2, large_capacity = ?3,
                area_per_student_m2 = ?4, dropout_rate_percent = ?5, updated_at = ?6
            WHERE id = ?7
            "#,
            params![
                small_capacity,
                medium_capacity,
                large_capacity,
                area_per_student_m2,
                dropout_rate_percent,
                now_timestamp(),
                id
            ],
        )?;
        drop(conn);

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "ForecastConfig".to_string(),
                id: id.to_string(),
            });
        }
        self.find()?.ok_or(RepositoryError::NotFound {
            entity: "ForecastConfig".to_string(),
            id: id.to_string(),
        })
    }
}
