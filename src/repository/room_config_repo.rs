// ==========================================
// 教室分配预测系统 - 教室学期配置仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 说明: 查询统一 JOIN rooms, 填充教室编号/楼栋
// ==========================================

use crate::domain::room::RoomConfiguration;
use crate::domain::types::{RoomKind, RoomSize};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::{now_timestamp, parse_timestamp};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};

/// 学期内按规格统计的配置数量
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeStatistics {
    pub size: RoomSize,
    pub quantity: i64,
}

// ==========================================
// RoomConfigRepository - 教室学期配置仓储
// ==========================================

/// 教室学期配置仓储
/// 职责: 管理 room_configurations 表的 CRUD 与学期查询
pub struct RoomConfigRepository {
    conn: Arc<Mutex<Connection>>,
}

impl RoomConfigRepository {
    const SELECT_BASE: &'static str = r#"
        SELECT c.id, c.room_id, c.year, c.term, c.size, c.kind,
               r.number, r.block, c.created_at, c.updated_at
        FROM room_configurations c
        JOIN rooms r ON r.id = c.room_id
    "#;

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row) -> rusqlite::Result<RoomConfiguration> {
        let size_raw: String = row.get(4)?;
        let kind_raw: String = row.get(5)?;
        Ok(RoomConfiguration {
            id: row.get(0)?,
            room_id: row.get(1)?,
            year: row.get(2)?,
            term: row.get(3)?,
            // 存储值非法视为数据损坏, 映射为类型错误由上层处理
            size: RoomSize::from_str(&size_raw).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    4,
                    rusqlite::types::Type::Text,
                    Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, e)),
                )
            })?,
            kind: RoomKind::from_str(&kind_raw).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    5,
                    rusqlite::types::Type::Text,
                    Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, e)),
                )
            })?,
            room_number: row.get(6)?,
            room_block: row.get(7)?,
            created_at: parse_timestamp(&row.get::<_, String>(8)?),
            updated_at: parse_timestamp(&row.get::<_, String>(9)?),
        })
    }

    /// 创建教室学期配置
    pub fn create(
        &self,
        room_id: i64,
        year: i32,
        term: i32,
        size: RoomSize,
        kind: RoomKind,
    ) -> RepositoryResult<RoomConfiguration> {
        let conn = self.get_conn()?;
        let now = now_timestamp();

        conn.execute(
            r#"
            INSERT INTO room_configurations (room_id, year, term, size, kind, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
            "#,
            params![room_id, year, term, size.as_str(), kind.as_str(), now],
        )?;

        let id = conn.last_insert_rowid();
        drop(conn);
        self.find_by_id(id)?.ok_or(RepositoryError::NotFound {
            entity: "RoomConfiguration".to_string(),
            id: id.to_string(),
        })
    }

    /// 按ID查询配置
    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<RoomConfiguration>> {
        let conn = self.get_conn()?;
        let sql = format!("{} WHERE c.id = ?1", Self::SELECT_BASE);
        let config = conn
            .query_row(&sql, params![id], Self::map_row)
            .optional()?;
        Ok(config)
    }

    /// 查询全部配置
    pub fn find_all(&self) -> RepositoryResult<Vec<RoomConfiguration>> {
        let conn = self.get_conn()?;
        let sql = format!("{} ORDER BY c.id", Self::SELECT_BASE);
        let mut stmt = conn.prepare(&sql)?;
        let configs = stmt
            .query_map([], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(configs)
    }

    /// 查询某学年/学期内指定类型的教室配置
    ///
    /// 排序: 规格从大到小, 同规格按ID (预测的教室池扫描顺序即此顺序)
    pub fn find_for_term(
        &self,
        year: i32,
        term: i32,
        kind: RoomKind,
    ) -> RepositoryResult<Vec<RoomConfiguration>> {
        let conn = self.get_conn()?;
        let sql = format!(
            r#"{}
            WHERE c.year = ?1 AND c.term = ?2 AND c.kind = ?3
            ORDER BY CASE c.size
                WHEN 'large' THEN 0
                WHEN 'medium' THEN 1
                ELSE 2
            END, c.id
            "#,
            Self::SELECT_BASE
        );
        let mut stmt = conn.prepare(&sql)?;
        let configs = stmt
            .query_map(params![year, term, kind.as_str()], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(configs)
    }

    /// 学期内按规格统计配置数量 (只返回存在的规格)
    pub fn size_statistics(&self, year: i32, term: i32) -> RepositoryResult<Vec<SizeStatistics>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT size, COUNT(*) FROM room_configurations
            WHERE year = ?1 AND term = ?2
            GROUP BY size
            "#,
        )?;
        let rows = stmt
            .query_map(params![year, term], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut stats = Vec::new();
        for (size_raw, quantity) in rows {
            let size = RoomSize::from_str(&size_raw)
                .map_err(RepositoryError::ValidationError)?;
            stats.push(SizeStatistics { size, quantity });
        }
        // 输出按规格从小到大排列
        stats.sort_by_key(|s| RoomSize::ALL.iter().position(|x| *x == s.size));
        Ok(stats)
    }

    /// 删除配置
    pub fn delete(&self, id: i64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "DELETE FROM room_configurations WHERE id = ?1",
            params![id],
        )?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "RoomConfiguration".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }
}
