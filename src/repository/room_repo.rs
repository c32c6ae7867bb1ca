// ==========================================
// 教室分配预测系统 - 教室数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::room::Room;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::{now_timestamp, parse_timestamp};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// RoomRepository - 教室仓储
// ==========================================

/// 教室仓储
/// 职责: 管理 rooms 表的 CRUD 操作
pub struct RoomRepository {
    conn: Arc<Mutex<Connection>>,
}

impl RoomRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row) -> rusqlite::Result<Room> {
        Ok(Room {
            id: row.get(0)?,
            number: row.get(1)?,
            block: row.get(2)?,
            created_at: parse_timestamp(&row.get::<_, String>(3)?),
            updated_at: parse_timestamp(&row.get::<_, String>(4)?),
        })
    }

    /// 创建教室
    pub fn create(&self, number: &str, block: &str) -> RepositoryResult<Room> {
        let conn = self.get_conn()?;
        let now = now_timestamp();

        conn.execute(
            r#"
            INSERT INTO rooms (number, block, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?3)
            "#,
            params![number, block, now],
        )?;

        let id = conn.last_insert_rowid();
        drop(conn);
        self.find_by_id(id)?.ok_or(RepositoryError::NotFound {
            entity: "Room".to_string(),
            id: id.to_string(),
        })
    }

    /// 按ID查询教室
    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Room>> {
        let conn = self.get_conn()?;
        let room = conn
            .query_row(
                "SELECT id, number, block, created_at, updated_at FROM rooms WHERE id = ?1",
                params![id],
                Self::map_row,
            )
            .optional()?;
        Ok(room)
    }

    /// 查询全部教室
    pub fn find_all(&self) -> RepositoryResult<Vec<Room>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, number, block, created_at, updated_at FROM rooms ORDER BY block, number",
        )?;
        let rooms = stmt
            .query_map([], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rooms)
    }

    /// 更新教室
    pub fn update(&self, id: i64, number: &str, block: &str) -> RepositoryResult<Room> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "UPDATE rooms SET number = ?1, block = ?2, updated_at = ?3 WHERE id = ?4",
            params![number, block, now_timestamp(), id],
        )?;
        drop(conn);

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Room".to_string(),
                id: id.to_string(),
            });
        }
        self.find_by_id(id)?.ok_or(RepositoryError::NotFound {
            entity: "Room".to_string(),
            id: id.to_string(),
        })
    }

    /// 删除教室
    pub fn delete(&self, id: i64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM rooms WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Room".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }
}
