// ==========================================
// 教室分配预测系统 - 课程数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::course::Course;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::{now_timestamp, parse_timestamp};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// CourseRepository - 课程仓储
// ==========================================

/// 课程仓储
/// 职责: 管理 courses 表的 CRUD 操作
pub struct CourseRepository {
    conn: Arc<Mutex<Connection>>,
}

impl CourseRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row) -> rusqlite::Result<Course> {
        Ok(Course {
            id: row.get(0)?,
            name: row.get(1)?,
            duration_terms: row.get(2)?,
            dropout_rate_percent: row.get(3)?,
            created_at: parse_timestamp(&row.get::<_, String>(4)?),
            updated_at: parse_timestamp(&row.get::<_, String>(5)?),
        })
    }

    /// 创建课程
    pub fn create(
        &self,
        name: &str,
        duration_terms: i32,
        dropout_rate_percent: f64,
    ) -> RepositoryResult<Course> {
        let conn = self.get_conn()?;
        let now = now_timestamp();

        conn.execute(
            r#"
            INSERT INTO courses (name, duration_terms, dropout_rate_percent, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)
            "#,
            params![name, duration_terms, dropout_rate_percent, now],
        )?;

        let id = conn.last_insert_rowid();
        drop(conn);
        self.find_by_id(id)?.ok_or(RepositoryError::NotFound {
            entity: "Course".to_string(),
            id: id.to_string(),
        })
    }

    /// 按ID查询课程
    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Course>> {
        let conn = self.get_conn()?;
        let course = conn
            .query_row(
                r#"
                SELECT id, name, duration_terms, dropout_rate_percent, created_at, updated_at
                FROM courses WHERE id = ?1
                "#,
                params![id],
                Self::map_row,
            )
            .optional()?;
        Ok(course)
    }

    /// 查询全部课程
    pub fn find_all(&self) -> RepositoryResult<Vec<Course>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, name, duration_terms, dropout_rate_percent, created_at, updated_at
            FROM courses ORDER BY id
            "#,
        )?;
        let courses = stmt
            .query_map([], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(courses)
    }

    /// 更新课程
    pub fn update(
        &self,
        id: i64,
        name: &str,
        duration_terms: i32,
        dropout_rate_percent: f64,
    ) -> RepositoryResult<Course> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            UPDATE courses
            SET name = ?1, duration_terms = ?2, dropout_rate_percent = ?3, updated_at = ?4
            WHERE id = ?5
            "#,
            params![name, duration_terms, dropout_rate_percent, now_timestamp(), id],
        )?;
        drop(conn);

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Course".to_string(),
                id: id.to_string(),
            });
        }
        self.find_by_id(id)?.ok_or(RepositoryError::NotFound {
            entity: "Course".to_string(),
            id: id.to_string(),
        })
    }

    /// 删除课程
    pub fn delete(&self, id: i64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM courses WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Course".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }
}
