// ==========================================
// 教室分配预测系统 - 班级数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::section::{Section, SectionInput};
use crate::domain::types::Shift;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::{now_timestamp, parse_timestamp};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// SectionRepository - 班级仓储
// ==========================================

/// 班级仓储
/// 职责: 管理 sections 表的 CRUD, 并提供预测输入查询 (JOIN 课程学制)
pub struct SectionRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SectionRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn parse_shift(raw: &str, col: usize) -> rusqlite::Result<Shift> {
        Shift::from_str(raw).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                col,
                rusqlite::types::Type::Text,
                Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, e)),
            )
        })
    }

    fn map_row(row: &Row) -> rusqlite::Result<Section> {
        let shift_raw: String = row.get(2)?;
        Ok(Section {
            id: row.get(0)?,
            course_id: row.get(1)?,
            shift: Self::parse_shift(&shift_raw, 2)?,
            current_period: row.get(3)?,
            student_count: row.get(4)?,
            year: row.get(5)?,
            created_at: parse_timestamp(&row.get::<_, String>(6)?),
            updated_at: parse_timestamp(&row.get::<_, String>(7)?),
        })
    }

    /// 创建班级
    pub fn create(
        &self,
        course_id: i64,
        shift: Shift,
        current_period: i32,
        student_count: i32,
        year: i32,
    ) -> RepositoryResult<Section> {
        let conn = self.get_conn()?;
        let now = now_timestamp();

        conn.execute(
            r#"
            INSERT INTO sections (course_id, shift, current_period, student_count, year, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
            "#,
            params![course_id, shift.as_str(), current_period, student_count, year, now],
        )?;

        let id = conn.last_insert_rowid();
        drop(conn);
        self.find_by_id(id)?.ok_or(RepositoryError::NotFound {
            entity: "Section".to_string(),
            id: id.to_string(),
        })
    }

    /// 按ID查询班级
    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Section>> {
        let conn = self.get_conn()?;
        let section = conn
            .query_row(
                r#"
                SELECT id, course_id, shift, current_period, student_count, year, created_at, updated_at
                FROM sections WHERE id = ?1
                "#,
                params![id],
                Self::map_row,
            )
            .optional()?;
        Ok(section)
    }

    /// 查询全部班级
    pub fn find_all(&self) -> RepositoryResult<Vec<Section>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, course_id, shift, current_period, student_count, year, created_at, updated_at
            FROM sections ORDER BY id
            "#,
        )?;
        let sections = stmt
            .query_map([], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(sections)
    }

    /// 查询某学年的预测输入 (携带课程名称与学制)
    pub fn find_for_forecast(&self, year: i32) -> RepositoryResult<Vec<SectionInput>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT s.id, s.course_id, s.shift, s.current_period, s.student_count,
                   c.name, c.duration_terms
            FROM sections s
            JOIN courses c ON c.id = s.course_id
            WHERE s.year = ?1
            ORDER BY s.id
            "#,
        )?;
        let inputs = stmt
            .query_map(params![year], |row| {
                let shift_raw: String = row.get(2)?;
                Ok(SectionInput {
                    id: row.get(0)?,
                    course_id: row.get(1)?,
                    shift: Self::parse_shift(&shift_raw, 2)?,
                    current_period: row.get(3)?,
                    student_count: row.get(4)?,
                    course_name: row.get(5)?,
                    course_duration_terms: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(inputs)
    }

    /// 更新班级
    pub fn update(
        &self,
        id: i64,
        shift: Shift,
        current_period: i32,
        student_count: i32,
        year: i32,
    ) -> RepositoryResult<Section> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            UPDATE sections
            SET shift = ?1, current_period = ?2, student_count = ?3, year = ?4, updated_at = ?5
            WHERE id = ?6
            "#,
            params![shift.as_str(), current_period, student_count, year, now_timestamp(), id],
        )?;
        drop(conn);

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Section".to_string(),
                id: id.to_string(),
            });
        }
        self.find_by_id(id)?.ok_or(RepositoryError::NotFound {
            entity: "Section".to_string(),
            id: id.to_string(),
        })
    }

    /// 删除班级
    pub fn delete(&self, id: i64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM sections WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Section".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }
}
