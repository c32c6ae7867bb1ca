// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的数据库初始化、测试数据构造等功能
// ==========================================

use chrono::Utc;
use classroom_aps::db;
use classroom_aps::domain::room::RoomConfiguration;
use classroom_aps::domain::section::SectionInput;
use classroom_aps::domain::types::{RoomKind, RoomSize, Shift};
use rusqlite::Connection;
use std::error::Error;
use tempfile::NamedTempFile;

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件 (需要保持存活)
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().unwrap().to_string();

    let conn = Connection::open(&db_path)?;
    db::configure_sqlite_connection(&conn)?;
    db::init_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// 创建测试用班级输入
pub fn make_section_input(
    id: i64,
    student_count: i32,
    current_period: i32,
    duration_terms: i32,
) -> SectionInput {
    SectionInput {
        id,
        course_id: 1,
        shift: Shift::Morning,
        current_period,
        student_count,
        course_name: format!("课程{}", id),
        course_duration_terms: duration_terms,
    }
}

/// 创建测试用教室配置 (不经数据库, 供引擎/策略测试直接使用)
pub fn make_room_config(id: i64, size: RoomSize) -> RoomConfiguration {
    RoomConfiguration {
        id,
        room_id: id,
        year: 2026,
        term: 1,
        size,
        kind: RoomKind::Classroom,
        room_number: format!("{:03}", id),
        room_block: "A".to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
