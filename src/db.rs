// ==========================================
// 教室分配预测系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 统一 busy_timeout, 减少并发写入时的偶发 busy 错误
// - 提供幂等的 schema 初始化入口
// ==========================================

use rusqlite::Connection;
use std::path::PathBuf;
use std::time::Duration;

/// 默认 busy_timeout (毫秒)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明:
/// - foreign_keys 需要"每个连接"单独开启
/// - busy_timeout 需要"每个连接"单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 默认数据库路径 (数据目录下, 无法解析时退回当前目录)
pub fn default_db_path() -> String {
    let base: PathBuf = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("classroom-aps")
        .join("classroom_aps.db")
        .to_string_lossy()
        .to_string()
}

/// 初始化数据库 schema (幂等)
///
/// 表清单:
/// - courses / rooms / sections: 主数据
/// - room_configurations: 教室学期配置 (room+year+term 唯一)
/// - forecast_config: 预测配置 (全局单例, 单例约束在 API 层检查)
/// - saved_forecasts: 已保存的预测结果 (JSON 负载)
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS courses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            duration_terms INTEGER NOT NULL,
            dropout_rate_percent REAL NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS rooms (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            number TEXT NOT NULL,
            block TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            UNIQUE(number, block)
        );

        CREATE TABLE IF NOT EXISTS sections (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            course_id INTEGER NOT NULL REFERENCES courses(id),
            shift TEXT NOT NULL,
            current_period INTEGER NOT NULL,
            student_count INTEGER NOT NULL,
            year INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS room_configurations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            room_id INTEGER NOT NULL REFERENCES rooms(id),
            year INTEGER NOT NULL,
            term INTEGER NOT NULL,
            size TEXT NOT NULL,
            kind TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            UNIQUE(room_id, year, term)
        );

        CREATE TABLE IF NOT EXISTS forecast_config (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            small_capacity INTEGER NOT NULL,
            medium_capacity INTEGER NOT NULL,
            large_capacity INTEGER NOT NULL,
            area_per_student_m2 REAL NOT NULL,
            dropout_rate_percent REAL NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS saved_forecasts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            payload TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}
