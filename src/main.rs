// ==========================================
// 教室分配预测系统 - 主入口
// ==========================================
// 用法: classroom-aps <学年> <学期> [数据库路径]
// 行为: 从数据库读取该学年的班级, 生成本学期的教室
//       分配预测并以 JSON 输出到标准输出
// ==========================================

use classroom_aps::api::{ForecastApi, SectionApi};
use classroom_aps::db;
use classroom_aps::domain::forecast::ForecastRequest;
use classroom_aps::logging;
use classroom_aps::repository::{
    CourseRepository, ForecastConfigRepository, RoomConfigRepository, SavedForecastRepository,
    SectionRepository,
};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} v{}", classroom_aps::APP_NAME, classroom_aps::VERSION);
    tracing::info!("==================================================");

    let args: Vec<String> = std::env::args().collect();
    let (year, term) = match (
        args.get(1).and_then(|s| s.parse::<i32>().ok()),
        args.get(2).and_then(|s| s.parse::<i32>().ok()),
    ) {
        (Some(year), Some(term)) => (year, term),
        _ => {
            eprintln!("用法: classroom-aps <学年> <学期> [数据库路径]");
            return ExitCode::FAILURE;
        }
    };
    let db_path = args
        .get(3)
        .cloned()
        .unwrap_or_else(db::default_db_path);

    tracing::info!(db_path = %db_path, "使用数据库");

    let conn = match db::open_sqlite_connection(&db_path) {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!(error = %e, "数据库连接失败");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = db::init_schema(&conn) {
        tracing::error!(error = %e, "Schema 初始化失败");
        return ExitCode::FAILURE;
    }
    let conn = Arc::new(Mutex::new(conn));

    // 装配仓储与 API
    let course_repo = Arc::new(CourseRepository::from_connection(conn.clone()));
    let section_repo = Arc::new(SectionRepository::from_connection(conn.clone()));
    let config_repo = Arc::new(ForecastConfigRepository::from_connection(conn.clone()));
    let room_config_repo = Arc::new(RoomConfigRepository::from_connection(conn.clone()));
    let saved_repo = Arc::new(SavedForecastRepository::from_connection(conn.clone()));

    let section_api = SectionApi::new(section_repo, course_repo);
    let forecast_api = ForecastApi::new(config_repo, room_config_repo, saved_repo);

    let sections = match section_api.forecast_inputs(year) {
        Ok(sections) => sections,
        Err(e) => {
            tracing::error!(error = %e, "班级数据读取失败");
            return ExitCode::FAILURE;
        }
    };

    let request = ForecastRequest {
        year,
        term,
        sections,
    };

    match forecast_api.generate_forecast(&request).await {
        Ok(result) => {
            match serde_json::to_string_pretty(&result) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    tracing::error!(error = %e, "结果序列化失败");
                    return ExitCode::FAILURE;
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "预测生成失败");
            ExitCode::FAILURE
        }
    }
}
