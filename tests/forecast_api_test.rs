// ==========================================
// 预测 API 端到端测试
// ==========================================
// 职责: 验证 配置 → 建数据 → 生成预测 → 归档 → 导出 全链路
// ==========================================

mod test_helpers;

use classroom_aps::api::{
    ApiError, ConfigApi, CourseApi, CreateForecastConfig, ForecastApi, RoomApi, SectionApi,
    UpdateForecastConfig,
};
use classroom_aps::db;
use classroom_aps::domain::forecast::ForecastRequest;
use classroom_aps::domain::types::{RoomKind, RoomSize, Shift};
use classroom_aps::repository::{
    CourseRepository, ForecastConfigRepository, RoomConfigRepository, RoomRepository,
    SavedForecastRepository, SectionRepository,
};
use std::sync::{Arc, Mutex};
use test_helpers::create_test_db;

// ==========================================
// 测试环境装配
// ==========================================

struct TestApp {
    config_api: ConfigApi,
    course_api: CourseApi,
    room_api: RoomApi,
    section_api: SectionApi,
    forecast_api: ForecastApi,
}

fn build_app(db_path: &str) -> TestApp {
    let conn = Arc::new(Mutex::new(db::open_sqlite_connection(db_path).unwrap()));

    let course_repo = Arc::new(CourseRepository::from_connection(conn.clone()));
    let room_repo = Arc::new(RoomRepository::from_connection(conn.clone()));
    let room_config_repo = Arc::new(RoomConfigRepository::from_connection(conn.clone()));
    let section_repo = Arc::new(SectionRepository::from_connection(conn.clone()));
    let forecast_config_repo = Arc::new(ForecastConfigRepository::from_connection(conn.clone()));
    let saved_repo = Arc::new(SavedForecastRepository::from_connection(conn));

    TestApp {
        config_api: ConfigApi::new(forecast_config_repo.clone()),
        course_api: CourseApi::new(course_repo.clone()),
        room_api: RoomApi::new(room_repo, room_config_repo.clone()),
        section_api: SectionApi::new(section_repo, course_repo),
        forecast_api: ForecastApi::new(forecast_config_repo, room_config_repo, saved_repo),
    }
}

fn default_config() -> CreateForecastConfig {
    CreateForecastConfig {
        small_capacity: 30,
        medium_capacity: 50,
        large_capacity: 80,
        area_per_student_m2: 1.5,
        dropout_rate_percent: 10.0,
    }
}

// ==========================================
// 配置单例
// ==========================================

#[test]
fn test_config_singleton_enforced() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let app = build_app(&db_path);

    assert!(app.config_api.get_config().unwrap().is_none());
    app.config_api.create_config(default_config()).unwrap();

    // 第二条配置被拒绝
    let err = app.config_api.create_config(default_config()).unwrap_err();
    assert!(matches!(err, ApiError::BusinessRuleViolation(_)));

    // 原地部分更新
    let updated = app
        .config_api
        .update_config(UpdateForecastConfig {
            dropout_rate_percent: Some(20.0),
            ..Default::default()
        })
        .unwrap();
    assert!((updated.dropout_rate_percent - 20.0).abs() < f64::EPSILON);
    assert_eq!(updated.small_capacity, 30);
}

#[test]
fn test_config_validation() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let app = build_app(&db_path);

    // 容量不递增
    let mut bad = default_config();
    bad.medium_capacity = 20;
    assert!(matches!(
        app.config_api.create_config(bad).unwrap_err(),
        ApiError::InvalidInput(_)
    ));

    // 流失率超界
    let mut bad = default_config();
    bad.dropout_rate_percent = 150.0;
    assert!(matches!(
        app.config_api.create_config(bad).unwrap_err(),
        ApiError::InvalidInput(_)
    ));

    // 人均面积超上限
    let mut bad = default_config();
    bad.area_per_student_m2 = 11.0;
    assert!(matches!(
        app.config_api.create_config(bad).unwrap_err(),
        ApiError::InvalidInput(_)
    ));
}

// ==========================================
// 全链路
// ==========================================

#[tokio::test]
async fn test_full_forecast_flow() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let app = build_app(&db_path);

    // 1. 配置
    app.config_api.create_config(default_config()).unwrap();

    // 2. 主数据: 课程 / 教室 / 学期配置 / 班级
    let course = app.course_api.create_course("土木工程", 8, 0.0).unwrap();

    let room_a = app.room_api.create_room("101", "A").unwrap();
    let room_b = app.room_api.create_room("201", "B").unwrap();
    app.room_api
        .create_configuration(room_a.id, 2026, 1, RoomSize::Medium, RoomKind::Classroom)
        .unwrap();
    app.room_api
        .create_configuration(room_b.id, 2026, 1, RoomSize::Small, RoomKind::Classroom)
        .unwrap();

    app.section_api
        .create_section(course.id, Shift::Morning, 2, 40, 2026)
        .unwrap();
    app.section_api
        .create_section(course.id, Shift::Evening, 3, 28, 2026)
        .unwrap();
    app.section_api
        .create_section(course.id, Shift::Afternoon, 8, 35, 2026) // 毕业班
        .unwrap();

    // 3. 生成预测
    let request = ForecastRequest {
        year: 2026,
        term: 1,
        sections: app.section_api.forecast_inputs(2026).unwrap(),
    };
    let result = app.forecast_api.generate_forecast(&request).await.unwrap();

    // 毕业班剔除后剩2个班级, 全部可分配:
    // 40人 → 预测36 → 中教室; 28人 → 预测25 → 小教室
    assert_eq!(result.allocation.len(), 2);
    assert!(result.unallocated.is_empty());
    assert!(result.additional_rooms_needed.is_empty());
    assert_eq!(result.room_summary.len(), 2);

    // 4. 归档与查询
    let saved = app
        .forecast_api
        .save_forecast("2026-1 预测", &result)
        .unwrap();
    let fetched = app.forecast_api.get_forecast(saved.id).unwrap();
    assert_eq!(fetched.name, "2026-1 预测");
    assert_eq!(fetched.payload["year"], 2026);
    assert_eq!(app.forecast_api.list_forecasts().unwrap().len(), 1);

    // 不存在的归档 → NotFound
    assert!(matches!(
        app.forecast_api.get_forecast(saved.id + 99).unwrap_err(),
        ApiError::NotFound(_)
    ));

    // 5. 导出
    let rows = app.forecast_api.export_rows(&result);
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.room != "未分配"));

    let csv_file = tempfile::NamedTempFile::new().unwrap();
    app.forecast_api
        .export_csv(&result, csv_file.path())
        .unwrap();
    let content = std::fs::read_to_string(csv_file.path()).unwrap();
    assert!(content.contains("土木工程"));
    // 表头 + 2 行数据
    assert_eq!(content.lines().count(), 3);
}

#[tokio::test]
async fn test_forecast_without_config_is_structured_outcome() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let app = build_app(&db_path);

    let request = ForecastRequest {
        year: 2026,
        term: 1,
        sections: vec![],
    };
    let err = app.forecast_api.generate_forecast(&request).await.unwrap_err();
    assert!(matches!(err, ApiError::NotConfigured));
}

#[tokio::test]
async fn test_laboratory_rooms_excluded_from_forecast() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let app = build_app(&db_path);

    app.config_api.create_config(default_config()).unwrap();
    let course = app.course_api.create_course("化学", 8, 0.0).unwrap();

    let room = app.room_api.create_room("L01", "C").unwrap();
    app.room_api
        .create_configuration(room.id, 2026, 1, RoomSize::Large, RoomKind::Laboratory)
        .unwrap();

    app.section_api
        .create_section(course.id, Shift::Morning, 2, 40, 2026)
        .unwrap();

    let request = ForecastRequest {
        year: 2026,
        term: 1,
        sections: app.section_api.forecast_inputs(2026).unwrap(),
    };
    let result = app.forecast_api.generate_forecast(&request).await.unwrap();

    // 实验室不进教室池: 班级未分配, 汇总为空
    assert_eq!(result.unallocated.len(), 1);
    assert!(result.room_summary.is_empty());
}

#[test]
fn test_section_validation_against_course() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let app = build_app(&db_path);

    let course = app.course_api.create_course("物理", 8, 0.0).unwrap();

    // 学期序号超出学制
    assert!(matches!(
        app.section_api
            .create_section(course.id, Shift::Morning, 9, 30, 2026)
            .unwrap_err(),
        ApiError::InvalidInput(_)
    ));

    // 课程不存在
    assert!(matches!(
        app.section_api
            .create_section(course.id + 50, Shift::Morning, 1, 30, 2026)
            .unwrap_err(),
        ApiError::NotFound(_)
    ));
}
