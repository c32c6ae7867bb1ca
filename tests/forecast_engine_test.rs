// ==========================================
// 预测引擎集成测试
// ==========================================
// 职责: 验证投影 → 排序 → 分配全流程的业务性质
// 场景: 数据源以内存桩提供, 不经数据库
// ==========================================

mod test_helpers;

use async_trait::async_trait;
use chrono::Utc;
use classroom_aps::domain::forecast::{ForecastConfig, ForecastRequest};
use classroom_aps::domain::room::RoomConfiguration;
use classroom_aps::domain::types::RoomSize;
use classroom_aps::engine::{ForecastDataSource, ForecastEngine, ForecastError};
use classroom_aps::repository::RepositoryError;
use std::collections::HashSet;
use test_helpers::{make_room_config, make_section_input};

// ==========================================
// 内存桩数据源
// ==========================================

struct StubSource {
    config: Option<ForecastConfig>,
    rooms: Vec<RoomConfiguration>,
}

#[async_trait]
impl ForecastDataSource for StubSource {
    async fn forecast_config(&self) -> Result<Option<ForecastConfig>, RepositoryError> {
        Ok(self.config.clone())
    }

    async fn classroom_configurations(
        &self,
        _year: i32,
        _term: i32,
    ) -> Result<Vec<RoomConfiguration>, RepositoryError> {
        Ok(self.rooms.clone())
    }
}

/// 标准测试配置: 小30 / 中50 / 大80, 人均1.5平米, 流失率10%
fn test_config() -> ForecastConfig {
    ForecastConfig {
        id: 1,
        small_capacity: 30,
        medium_capacity: 50,
        large_capacity: 80,
        area_per_student_m2: 1.5,
        dropout_rate_percent: 10.0,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn engine_with(
    config: Option<ForecastConfig>,
    rooms: Vec<RoomConfiguration>,
) -> ForecastEngine<StubSource> {
    ForecastEngine::new(StubSource { config, rooms })
}

fn request(sections: Vec<classroom_aps::domain::section::SectionInput>) -> ForecastRequest {
    ForecastRequest {
        year: 2026,
        term: 1,
        sections,
    }
}

// ==========================================
// 场景测试
// ==========================================

/// 场景A: 40人班级, 流失率10% → 预测36人, 分配到中教室
#[tokio::test]
async fn test_scenario_a_single_section_allocated() {
    let engine = engine_with(
        Some(test_config()),
        vec![make_room_config(1, RoomSize::Medium)],
    );
    let result = engine
        .generate(&request(vec![make_section_input(1, 40, 2, 8)]))
        .await
        .unwrap();

    assert_eq!(result.allocation.len(), 1);
    let record = &result.allocation[0];
    assert_eq!(record.section.forecast_enrollment, 36);
    assert_eq!(record.room.as_ref().unwrap().id, 1);
    assert!(result.unallocated.is_empty());
    assert!(result.additional_rooms_needed.is_empty());
}

/// 场景B: 毕业班 (当前学期 == 学制) 完全剔除, 教室池不受影响
#[tokio::test]
async fn test_scenario_b_graduating_section_excluded() {
    let engine = engine_with(
        Some(test_config()),
        vec![make_room_config(1, RoomSize::Medium)],
    );
    let result = engine
        .generate(&request(vec![make_section_input(1, 40, 8, 8)]))
        .await
        .unwrap();

    assert!(result.allocation.is_empty());
    assert!(result.unallocated.is_empty());
    // 教室池不受影响: 汇总中教室仍在且为空
    assert_eq!(result.room_summary.len(), 1);
    assert!(result.room_summary[0].sections.is_empty());
}

/// 场景C: 仅一间小教室, 两个班级大班优先; 次大班未分配并计入缺口
#[tokio::test]
async fn test_scenario_c_shortfall_reported() {
    // 流失率0, 预测人数即在读人数 25/20
    let mut config = test_config();
    config.dropout_rate_percent = 0.0;
    let engine = engine_with(Some(config), vec![make_room_config(1, RoomSize::Small)]);

    let result = engine
        .generate(&request(vec![
            make_section_input(1, 20, 2, 8),
            make_section_input(2, 25, 2, 8),
        ]))
        .await
        .unwrap();

    // 大班 (25) 先占用唯一小教室
    let allocated: Vec<_> = result
        .allocation
        .iter()
        .filter(|r| r.room.is_some())
        .collect();
    assert_eq!(allocated.len(), 1);
    assert_eq!(allocated[0].section.section.id, 2);

    // 20人班未分配, 原因指明小教室, 缺口 {small: 1}
    assert_eq!(result.unallocated.len(), 1);
    assert_eq!(result.unallocated[0].section.section.id, 1);
    assert!(result.unallocated[0].reason.contains("small"));
    assert_eq!(result.additional_rooms_needed.len(), 1);
    assert_eq!(result.additional_rooms_needed[0].size, RoomSize::Small);
    assert_eq!(result.additional_rooms_needed[0].quantity, 1);
}

/// 场景D: 无预测配置 → 结构化"未配置"结果, 不继续执行
#[tokio::test]
async fn test_scenario_d_not_configured() {
    let engine = engine_with(None, vec![make_room_config(1, RoomSize::Large)]);
    let err = engine
        .generate(&request(vec![make_section_input(1, 40, 2, 8)]))
        .await
        .unwrap_err();
    assert!(matches!(err, ForecastError::NotConfigured));
}

// ==========================================
// 业务性质测试
// ==========================================

/// 性质: 已分配数 + 未分配数 == 非毕业投影班级数
#[tokio::test]
async fn test_conservation_of_sections() {
    let engine = engine_with(
        Some(test_config()),
        vec![
            make_room_config(1, RoomSize::Small),
            make_room_config(2, RoomSize::Medium),
        ],
    );
    let sections = vec![
        make_section_input(1, 40, 2, 8),
        make_section_input(2, 60, 3, 8),
        make_section_input(3, 90, 4, 8),
        make_section_input(4, 20, 8, 8), // 毕业班
    ];
    let result = engine.generate(&request(sections)).await.unwrap();

    let allocated = result
        .allocation
        .iter()
        .filter(|r| r.room.is_some())
        .count();
    // 4个输入班级, 1个毕业剔除
    assert_eq!(allocated + result.unallocated.len(), 3);
    assert_eq!(result.allocation.len(), 3);

    // 毕业班不出现在任何输出列表
    assert!(result
        .allocation
        .iter()
        .all(|r| r.section.section.id != 4));
    assert!(result
        .unallocated
        .iter()
        .all(|u| u.section.section.id != 4));
}

/// 性质: 同一教室在分配列表中最多出现一次; 已分配班级不超容量
#[tokio::test]
async fn test_rooms_single_use_and_capacity_respected() {
    let engine = engine_with(
        Some(test_config()),
        vec![
            make_room_config(1, RoomSize::Medium),
            make_room_config(2, RoomSize::Medium),
            make_room_config(3, RoomSize::Small),
        ],
    );
    let sections: Vec<_> = (1..=5)
        .map(|id| make_section_input(id, 20 + (id as i32) * 7, 2, 8))
        .collect();
    let result = engine.generate(&request(sections)).await.unwrap();

    let mut seen = HashSet::new();
    for record in result.allocation.iter().filter(|r| r.room.is_some()) {
        let room = record.room.as_ref().unwrap();
        assert!(seen.insert(room.id), "教室 {} 被重复分配", room.id);

        let capacity = result.config.capacities().capacity_for(room.size);
        assert!(record.section.forecast_enrollment <= capacity);
    }
}

/// 性质: 缺口计数等于各规格下未分配班级的最小可行规格计数
#[tokio::test]
async fn test_shortfall_matches_unallocated_minimal_sizes() {
    let engine = engine_with(Some(test_config()), vec![]);
    let sections = vec![
        make_section_input(1, 20, 2, 8), // 预测18 → small
        make_section_input(2, 30, 2, 8), // 预测27 → small
        make_section_input(3, 50, 2, 8), // 预测45 → medium
        make_section_input(4, 90, 2, 8), // 预测81 → large
    ];
    let result = engine.generate(&request(sections)).await.unwrap();

    assert_eq!(result.unallocated.len(), 4);
    let by_size: Vec<(RoomSize, i32)> = result
        .additional_rooms_needed
        .iter()
        .map(|e| (e.size, e.quantity))
        .collect();
    assert_eq!(
        by_size,
        vec![
            (RoomSize::Small, 2),
            (RoomSize::Medium, 1),
            (RoomSize::Large, 1)
        ]
    );
}

/// 性质: 相同输入 (含教室池顺序) 两次运行产出一致结果
#[tokio::test]
async fn test_idempotence() {
    let rooms = vec![
        make_room_config(1, RoomSize::Small),
        make_room_config(2, RoomSize::Large),
        make_room_config(3, RoomSize::Medium),
    ];
    let sections = vec![
        make_section_input(1, 40, 2, 8),
        make_section_input(2, 40, 3, 8), // 同预测人数, 稳定排序保持输入顺序
        make_section_input(3, 70, 4, 8),
    ];

    let engine = engine_with(Some(test_config()), rooms.clone());
    let first = engine.generate(&request(sections.clone())).await.unwrap();
    let second = engine.generate(&request(sections)).await.unwrap();

    // run_id/生成时间逐次不同, 业务输出必须一致
    assert_eq!(first.allocation, second.allocation);
    assert_eq!(first.unallocated, second.unallocated);
    assert_eq!(
        first.additional_rooms_needed,
        second.additional_rooms_needed
    );
    assert_eq!(first.room_summary, second.room_summary);
}

/// 非法输入: 在读人数为零快速失败
#[tokio::test]
async fn test_invalid_student_count_rejected() {
    let engine = engine_with(Some(test_config()), vec![]);
    let err = engine
        .generate(&request(vec![make_section_input(1, 0, 2, 8)]))
        .await
        .unwrap_err();
    assert!(matches!(err, ForecastError::InvalidInput(_)));
}

/// 非法输入: 课程学制缺失 (0) 视为数据完整性缺陷
#[tokio::test]
async fn test_missing_course_duration_rejected() {
    let engine = engine_with(Some(test_config()), vec![]);
    let err = engine
        .generate(&request(vec![make_section_input(1, 30, 2, 0)]))
        .await
        .unwrap_err();
    assert!(matches!(err, ForecastError::InvalidInput(_)));
}
