// ==========================================
// 教室分配预测系统 - 分配策略
// ==========================================
// 职责: 将排好序的班级匹配到可用教室池
// 用途: 策略以 trait 形式开放, 默认实现为大班优先的首次适配贪心
// 红线: Engine 不拼 SQL, 未分配必须输出 reason
// ==========================================

use crate::domain::forecast::{
    AllocationRecord, RoomAllocationSummary, ShortfallEntry, SizeCapacities, UnallocatedSection,
};
use crate::domain::room::RoomConfiguration;
use crate::domain::section::ProjectedSection;
use crate::domain::types::RoomSize;
use tracing::debug;

// ==========================================
// AllocationOutcome - 策略输出
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationOutcome {
    /// 全量分配记录 (含未分配的空教室记录)
    pub allocation: Vec<AllocationRecord>,
    /// 未分配班级及原因
    pub unallocated: Vec<UnallocatedSection>,
    /// 各规格还需新增的教室数 (只含非零项, 规格从小到大)
    pub additional_rooms_needed: Vec<ShortfallEntry>,
    /// 按教室汇总 (池内全部教室, 空教室保留)
    pub room_summary: Vec<RoomAllocationSummary>,
}

// ==========================================
// AllocationStrategy Trait
// ==========================================

/// 分配策略接口
///
/// 输入的班级顺序即分配优先级; 教室池顺序即扫描顺序。
/// 实现必须保证: 教室单次使用, 每个班级恰好出现在
/// allocation 中一次 (分配成功或 room 为空)。
pub trait AllocationStrategy: Send + Sync {
    fn allocate(
        &self,
        sections: Vec<ProjectedSection>,
        rooms: Vec<RoomConfiguration>,
        capacities: &SizeCapacities,
        area_per_student_m2: f64,
    ) -> AllocationOutcome;
}

// ==========================================
// GreedyFirstFitStrategy - 默认贪心策略
// ==========================================

/// 首次适配贪心策略
///
/// 对每个班级按池内顺序线性扫描, 选中第一个满足容量与面积
/// 双重校验的教室并将其移出池。匹配不到时记录未分配原因,
/// 并按最小可行规格累计缺口。
pub struct GreedyFirstFitStrategy;

impl GreedyFirstFitStrategy {
    pub fn new() -> Self {
        Self {}
    }

    /// 教室是否能容纳该班级
    ///
    /// 容量校验: forecast_enrollment <= capacity
    /// 面积校验: forecast_enrollment * 人均面积 <= capacity * 人均面积
    ///
    /// 面积校验在人均面积全局统一时与容量校验等价, 为与历史
    /// 实现输出完全一致而保留 (详见 DESIGN.md)。
    fn room_fits(
        section: &ProjectedSection,
        room: &RoomConfiguration,
        capacities: &SizeCapacities,
        area_per_student_m2: f64,
    ) -> bool {
        let capacity = capacities.capacity_for(room.size);
        let total_area = capacity as f64 * area_per_student_m2;
        section.forecast_enrollment <= capacity
            && section.forecast_enrollment as f64 * area_per_student_m2 <= total_area
    }
}

impl Default for GreedyFirstFitStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl AllocationStrategy for GreedyFirstFitStrategy {
    fn allocate(
        &self,
        sections: Vec<ProjectedSection>,
        rooms: Vec<RoomConfiguration>,
        capacities: &SizeCapacities,
        area_per_student_m2: f64,
    ) -> AllocationOutcome {
        // 本次运行的私有教室池副本, 匹配即按下标移除
        let mut available = rooms.clone();

        let mut allocation = Vec::with_capacity(sections.len());
        let mut unallocated = Vec::new();
        let mut room_summary: Vec<RoomAllocationSummary> = rooms
            .iter()
            .map(|room| RoomAllocationSummary {
                room: room.clone(),
                sections: Vec::new(),
            })
            .collect();
        // 缺口计数, 下标对应 RoomSize::ALL
        let mut shortfall = [0i32; 3];

        for section in sections {
            let matched_idx = available
                .iter()
                .position(|room| Self::room_fits(&section, room, capacities, area_per_student_m2));

            match matched_idx {
                Some(idx) => {
                    let room = available.remove(idx);
                    debug!(
                        section_id = section.section.id,
                        room_id = room.id,
                        forecast_enrollment = section.forecast_enrollment,
                        "班级匹配到教室"
                    );
                    if let Some(summary) = room_summary.iter_mut().find(|s| s.room.id == room.id) {
                        summary.sections.push(section.clone());
                    }
                    allocation.push(AllocationRecord {
                        section,
                        room: Some(room),
                    });
                }
                None => {
                    let needed = capacities.minimal_size_for(section.forecast_enrollment);
                    let reason = format!("没有可用的 {} 规格教室", needed.as_str());
                    debug!(
                        section_id = section.section.id,
                        forecast_enrollment = section.forecast_enrollment,
                        needed_size = needed.as_str(),
                        "无可用教室, 计入缺口"
                    );
                    shortfall[RoomSize::ALL
                        .iter()
                        .position(|s| *s == needed)
                        .unwrap_or(RoomSize::ALL.len() - 1)] += 1;
                    unallocated.push(UnallocatedSection {
                        section: section.clone(),
                        reason,
                    });
                    allocation.push(AllocationRecord {
                        section,
                        room: None,
                    });
                }
            }
        }

        // 缺口只输出非零规格
        let additional_rooms_needed = RoomSize::ALL
            .iter()
            .zip(shortfall.iter())
            .filter(|(_, qty)| **qty > 0)
            .map(|(size, qty)| ShortfallEntry {
                size: *size,
                quantity: *qty,
            })
            .collect();

        AllocationOutcome {
            allocation,
            unallocated,
            additional_rooms_needed,
            room_summary,
        }
    }
}
