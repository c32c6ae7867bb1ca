// ==========================================
// 教室分配预测系统 - 预测领域模型
// ==========================================
// 职责: 预测配置、预测请求/结果、分配记录定义
// 红线: 不含数据访问逻辑, 不含引擎逻辑
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::room::RoomConfiguration;
use crate::domain::section::{ProjectedSection, SectionInput};
use crate::domain::types::RoomSize;

// ==========================================
// ForecastConfig - 预测配置 (全局单例)
// ==========================================
// 约束: 系统内最多存在一条配置, 创建后只允许原地更新
// 约束: 三档容量必须为正且严格递增
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    pub id: i64,
    pub small_capacity: i32,          // 小教室容量 (人)
    pub medium_capacity: i32,         // 中教室容量 (人)
    pub large_capacity: i32,          // 大教室容量 (人)
    pub area_per_student_m2: f64,     // 人均面积 (平方米)
    pub dropout_rate_percent: f64,    // 全局流失率 (0-100)

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ForecastConfig {
    /// 提取三档容量映射
    pub fn capacities(&self) -> SizeCapacities {
        SizeCapacities {
            small: self.small_capacity,
            medium: self.medium_capacity,
            large: self.large_capacity,
        }
    }
}

// ==========================================
// SizeCapacities - 规格容量映射
// ==========================================
// 用途: 分配策略的容量查询入口, 与配置实体解耦
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeCapacities {
    pub small: i32,
    pub medium: i32,
    pub large: i32,
}

impl SizeCapacities {
    /// 按规格查询容量
    pub fn capacity_for(&self, size: RoomSize) -> i32 {
        match size {
            RoomSize::Small => self.small,
            RoomSize::Medium => self.medium,
            RoomSize::Large => self.large,
        }
    }

    /// 能容纳给定人数的最小规格
    ///
    /// 三档均不满足时返回 Large (缺口统计按最大规格记)
    pub fn minimal_size_for(&self, enrollment: i32) -> RoomSize {
        for size in RoomSize::ALL {
            if enrollment <= self.capacity_for(size) {
                return size;
            }
        }
        RoomSize::Large
    }
}

// ==========================================
// ForecastRequest - 预测请求
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub year: i32,
    pub term: i32,
    pub sections: Vec<SectionInput>,
}

// ==========================================
// 预测结果结构
// ==========================================

/// 单条分配记录: 班级与教室配对, 未分配时教室为空
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRecord {
    pub section: ProjectedSection,
    pub room: Option<RoomConfiguration>,
}

/// 未分配班级及原因
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnallocatedSection {
    pub section: ProjectedSection,
    pub reason: String,
}

/// 缺口条目: 该规格还需新增的教室数量 (只输出非零项)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortfallEntry {
    pub size: RoomSize,
    pub quantity: i32,
}

/// 按教室汇总的分配情况 (空教室也保留, 便于利用率展示)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomAllocationSummary {
    pub room: RoomConfiguration,
    pub sections: Vec<ProjectedSection>,
}

/// 预测结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub run_id: String,               // 本次预测运行ID (uuid)
    pub year: i32,
    pub term: i32,
    pub allocation: Vec<AllocationRecord>,
    pub unallocated: Vec<UnallocatedSection>,
    pub additional_rooms_needed: Vec<ShortfallEntry>,
    pub room_summary: Vec<RoomAllocationSummary>,
    pub config: ForecastConfig,
    pub generated_at: DateTime<Utc>,
}

// ==========================================
// SavedForecast - 已保存的预测
// ==========================================
// 用途: 以名称归档一次预测结果, 负载为不透明 JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedForecast {
    pub id: i64,
    pub name: String,
    pub payload: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capacities() -> SizeCapacities {
        SizeCapacities {
            small: 30,
            medium: 50,
            large: 80,
        }
    }

    #[test]
    fn test_minimal_size_boundaries() {
        let caps = capacities();
        assert_eq!(caps.minimal_size_for(1), RoomSize::Small);
        assert_eq!(caps.minimal_size_for(30), RoomSize::Small);
        assert_eq!(caps.minimal_size_for(31), RoomSize::Medium);
        assert_eq!(caps.minimal_size_for(50), RoomSize::Medium);
        assert_eq!(caps.minimal_size_for(51), RoomSize::Large);
        assert_eq!(caps.minimal_size_for(80), RoomSize::Large);
        // 超出最大容量仍按大教室记缺口
        assert_eq!(caps.minimal_size_for(200), RoomSize::Large);
    }

    #[test]
    fn test_capacity_for() {
        let caps = capacities();
        assert_eq!(caps.capacity_for(RoomSize::Small), 30);
        assert_eq!(caps.capacity_for(RoomSize::Medium), 50);
        assert_eq!(caps.capacity_for(RoomSize::Large), 80);
    }
}
