// ==========================================
// 教室分配预测系统 - 教室领域模型
// ==========================================
// 职责: 教室主数据与学期配置定义
// 红线: 不含数据访问逻辑
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{RoomKind, RoomSize};

// ==========================================
// Room - 教室主数据
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: i64,
    pub number: String,               // 教室编号
    pub block: String,                // 所在楼栋

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ==========================================
// RoomConfiguration - 教室学期配置
// ==========================================
// 用途: 声明某教室在某学年/学期的规格与类型
// 约束: 同一教室在同一学年/学期只能有一条配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomConfiguration {
    pub id: i64,
    pub room_id: i64,
    pub year: i32,                    // 学年
    pub term: i32,                    // 学期 (1/2)
    pub size: RoomSize,               // 规格 (容量由预测配置映射)
    pub kind: RoomKind,               // 类型 (实验室不参与常规预测)

    // ===== 关联教室信息 (查询时 JOIN 填充) =====
    pub room_number: String,
    pub room_block: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RoomConfiguration {
    /// 展示用标签: "楼栋-编号"
    pub fn label(&self) -> String {
        format!("{}-{}", self.room_block, self.room_number)
    }
}
