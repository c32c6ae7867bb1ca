// ==========================================
// 教室分配预测系统 - 基础类型定义
// ==========================================
// 职责: 定义领域枚举类型与字符串映射
// 约束: 枚举值与数据库存储值一一对应
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// RoomSize - 教室规格
// ==========================================
// 用途: 教室学期配置的规格等级, 容量由预测配置统一映射

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomSize {
    Small,
    Medium,
    Large,
}

impl RoomSize {
    /// 按规格从小到大的固定顺序 (最小可行规格判定依赖该顺序)
    pub const ALL: [RoomSize; 3] = [RoomSize::Small, RoomSize::Medium, RoomSize::Large];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoomSize::Small => "small",
            RoomSize::Medium => "medium",
            RoomSize::Large => "large",
        }
    }

    pub fn title_cn(&self) -> &'static str {
        match self {
            RoomSize::Small => "小教室",
            RoomSize::Medium => "中教室",
            RoomSize::Large => "大教室",
        }
    }
}

impl std::str::FromStr for RoomSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "small" | "s" | "p" => Ok(RoomSize::Small),
            "medium" | "m" => Ok(RoomSize::Medium),
            "large" | "l" | "g" => Ok(RoomSize::Large),
            other => Err(format!("未知教室规格: {}", other)),
        }
    }
}

// ==========================================
// RoomKind - 教室类型
// ==========================================
// 约束: 常规预测只消费 Classroom 类型, 实验室不参与分配

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomKind {
    Classroom,
    Laboratory,
}

impl RoomKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomKind::Classroom => "classroom",
            RoomKind::Laboratory => "laboratory",
        }
    }
}

impl std::str::FromStr for RoomKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "classroom" | "aula" => Ok(RoomKind::Classroom),
            "laboratory" | "lab" => Ok(RoomKind::Laboratory),
            other => Err(format!("未知教室类型: {}", other)),
        }
    }
}

// ==========================================
// Shift - 班次
// ==========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shift {
    Morning,
    Afternoon,
    Evening,
}

impl Shift {
    pub fn as_str(&self) -> &'static str {
        match self {
            Shift::Morning => "morning",
            Shift::Afternoon => "afternoon",
            Shift::Evening => "evening",
        }
    }
}

impl std::str::FromStr for Shift {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "morning" => Ok(Shift::Morning),
            "afternoon" => Ok(Shift::Afternoon),
            "evening" => Ok(Shift::Evening),
            other => Err(format!("未知班次: {}", other)),
        }
    }
}
