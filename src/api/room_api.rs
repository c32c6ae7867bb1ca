// ==========================================
// 教室分配预测系统 - 教室管理 API
// ==========================================
// 职责: 教室主数据与学期配置的 CRUD/统计
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::room::{Room, RoomConfiguration};
use crate::domain::types::{RoomKind, RoomSize};
use crate::repository::{RoomConfigRepository, RoomRepository, SizeStatistics};
use std::sync::Arc;

// ==========================================
// RoomApi - 教室管理 API
// ==========================================
pub struct RoomApi {
    room_repo: Arc<RoomRepository>,
    room_config_repo: Arc<RoomConfigRepository>,
}

impl RoomApi {
    pub fn new(room_repo: Arc<RoomRepository>, room_config_repo: Arc<RoomConfigRepository>) -> Self {
        Self {
            room_repo,
            room_config_repo,
        }
    }

    // ==========================================
    // 教室主数据
    // ==========================================

    /// 创建教室
    pub fn create_room(&self, number: &str, block: &str) -> ApiResult<Room> {
        if number.trim().is_empty() || block.trim().is_empty() {
            return Err(ApiError::InvalidInput(
                "教室编号与楼栋不能为空".to_string(),
            ));
        }
        Ok(self.room_repo.create(number.trim(), block.trim())?)
    }

    /// 查询全部教室
    pub fn list_rooms(&self) -> ApiResult<Vec<Room>> {
        Ok(self.room_repo.find_all()?)
    }

    /// 按ID查询教室
    pub fn get_room(&self, id: i64) -> ApiResult<Room> {
        self.room_repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound(format!("Room (id={})", id)))
    }

    /// 更新教室
    pub fn update_room(&self, id: i64, number: &str, block: &str) -> ApiResult<Room> {
        if number.trim().is_empty() || block.trim().is_empty() {
            return Err(ApiError::InvalidInput(
                "教室编号与楼栋不能为空".to_string(),
            ));
        }
        Ok(self.room_repo.update(id, number.trim(), block.trim())?)
    }

    /// 删除教室
    pub fn delete_room(&self, id: i64) -> ApiResult<()> {
        Ok(self.room_repo.delete(id)?)
    }

    // ==========================================
    // 教室学期配置
    // ==========================================

    /// 创建教室学期配置
    ///
    /// # 错误
    /// - NotFound: 教室不存在
    /// - InvalidInput: 学期非法
    /// - BusinessRuleViolation: 同教室同学期重复配置 (唯一约束)
    pub fn create_configuration(
        &self,
        room_id: i64,
        year: i32,
        term: i32,
        size: RoomSize,
        kind: RoomKind,
    ) -> ApiResult<RoomConfiguration> {
        if !(1..=2).contains(&term) {
            return Err(ApiError::InvalidInput(format!(
                "学期必须为 1 或 2, 实际为 {}",
                term
            )));
        }
        // 先确认教室存在, 给出比外键违规更可读的错误
        self.get_room(room_id)?;
        Ok(self
            .room_config_repo
            .create(room_id, year, term, size, kind)?)
    }

    /// 查询全部学期配置
    pub fn list_configurations(&self) -> ApiResult<Vec<RoomConfiguration>> {
        Ok(self.room_config_repo.find_all()?)
    }

    /// 查询某学年/学期内指定类型的教室配置 (预测引擎的教室池)
    pub fn list_for_term(
        &self,
        year: i32,
        term: i32,
        kind: RoomKind,
    ) -> ApiResult<Vec<RoomConfiguration>> {
        Ok(self.room_config_repo.find_for_term(year, term, kind)?)
    }

    /// 学期内按规格统计配置数量
    pub fn size_statistics(&self, year: i32, term: i32) -> ApiResult<Vec<SizeStatistics>> {
        Ok(self.room_config_repo.size_statistics(year, term)?)
    }

    /// 删除学期配置
    pub fn delete_configuration(&self, id: i64) -> ApiResult<()> {
        Ok(self.room_config_repo.delete(id)?)
    }
}
