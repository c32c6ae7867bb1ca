// ==========================================
// 教室分配预测系统 - 预测结果导出
// ==========================================
// 职责: 预测结果 → 表格行的纯转换, 以及 CSV 写出
// 说明: xlsx 等最终格式由外部导出协作方负责, 核心只产出行数据
// ==========================================

use crate::domain::forecast::ForecastResult;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// 导出错误
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV 写出失败: {0}")]
    Csv(#[from] csv::Error),

    #[error("文件写出失败: {0}")]
    Io(#[from] std::io::Error),
}

// ==========================================
// SpreadsheetRow - 表格行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpreadsheetRow {
    pub section: String,          // 班级标签
    pub course: String,           // 课程名称
    pub period: i32,              // 当前学期序号
    pub students: i32,            // 预测人数
    pub room: String,             // 教室标签, 未分配时为"未分配"
    pub block: String,            // 楼栋
    pub size: String,             // 教室规格
}

/// 未分配班级的教室占位文案
pub const UNALLOCATED_LABEL: &str = "未分配";

/// 预测结果 → 表格行 (纯转换, 每条分配记录一行)
pub fn to_spreadsheet_rows(result: &ForecastResult) -> Vec<SpreadsheetRow> {
    result
        .allocation
        .iter()
        .map(|record| {
            let section = &record.section;
            match &record.room {
                Some(room) => SpreadsheetRow {
                    section: section.section.label(),
                    course: section.section.course_name.clone(),
                    period: section.section.current_period,
                    students: section.forecast_enrollment,
                    room: room.label(),
                    block: room.room_block.clone(),
                    size: room.size.as_str().to_string(),
                },
                None => SpreadsheetRow {
                    section: section.section.label(),
                    course: section.section.course_name.clone(),
                    period: section.section.current_period,
                    students: section.forecast_enrollment,
                    room: UNALLOCATED_LABEL.to_string(),
                    block: String::new(),
                    size: String::new(),
                },
            }
        })
        .collect()
}

/// 预测结果写出为 CSV 文件
pub fn write_csv<P: AsRef<Path>>(result: &ForecastResult, path: P) -> Result<(), ExportError> {
    let rows = to_spreadsheet_rows(result);
    let mut writer = csv::Writer::from_path(path.as_ref())?;

    writer.write_record(["班级", "课程", "学期", "预测人数", "教室", "楼栋", "规格"])?;
    for row in &rows {
        writer.write_record([
            row.section.as_str(),
            row.course.as_str(),
            &row.period.to_string(),
            &row.students.to_string(),
            row.room.as_str(),
            row.block.as_str(),
            row.size.as_str(),
        ])?;
    }
    writer.flush()?;

    info!(
        rows = rows.len(),
        path = %path.as_ref().display(),
        "预测结果已导出为 CSV"
    );
    Ok(())
}
