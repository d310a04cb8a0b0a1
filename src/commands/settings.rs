//! Settings Commands
//!
//! 기준 보고 연/월과 관리자 설정 API

use serde::{Deserialize, Serialize};
use tauri::State;

use crate::db::DbState;
use crate::error::{CommandError, CommandResult};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasePeriod {
    pub base_year: i32,
    /// 0-11 월 인덱스
    pub base_month: u32,
}

/// 기준 보고 기간 조회. 미설정이면 현재 연/월이 기본값.
#[tauri::command]
pub fn get_base_period(db_state: State<DbState>) -> CommandResult<BasePeriod> {
    let db = db_state.0.lock().map_err(|e| CommandError {
        code: "LOCK_ERROR".to_string(),
        message: format!("Failed to acquire database lock: {}", e),
        details: None,
    })?;

    use chrono::Datelike;
    let now = chrono::Local::now();
    let (base_year, base_month) = db
        .get_base_period(now.year(), now.month0())
        .map_err(CommandError::from)?;
    Ok(BasePeriod {
        base_year,
        base_month,
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetBasePeriodArgs {
    pub base_year: i32,
    pub base_month: u32,
}

/// 기준 보고 기간 저장
#[tauri::command]
pub fn set_base_period(args: SetBasePeriodArgs, db_state: State<DbState>) -> CommandResult<()> {
    if args.base_month > 11 {
        return Err(CommandError {
            code: "INVALID_OPERATION".to_string(),
            message: format!("Invalid month index: {}", args.base_month),
            details: None,
        });
    }

    let db = db_state.0.lock().map_err(|e| CommandError {
        code: "LOCK_ERROR".to_string(),
        message: format!("Failed to acquire database lock: {}", e),
        details: None,
    })?;

    db.set_base_period(args.base_year, args.base_month)
        .map_err(CommandError::from)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAdminPasswordArgs {
    pub password: String,
}

/// 관리자 비밀번호 저장
#[tauri::command]
pub fn set_admin_password(
    args: SetAdminPasswordArgs,
    db_state: State<DbState>,
) -> CommandResult<()> {
    let db = db_state.0.lock().map_err(|e| CommandError {
        code: "LOCK_ERROR".to_string(),
        message: format!("Failed to acquire database lock: {}", e),
        details: None,
    })?;

    db.set_admin_password(&args.password)
        .map_err(CommandError::from)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyAdminPasswordArgs {
    pub password: String,
}

/// 관리자 비밀번호 확인. 설정된 비밀번호가 없으면 항상 통과.
#[tauri::command]
pub fn verify_admin_password(
    args: VerifyAdminPasswordArgs,
    db_state: State<DbState>,
) -> CommandResult<bool> {
    let db = db_state.0.lock().map_err(|e| CommandError {
        code: "LOCK_ERROR".to_string(),
        message: format!("Failed to acquire database lock: {}", e),
        details: None,
    })?;

    let stored = db.get_admin_password().map_err(CommandError::from)?;
    Ok(match stored {
        Some(password) => password == args.password,
        None => true,
    })
}
