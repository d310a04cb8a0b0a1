//! Payment Commands
//!
//! 결제 내역 엑셀 업로드와 파생 조회(미등록/소급·예외) API

use serde::{Deserialize, Serialize};
use tauri::State;

use crate::db::DbState;
use crate::error::{CommandError, CommandResult};
use crate::models::PaymentItem;
use crate::payments::{abnormal_payments, parse_payment_workbook, retro_exception_payments};
use crate::utils::validate_path;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPaymentExcelArgs {
    /// 엑셀 파일 경로 (.xlsx/.xls)
    pub path: String,
    /// 업로드 대상 연도. 다른 연도의 행은 배제된다.
    pub year: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPaymentExcelResult {
    pub imported_count: usize,
}

/// 결제 내역 엑셀 업로드.
/// 성공 시 해당 연도의 기존 내역을 전부 교체하고,
/// 파일 자체가 손상된 경우에는 기존 데이터를 건드리지 않고 실패한다.
#[tauri::command]
pub fn import_payment_excel(
    args: ImportPaymentExcelArgs,
    db_state: State<DbState>,
) -> CommandResult<ImportPaymentExcelResult> {
    let path = validate_path(&args.path)?;

    // 파싱이 끝나기 전에는 DB에 손대지 않는다
    let items = parse_payment_workbook(&path, args.year).map_err(CommandError::from)?;

    let db = db_state.0.lock().map_err(|e| CommandError {
        code: "LOCK_ERROR".to_string(),
        message: format!("Failed to acquire database lock: {}", e),
        details: None,
    })?;

    db.replace_payment_items_for_year(args.year, &items)
        .map_err(CommandError::from)?;

    Ok(ImportPaymentExcelResult {
        imported_count: items.len(),
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPaymentsArgs {
    #[serde(default)]
    pub year: Option<i32>,
}

/// 결제 내역 조회 (연도 지정 가능)
#[tauri::command]
pub fn list_payment_items(
    args: ListPaymentsArgs,
    db_state: State<DbState>,
) -> CommandResult<Vec<PaymentItem>> {
    let db = db_state.0.lock().map_err(|e| CommandError {
        code: "LOCK_ERROR".to_string(),
        message: format!("Failed to acquire database lock: {}", e),
        details: None,
    })?;

    db.list_payment_items(args.year).map_err(CommandError::from)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentYearArgs {
    pub year: i32,
}

/// 미등록(비정상) 결제: 명부의 어떤 이용인과도 매칭되지 않는 항목
#[tauri::command]
pub fn list_abnormal_payments(
    args: PaymentYearArgs,
    db_state: State<DbState>,
) -> CommandResult<Vec<PaymentItem>> {
    let db = db_state.0.lock().map_err(|e| CommandError {
        code: "LOCK_ERROR".to_string(),
        message: format!("Failed to acquire database lock: {}", e),
        details: None,
    })?;

    let items = db
        .list_payment_items(Some(args.year))
        .map_err(CommandError::from)?;
    let clients = db.list_clients().map_err(CommandError::from)?;

    Ok(abnormal_payments(&items, &clients, args.year)
        .into_iter()
        .cloned()
        .collect())
}

/// 소급/예외 결제 내역 (반납/과오 제외)
#[tauri::command]
pub fn list_retro_payments(
    args: PaymentYearArgs,
    db_state: State<DbState>,
) -> CommandResult<Vec<PaymentItem>> {
    let db = db_state.0.lock().map_err(|e| CommandError {
        code: "LOCK_ERROR".to_string(),
        message: format!("Failed to acquire database lock: {}", e),
        details: None,
    })?;

    let items = db
        .list_payment_items(Some(args.year))
        .map_err(CommandError::from)?;

    Ok(retro_exception_payments(&items, args.year)
        .into_iter()
        .cloned()
        .collect())
}
