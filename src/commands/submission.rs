//! Submission Commands
//!
//! 월별 서류 제출 상태 조회/입력과 소급 증빙 체크 API

use serde::{Deserialize, Serialize};
use tauri::State;

use crate::dates::get_submission_key;
use crate::db::DbState;
use crate::error::{CommandError, CommandResult};
use crate::models::SubmissionData;
use crate::status::{
    apply_submission_update, get_status, no_work_editable, reconcile_retroactive, DocType,
    StatusCell, SubmissionUpdate,
};

/// 전체 제출 데이터 조회
#[tauri::command]
pub fn get_submission_data(db_state: State<DbState>) -> CommandResult<SubmissionData> {
    let db = db_state.0.lock().map_err(|e| CommandError {
        code: "LOCK_ERROR".to_string(),
        message: format!("Failed to acquire database lock: {}", e),
        details: None,
    })?;

    db.get_submission_data().map_err(CommandError::from)
}

/// 한 이용인의 12개월 × 서류 3종 상태 그리드의 한 행
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthStatusRow {
    pub month: u32,
    pub schedule: StatusCell,
    pub weekly_report: StatusCell,
    pub retroactive_payment: StatusCell,
    pub no_work_editable: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusGridArgs {
    pub client_id: String,
}

/// 이용인 1명의 연간 상태 그리드 계산.
/// 기준 연/월은 설정에 저장된 값을 쓴다.
#[tauri::command]
pub fn get_status_grid(
    args: StatusGridArgs,
    db_state: State<DbState>,
) -> CommandResult<Vec<MonthStatusRow>> {
    let db = db_state.0.lock().map_err(|e| CommandError {
        code: "LOCK_ERROR".to_string(),
        message: format!("Failed to acquire database lock: {}", e),
        details: None,
    })?;

    let (base_year, base_month) = current_base_period(&db)?;
    let client = db.get_client(&args.client_id).map_err(CommandError::from)?;
    let submission_data = db.get_submission_data().map_err(CommandError::from)?;
    let payment_items = db
        .list_payment_items(Some(base_year))
        .map_err(CommandError::from)?;

    let rows = (0..12)
        .map(|month| MonthStatusRow {
            month,
            schedule: get_status(
                &client,
                month,
                DocType::Schedule,
                &submission_data,
                &payment_items,
                base_year,
                base_month,
            ),
            weekly_report: get_status(
                &client,
                month,
                DocType::WeeklyReport,
                &submission_data,
                &payment_items,
                base_year,
                base_month,
            ),
            retroactive_payment: get_status(
                &client,
                month,
                DocType::RetroactivePayment,
                &submission_data,
                &payment_items,
                base_year,
                base_month,
            ),
            no_work_editable: no_work_editable(month, base_month),
        })
        .collect();

    Ok(rows)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSubmissionArgs {
    pub client_id: String,
    pub year: i32,
    pub month_index: u32,
    pub update: SubmissionUpdate,
}

/// 월 레코드 갱신. 근무없음을 켜면 그 달의 모든 지원사 체크가 함께 해제된다.
#[tauri::command]
pub fn save_submission(args: SaveSubmissionArgs, db_state: State<DbState>) -> CommandResult<()> {
    let db = db_state.0.lock().map_err(|e| CommandError {
        code: "LOCK_ERROR".to_string(),
        message: format!("Failed to acquire database lock: {}", e),
        details: None,
    })?;

    save_submission_inner(&db, &args.client_id, args.year, args.month_index, &args.update)
}

fn save_submission_inner(
    db: &crate::db::Database,
    client_id: &str,
    year: i32,
    month_index: u32,
    update: &SubmissionUpdate,
) -> CommandResult<()> {
    let mut data = db.get_submission_data().map_err(CommandError::from)?;
    apply_submission_update(&mut data, client_id, year, month_index, update);

    let key = get_submission_key(client_id, year, month_index);
    let record = data.get(&key).cloned().unwrap_or_default();
    db.save_submission_record(&key, client_id, year, month_index, &record)
        .map_err(CommandError::from)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetroCheckArgs {
    pub item_id: String,
    pub checked: bool,
    pub client_id: String,
    pub year: i32,
    pub month_index: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetroCheckResult {
    /// 이번 체크로 소급 플래그가 바뀐 지원사 (workerId, 새 값)
    pub updated_workers: Vec<(String, bool)>,
}

/// 소급 항목별 증빙 체크. 항목 체크가 원본이므로, 체크 후 지원사별
/// 집계(전 항목 체크 여부)를 다시 계산해 달라진 플래그를 저장한다.
#[tauri::command]
pub fn set_retroactive_check(
    args: RetroCheckArgs,
    db_state: State<DbState>,
) -> CommandResult<RetroCheckResult> {
    let db = db_state.0.lock().map_err(|e| CommandError {
        code: "LOCK_ERROR".to_string(),
        message: format!("Failed to acquire database lock: {}", e),
        details: None,
    })?;

    db.set_retro_flag(&args.item_id, args.checked)
        .map_err(CommandError::from)?;

    let client = db.get_client(&args.client_id).map_err(CommandError::from)?;
    let payment_items = db
        .list_payment_items(Some(args.year))
        .map_err(CommandError::from)?;
    let retro_flags = db.get_retro_flags().map_err(CommandError::from)?;
    let submission_data = db.get_submission_data().map_err(CommandError::from)?;

    let changes = reconcile_retroactive(
        &client,
        args.year,
        args.month_index,
        &payment_items,
        &retro_flags,
        &submission_data,
    );

    for (worker_id, value) in &changes {
        let update = SubmissionUpdate {
            worker_id: Some(worker_id.clone()),
            doc_type: Some(DocType::RetroactivePayment),
            value: Some(*value),
            ..Default::default()
        };
        save_submission_inner(&db, &args.client_id, args.year, args.month_index, &update)?;
    }

    Ok(RetroCheckResult {
        updated_workers: changes,
    })
}

/// 항목별 증빙 체크 상태 전체 조회
#[tauri::command]
pub fn get_retroactive_checks(
    db_state: State<DbState>,
) -> CommandResult<crate::models::RetroactiveSubmissionStatus> {
    let db = db_state.0.lock().map_err(|e| CommandError {
        code: "LOCK_ERROR".to_string(),
        message: format!("Failed to acquire database lock: {}", e),
        details: None,
    })?;

    db.get_retro_flags().map_err(CommandError::from)
}

fn current_base_period(db: &crate::db::Database) -> CommandResult<(i32, u32)> {
    use chrono::Datelike;
    let now = chrono::Local::now();
    db.get_base_period(now.year(), now.month0())
        .map_err(CommandError::from)
}
