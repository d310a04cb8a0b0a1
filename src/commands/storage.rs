//! Storage Commands (데이터 파일 내보내기/가져오기)
//!
//! 백업/공유용 JSON 데이터 파일을 다룬다. 가져오기는 병합 없이
//! 저장소 전체를 파일 내용으로 덮어쓴다 (마지막 저장이 이기는 모델).

use serde::{Deserialize, Serialize};
use tauri::State;

use crate::db::DbState;
use crate::error::{CommandError, CommandResult, MoaError};
use crate::models::DataFile;
use crate::status::migrate_legacy_keys;
use crate::utils::{backup_file_name, validate_path};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDataFileArgs {
    pub path: String,
}

/// 저장소 전체를 JSON 데이터 파일로 내보내기
#[tauri::command]
pub fn export_data_file(args: ExportDataFileArgs, db_state: State<DbState>) -> CommandResult<()> {
    let out_path = validate_path(&args.path)?;

    let db = db_state.0.lock().map_err(|e| CommandError {
        code: "LOCK_ERROR".to_string(),
        message: format!("Failed to acquire database lock: {}", e),
        details: None,
    })?;

    let now = chrono::Local::now();
    use chrono::Datelike;
    let mut data = db
        .snapshot(now.year(), now.month0())
        .map_err(CommandError::from)?;
    data.saved_at = Some(now.to_rfc3339());

    let json = serde_json::to_string_pretty(&data)
        .map_err(MoaError::from)
        .map_err(CommandError::from)?;
    std::fs::write(&out_path, json)
        .map_err(MoaError::from)
        .map_err(CommandError::from)?;

    log::info!("데이터 파일 내보내기 완료: {}", out_path.display());
    Ok(())
}

/// 파일 저장 대화상자에 제안할 기본 파일명
#[tauri::command]
pub fn suggest_export_file_name() -> String {
    backup_file_name(chrono::Local::now())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDataFileArgs {
    pub path: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDataFileResult {
    pub client_count: usize,
    pub payment_item_count: usize,
    pub saved_at: Option<String>,
    /// 구형 제출 키가 현재 형식으로 재작성되었는지
    pub migrated_legacy_keys: bool,
}

/// JSON 데이터 파일 가져오기. 현재 저장소 내용을 파일 내용으로 덮어쓴다.
/// 연도 구분이 없는 구형 제출 키는 가져오기 시점에 현재 형식으로 이관한다.
#[tauri::command]
pub fn import_data_file(
    args: ImportDataFileArgs,
    db_state: State<DbState>,
) -> CommandResult<ImportDataFileResult> {
    let in_path = validate_path(&args.path)?;

    let text = std::fs::read_to_string(&in_path)
        .map_err(MoaError::from)
        .map_err(CommandError::from)?;
    let mut data: DataFile = serde_json::from_str(&text)
        .map_err(|_| MoaError::InvalidDataFile("올바르지 않은 데이터 형식입니다".to_string()))
        .map_err(CommandError::from)?;

    // 구형 키 이관 (멱등, 기존 새 형식 키는 덮어쓰지 않음)
    let (submission_data, migrated) = migrate_legacy_keys(&data.submission_data, data.base_year);
    data.submission_data = submission_data;
    if migrated {
        log::info!("구형 제출 키를 연도 포함 형식으로 이관했습니다");
    }

    let db = db_state.0.lock().map_err(|e| CommandError {
        code: "LOCK_ERROR".to_string(),
        message: format!("Failed to acquire database lock: {}", e),
        details: None,
    })?;

    db.replace_all(&data).map_err(CommandError::from)?;

    Ok(ImportDataFileResult {
        client_count: data.clients.len(),
        payment_item_count: data.payment_items.len(),
        saved_at: data.saved_at.clone(),
        migrated_legacy_keys: migrated,
    })
}
