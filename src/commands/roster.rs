//! Roster Commands
//!
//! 이용인/활동지원사 명부 관리 API

use serde::Deserialize;
use tauri::State;

use crate::dates::OPEN_END_SENTINEL;
use crate::db::DbState;
use crate::error::{CommandError, CommandResult};
use crate::models::{Client, SupportWorker};

/// 저장 전 계약 이력 정리: 빈 종료일은 진행 중 계약으로 보아
/// 먼 미래 날짜로 채우고, 시작일 순으로 정렬한 뒤 가장 최근 기간을
/// 대표 시작/종료일로 올린다.
fn normalize_contract_history(client: &mut Client) {
    if client.contract_history.is_empty() {
        client.contract_history = client.contract_periods();
    }
    for period in &mut client.contract_history {
        if period.end.trim().is_empty() {
            period.end = OPEN_END_SENTINEL.to_string();
        }
    }
    client
        .contract_history
        .sort_by(|a, b| a.start.cmp(&b.start));

    if let Some(latest) = client.contract_history.last() {
        client.contract_start = latest.start.clone();
        client.contract_end = latest.end.clone();
    }
}

/// 전체 이용인 목록 조회 (지원사 포함)
#[tauri::command]
pub fn list_clients(db_state: State<DbState>) -> CommandResult<Vec<Client>> {
    let db = db_state.0.lock().map_err(|e| CommandError {
        code: "LOCK_ERROR".to_string(),
        message: format!("Failed to acquire database lock: {}", e),
        details: None,
    })?;

    db.list_clients().map_err(CommandError::from)
}

/// 이용인 저장 (신규/수정 공용). id가 비어 있으면 새로 발급한다.
#[tauri::command]
pub fn save_client(mut client: Client, db_state: State<DbState>) -> CommandResult<Client> {
    if client.id.trim().is_empty() {
        client.id = uuid::Uuid::new_v4().to_string();
    }
    for worker in &mut client.support_workers {
        if worker.id.trim().is_empty() {
            worker.id = uuid::Uuid::new_v4().to_string();
        }
    }
    normalize_contract_history(&mut client);

    let db = db_state.0.lock().map_err(|e| CommandError {
        code: "LOCK_ERROR".to_string(),
        message: format!("Failed to acquire database lock: {}", e),
        details: None,
    })?;

    db.save_client(&client).map_err(CommandError::from)?;
    Ok(client)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteClientArgs {
    pub client_id: String,
}

/// 이용인 삭제 (소속 지원사 포함)
#[tauri::command]
pub fn delete_client(args: DeleteClientArgs, db_state: State<DbState>) -> CommandResult<()> {
    let db = db_state.0.lock().map_err(|e| CommandError {
        code: "LOCK_ERROR".to_string(),
        message: format!("Failed to acquire database lock: {}", e),
        details: None,
    })?;

    db.delete_client(&args.client_id).map_err(CommandError::from)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveWorkersArgs {
    pub client_id: String,
    pub workers: Vec<SupportWorker>,
}

/// 이용인의 지원사 목록을 통째로 교체
#[tauri::command]
pub fn save_support_workers(
    args: SaveWorkersArgs,
    db_state: State<DbState>,
) -> CommandResult<Client> {
    let db = db_state.0.lock().map_err(|e| CommandError {
        code: "LOCK_ERROR".to_string(),
        message: format!("Failed to acquire database lock: {}", e),
        details: None,
    })?;

    let mut client = db.get_client(&args.client_id).map_err(CommandError::from)?;
    client.support_workers = args.workers;
    for worker in &mut client.support_workers {
        if worker.id.trim().is_empty() {
            worker.id = uuid::Uuid::new_v4().to_string();
        }
    }

    db.save_client(&client).map_err(CommandError::from)?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContractPeriod;

    #[test]
    fn test_normalize_contract_history_fills_open_ends_and_sorts() {
        let mut client = Client {
            id: "c1".to_string(),
            name: "김이용".to_string(),
            dob: "1988-05-15".to_string(),
            contract_start: String::new(),
            contract_end: String::new(),
            contract_history: vec![
                ContractPeriod {
                    start: "2025-01-01".to_string(),
                    end: String::new(),
                },
                ContractPeriod {
                    start: "2023-01-01".to_string(),
                    end: "2023-06-30".to_string(),
                },
            ],
            support_workers: vec![],
            family_support: false,
        };

        normalize_contract_history(&mut client);

        assert_eq!(client.contract_history[0].start, "2023-01-01");
        assert_eq!(client.contract_history[1].end, OPEN_END_SENTINEL);
        // 최근 기간이 대표 시작/종료일이 된다
        assert_eq!(client.contract_start, "2025-01-01");
        assert_eq!(client.contract_end, OPEN_END_SENTINEL);
    }

    #[test]
    fn test_normalize_contract_history_falls_back_to_main_fields() {
        let mut client = Client {
            id: "c1".to_string(),
            name: "김이용".to_string(),
            dob: "1988-05-15".to_string(),
            contract_start: "2025-03-01".to_string(),
            contract_end: "2025-10-01".to_string(),
            contract_history: vec![],
            support_workers: vec![],
            family_support: false,
        };

        normalize_contract_history(&mut client);

        assert_eq!(client.contract_history.len(), 1);
        assert_eq!(client.contract_history[0].start, "2025-03-01");
        assert_eq!(client.contract_start, "2025-03-01");
    }
}
