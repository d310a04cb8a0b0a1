//! Session Commands
//!
//! 다중 작업자 경고용 접속 기록 API.
//! 잠금이나 병합이 아니라, 다른 사용자의 미종료 로그인 마커를
//! 보여주는 사전 경고일 뿐이다. 동시 저장은 여전히 마지막 저장이 이긴다.

use serde::Deserialize;
use tauri::State;

use crate::db::DbState;
use crate::error::{CommandError, CommandResult};
use crate::models::AccessLog;

/// 접속 기록을 시간순으로 접어 사용자별 마지막 상태를 구하고,
/// 본인을 제외한 "로그인 상태" 사용자 이름을 돌려준다.
pub fn active_users(logs: &[AccessLog], current_user: &str) -> Vec<String> {
    let mut last_state: Vec<(String, String)> = Vec::new();
    for log in logs {
        if let Some(entry) = last_state.iter_mut().find(|(name, _)| name == &log.user_name) {
            entry.1 = log.log_type.clone();
        } else {
            last_state.push((log.user_name.clone(), log.log_type.clone()));
        }
    }

    last_state
        .into_iter()
        .filter(|(name, state)| state == "login" && name != current_user)
        .map(|(name, _)| name)
        .collect()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserNameArgs {
    pub user_name: String,
}

/// 접속 시작 마커 기록
#[tauri::command]
pub fn record_login(args: UserNameArgs, db_state: State<DbState>) -> CommandResult<()> {
    let db = db_state.0.lock().map_err(|e| CommandError {
        code: "LOCK_ERROR".to_string(),
        message: format!("Failed to acquire database lock: {}", e),
        details: None,
    })?;

    db.append_access_log(&AccessLog {
        user_name: args.user_name,
        log_type: "login".to_string(),
        timestamp: chrono::Local::now().to_rfc3339(),
    })
    .map_err(CommandError::from)
}

/// 저장/종료 시 로그아웃 마커 기록
#[tauri::command]
pub fn record_logout(args: UserNameArgs, db_state: State<DbState>) -> CommandResult<()> {
    let db = db_state.0.lock().map_err(|e| CommandError {
        code: "LOCK_ERROR".to_string(),
        message: format!("Failed to acquire database lock: {}", e),
        details: None,
    })?;

    db.append_access_log(&AccessLog {
        user_name: args.user_name,
        log_type: "logout".to_string(),
        timestamp: chrono::Local::now().to_rfc3339(),
    })
    .map_err(CommandError::from)
}

/// 본인 외에 로그인 마커가 열려 있는 사용자 목록 (경고 배너용)
#[tauri::command]
pub fn list_active_users(
    args: UserNameArgs,
    db_state: State<DbState>,
) -> CommandResult<Vec<String>> {
    let db = db_state.0.lock().map_err(|e| CommandError {
        code: "LOCK_ERROR".to_string(),
        message: format!("Failed to acquire database lock: {}", e),
        details: None,
    })?;

    let logs = db.list_access_logs().map_err(CommandError::from)?;
    Ok(active_users(&logs, &args.user_name))
}

/// 열려 있는 모든 사용자에게 로그아웃 마커를 추가한다 (관리자용)
#[tauri::command]
pub fn force_logout_all(db_state: State<DbState>) -> CommandResult<usize> {
    let db = db_state.0.lock().map_err(|e| CommandError {
        code: "LOCK_ERROR".to_string(),
        message: format!("Failed to acquire database lock: {}", e),
        details: None,
    })?;

    let logs = db.list_access_logs().map_err(CommandError::from)?;
    let open_users = active_users(&logs, "");
    let now = chrono::Local::now().to_rfc3339();
    for user in &open_users {
        db.append_access_log(&AccessLog {
            user_name: user.clone(),
            log_type: "logout".to_string(),
            timestamp: now.clone(),
        })
        .map_err(CommandError::from)?;
    }
    Ok(open_users.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(user: &str, log_type: &str, ts: &str) -> AccessLog {
        AccessLog {
            user_name: user.to_string(),
            log_type: log_type.to_string(),
            timestamp: ts.to_string(),
        }
    }

    #[test]
    fn test_active_users_takes_last_marker_per_user() {
        let logs = vec![
            log("영희", "login", "2025-05-01T09:00:00Z"),
            log("철수", "login", "2025-05-01T09:10:00Z"),
            log("영희", "logout", "2025-05-01T10:00:00Z"),
        ];

        // 영희는 로그아웃 마커로 닫혔고, 철수만 열려 있다
        assert_eq!(active_users(&logs, "관리자"), vec!["철수".to_string()]);
        // 본인은 목록에서 빠진다
        assert!(active_users(&logs, "철수").is_empty());
    }

    #[test]
    fn test_active_users_relogin_reopens() {
        let logs = vec![
            log("영희", "login", "2025-05-01T09:00:00Z"),
            log("영희", "logout", "2025-05-01T10:00:00Z"),
            log("영희", "login", "2025-05-01T11:00:00Z"),
        ];
        assert_eq!(active_users(&logs, ""), vec!["영희".to_string()]);
    }
}
