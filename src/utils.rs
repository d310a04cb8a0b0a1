use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::{CommandError, CommandResult};

/// 백업 파일 기본 이름: 활동지원사_데이터백업_YYYY-MM-DD_HH-MM.json
pub fn backup_file_name(now: DateTime<Local>) -> String {
    format!(
        "활동지원사_데이터백업_{}.json",
        now.format("%Y-%m-%d_%H-%M")
    )
}

/// 파일 경로 정규화 검증.
/// - 존재하는 파일은 canonicalize
/// - 새로 만들 파일(내보내기)은 부모 디렉토리까지 검증 후 파일명을 조합
pub fn validate_path(path_str: &str) -> CommandResult<PathBuf> {
    let path = Path::new(path_str);

    if path.exists() {
        return path.canonicalize().map_err(|e| CommandError {
            code: "PATH_ERROR".to_string(),
            message: format!("Invalid path: {}", e),
            details: None,
        });
    }

    if let Some(parent) = path.parent() {
        if parent.exists() {
            let canonical_parent = parent.canonicalize().map_err(|e| CommandError {
                code: "PATH_ERROR".to_string(),
                message: format!("Invalid parent path: {}", e),
                details: None,
            })?;
            return Ok(canonical_parent.join(path.file_name().unwrap_or_default()));
        }
        return Err(CommandError {
            code: "PATH_ERROR".to_string(),
            message: "Parent directory does not exist".to_string(),
            details: None,
        });
    }

    // 부모 경로가 없는 경우 (루트 등)
    Ok(PathBuf::from(path_str))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_backup_file_name() {
        let now = Local.with_ymd_and_hms(2025, 5, 1, 9, 5, 0).unwrap();
        assert_eq!(
            backup_file_name(now),
            "활동지원사_데이터백업_2025-05-01_09-05.json"
        );
    }
}
