//! MoaDocs - Tauri Backend Library
//!
//! 활동지원기관 서류 제출 관리 도구의 Rust 백엔드.
//! 명부/제출 데이터 저장(SQLite), 결제 내역 엑셀 파싱, 제출 상태 판정을 담당한다.

pub mod commands;
pub mod dates;
pub mod db;
pub mod error;
pub mod models;
pub mod payments;
pub mod status;
pub mod utils;

use tauri::Manager;

/// Tauri 앱 실행
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            // Dev 환경 설정 로드. production에서는 파일이 없을 수 있으므로 실패해도 무시.
            let _ = dotenvy::dotenv();

            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }

            // 데이터베이스 초기화
            let app_handle = app.handle();
            let db_path = app_handle
                .path()
                .app_data_dir()
                .expect("Failed to get app data dir")
                .join("moadocs.db");

            if let Some(parent) = db_path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let db = db::Database::new(&db_path)?;
            db.initialize()?;

            // 앱 상태로 데이터베이스 관리
            app.manage(db::DbState(std::sync::Mutex::new(db)));

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::roster::list_clients,
            commands::roster::save_client,
            commands::roster::delete_client,
            commands::roster::save_support_workers,
            commands::submission::get_submission_data,
            commands::submission::get_status_grid,
            commands::submission::save_submission,
            commands::submission::set_retroactive_check,
            commands::submission::get_retroactive_checks,
            commands::payments::import_payment_excel,
            commands::payments::list_payment_items,
            commands::payments::list_abnormal_payments,
            commands::payments::list_retro_payments,
            commands::storage::export_data_file,
            commands::storage::suggest_export_file_name,
            commands::storage::import_data_file,
            commands::session::record_login,
            commands::session::record_logout,
            commands::session::list_active_users,
            commands::session::force_logout_all,
            commands::settings::get_base_period,
            commands::settings::set_base_period,
            commands::settings::set_admin_password,
            commands::settings::verify_admin_password,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
