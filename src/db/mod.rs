//! Database Module
//!
//! SQLite 데이터베이스 관리. 중첩 구조(계약 이력, 지원사별 체크 상태)는
//! 열에 JSON으로 저장한다.

mod schema;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection};

use crate::error::MoaError;
use crate::models::{
    AccessLog, Client, ContractPeriod, DataFile, MonthSubmission, PaymentItem,
    RetroactiveSubmissionStatus, ServicePeriod, SubmissionData, SupportWorker,
};
use crate::payments::item_year;

/// 설정 테이블 키
const SETTING_BASE_YEAR: &str = "baseYear";
const SETTING_BASE_MONTH: &str = "baseMonth";
const SETTING_ADMIN_PASSWORD: &str = "adminPassword";

/// 데이터베이스 상태 (Tauri 앱 상태로 관리)
pub struct DbState(pub Mutex<Database>);

/// 데이터베이스 래퍼
pub struct Database {
    conn: Connection,
}

impl Database {
    /// 새 데이터베이스 연결 생성
    pub fn new(path: &Path) -> Result<Self, MoaError> {
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// 데이터베이스 스키마 초기화
    pub fn initialize(&self) -> Result<(), MoaError> {
        self.conn.execute_batch(schema::CREATE_SCHEMA)?;
        Ok(())
    }

    // --- 이용인 / 활동지원사 ---

    /// 전체 이용인 목록 (지원사 포함, 이름순)
    pub fn list_clients(&self) -> Result<Vec<Client>, MoaError> {
        let mut workers_by_client: HashMap<String, Vec<SupportWorker>> = HashMap::new();
        {
            let mut stmt = self.conn.prepare(
                "SELECT id, client_id, name, dob, service_start, service_end
                 FROM support_workers ORDER BY rowid",
            )?;
            let iter = stmt.query_map([], |row| {
                let client_id: String = row.get(1)?;
                Ok((
                    client_id,
                    SupportWorker {
                        id: row.get(0)?,
                        name: row.get(2)?,
                        dob: row.get(3)?,
                        service_period: ServicePeriod {
                            start: row.get(4)?,
                            end: row.get(5)?,
                        },
                    },
                ))
            })?;
            for entry in iter {
                let (client_id, worker) = entry?;
                workers_by_client.entry(client_id).or_default().push(worker);
            }
        }

        let mut stmt = self.conn.prepare(
            "SELECT id, name, dob, contract_start, contract_end, contract_history_json, family_support
             FROM clients ORDER BY name",
        )?;
        let iter = stmt.query_map([], |row| {
            let history_json: String = row.get(5)?;
            Ok(Client {
                id: row.get(0)?,
                name: row.get(1)?,
                dob: row.get(2)?,
                contract_start: row.get(3)?,
                contract_end: row.get(4)?,
                contract_history: serde_json::from_str::<Vec<ContractPeriod>>(&history_json)
                    .unwrap_or_default(),
                support_workers: Vec::new(),
                family_support: row.get(6)?,
            })
        })?;

        let mut clients = Vec::new();
        for client in iter {
            let mut client = client?;
            if let Some(workers) = workers_by_client.remove(&client.id) {
                client.support_workers = workers;
            }
            clients.push(client);
        }
        Ok(clients)
    }

    /// 이용인 저장 (신규/수정 공용). 지원사 목록은 통째로 교체한다.
    pub fn save_client(&self, client: &Client) -> Result<(), MoaError> {
        let tx = self.conn.unchecked_transaction()?;

        tx.execute(
            "INSERT OR REPLACE INTO clients
             (id, name, dob, contract_start, contract_end, contract_history_json, family_support)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                &client.id,
                &client.name,
                &client.dob,
                &client.contract_start,
                &client.contract_end,
                serde_json::to_string(&client.contract_history)?,
                client.family_support,
            ],
        )?;

        tx.execute(
            "DELETE FROM support_workers WHERE client_id = ?1",
            [&client.id],
        )?;
        for worker in &client.support_workers {
            tx.execute(
                "INSERT INTO support_workers (id, client_id, name, dob, service_start, service_end)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    &worker.id,
                    &client.id,
                    &worker.name,
                    &worker.dob,
                    &worker.service_period.start,
                    &worker.service_period.end,
                ],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    /// 이용인 조회
    pub fn get_client(&self, client_id: &str) -> Result<Client, MoaError> {
        self.list_clients()?
            .into_iter()
            .find(|c| c.id == client_id)
            .ok_or_else(|| MoaError::ClientNotFound(client_id.to_string()))
    }

    /// 이용인 삭제 (소속 지원사도 함께 삭제)
    pub fn delete_client(&self, client_id: &str) -> Result<(), MoaError> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM support_workers WHERE client_id = ?1", [client_id])?;
        let deleted = tx.execute("DELETE FROM clients WHERE id = ?1", [client_id])?;
        tx.commit()?;

        if deleted == 0 {
            return Err(MoaError::ClientNotFound(client_id.to_string()));
        }
        Ok(())
    }

    // --- 제출 레코드 ---

    /// 전체 제출 데이터 로드
    pub fn get_submission_data(&self) -> Result<SubmissionData, MoaError> {
        let mut stmt = self
            .conn
            .prepare("SELECT key, no_work, workers_json FROM submissions")?;
        let iter = stmt.query_map([], |row| {
            let key: String = row.get(0)?;
            let no_work: bool = row.get(1)?;
            let workers_json: String = row.get(2)?;
            Ok((key, no_work, workers_json))
        })?;

        let mut data = SubmissionData::new();
        for entry in iter {
            let (key, no_work, workers_json) = entry?;
            data.insert(
                key,
                MonthSubmission {
                    no_work,
                    worker_submissions: serde_json::from_str(&workers_json).unwrap_or_default(),
                },
            );
        }
        Ok(data)
    }

    /// 월 레코드 저장 (통째 교체)
    pub fn save_submission_record(
        &self,
        key: &str,
        client_id: &str,
        year: i32,
        month_index: u32,
        record: &MonthSubmission,
    ) -> Result<(), MoaError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO submissions (key, client_id, year, month, no_work, workers_json)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                key,
                client_id,
                year,
                month_index,
                record.no_work,
                serde_json::to_string(&record.worker_submissions)?,
            ],
        )?;
        Ok(())
    }

    fn replace_submission_data(&self, tx: &rusqlite::Transaction, data: &SubmissionData) -> Result<(), MoaError> {
        tx.execute("DELETE FROM submissions", [])?;
        for (key, record) in data {
            // 키 오른쪽 두 자리에서 연/월을 복원한다 (ID에 하이픈 허용)
            let parts: Vec<&str> = key.split('-').collect();
            if parts.len() < 3 {
                continue;
            }
            let year: i32 = parts[parts.len() - 2].parse().unwrap_or(0);
            let month: u32 = parts[parts.len() - 1].parse().unwrap_or(0);
            let client_id = parts[..parts.len() - 2].join("-");
            tx.execute(
                "INSERT OR REPLACE INTO submissions (key, client_id, year, month, no_work, workers_json)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    key,
                    client_id,
                    year,
                    month,
                    record.no_work,
                    serde_json::to_string(&record.worker_submissions)?,
                ],
            )?;
        }
        Ok(())
    }

    // --- 결제 내역 ---

    /// 결제 내역 조회. 연도를 주면 해당 연도만.
    pub fn list_payment_items(&self, year: Option<i32>) -> Result<Vec<PaymentItem>, MoaError> {
        let sql = match year {
            Some(_) => {
                "SELECT id, client_name, client_dob, service_start, service_end,
                        worker_name, worker_dob, payment_type, return_type, reason, month
                 FROM payment_items WHERE year = ?1 ORDER BY month, service_start"
            }
            None => {
                "SELECT id, client_name, client_dob, service_start, service_end,
                        worker_name, worker_dob, payment_type, return_type, reason, month
                 FROM payment_items ORDER BY year, month, service_start"
            }
        };

        let mut stmt = self.conn.prepare(sql)?;
        let map_row = |row: &rusqlite::Row| -> rusqlite::Result<PaymentItem> {
            Ok(PaymentItem {
                id: row.get(0)?,
                client_name: row.get(1)?,
                client_dob: row.get(2)?,
                service_start: row.get(3)?,
                service_end: row.get(4)?,
                worker_name: row.get(5)?,
                worker_dob: row.get(6)?,
                payment_type: row.get(7)?,
                return_type: row.get(8)?,
                reason: row.get(9)?,
                month: row.get(10)?,
            })
        };

        let mut items = Vec::new();
        match year {
            Some(y) => {
                let iter = stmt.query_map([y], map_row)?;
                for item in iter {
                    items.push(item?);
                }
            }
            None => {
                let iter = stmt.query_map([], map_row)?;
                for item in iter {
                    items.push(item?);
                }
            }
        }
        Ok(items)
    }

    /// 해당 연도의 결제 내역을 통째로 교체한다 (연도 단위 업로드 규칙).
    /// 다른 연도의 기존 데이터는 건드리지 않는다.
    pub fn replace_payment_items_for_year(
        &self,
        year: i32,
        items: &[PaymentItem],
    ) -> Result<(), MoaError> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM payment_items WHERE year = ?1", [year])?;
        for item in items {
            insert_payment_item(&tx, year, item)?;
        }
        tx.commit()?;
        Ok(())
    }

    // --- 소급 증빙 체크 ---

    /// 항목별 증빙 확인 상태 전체
    pub fn get_retro_flags(&self) -> Result<RetroactiveSubmissionStatus, MoaError> {
        let mut stmt = self
            .conn
            .prepare("SELECT item_id, checked FROM retro_submissions")?;
        let iter = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, bool>(1)?))
        })?;

        let mut flags = RetroactiveSubmissionStatus::new();
        for entry in iter {
            let (item_id, checked) = entry?;
            flags.insert(item_id, checked);
        }
        Ok(flags)
    }

    /// 항목 하나의 증빙 확인 상태 저장
    pub fn set_retro_flag(&self, item_id: &str, checked: bool) -> Result<(), MoaError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO retro_submissions (item_id, checked) VALUES (?1, ?2)",
            params![item_id, checked],
        )?;
        Ok(())
    }

    // --- 접속 기록 ---

    /// 접속 기록 추가
    pub fn append_access_log(&self, log: &AccessLog) -> Result<(), MoaError> {
        self.conn.execute(
            "INSERT INTO access_logs (user_name, log_type, timestamp) VALUES (?1, ?2, ?3)",
            params![&log.user_name, &log.log_type, &log.timestamp],
        )?;
        Ok(())
    }

    /// 접속 기록 전체 (시간순)
    pub fn list_access_logs(&self) -> Result<Vec<AccessLog>, MoaError> {
        let mut stmt = self
            .conn
            .prepare("SELECT user_name, log_type, timestamp FROM access_logs ORDER BY id")?;
        let iter = stmt.query_map([], |row| {
            Ok(AccessLog {
                user_name: row.get(0)?,
                log_type: row.get(1)?,
                timestamp: row.get(2)?,
            })
        })?;

        let mut logs = Vec::new();
        for log in iter {
            logs.push(log?);
        }
        Ok(logs)
    }

    // --- 설정 ---

    /// 설정값 조회
    pub fn get_setting(&self, key: &str) -> Result<Option<String>, MoaError> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM settings WHERE key = ?1")?;
        let mut rows = stmt.query([key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    /// 설정값 저장
    pub fn set_setting(&self, key: &str, value: &str) -> Result<(), MoaError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// 기준 보고 기간 (연, 0-based 월). 미설정이면 기본값을 돌려준다.
    pub fn get_base_period(&self, default_year: i32, default_month: u32) -> Result<(i32, u32), MoaError> {
        let year = self
            .get_setting(SETTING_BASE_YEAR)?
            .and_then(|v| v.parse().ok())
            .unwrap_or(default_year);
        let month = self
            .get_setting(SETTING_BASE_MONTH)?
            .and_then(|v| v.parse().ok())
            .unwrap_or(default_month);
        Ok((year, month))
    }

    /// 기준 보고 기간 저장
    pub fn set_base_period(&self, year: i32, month_index: u32) -> Result<(), MoaError> {
        self.set_setting(SETTING_BASE_YEAR, &year.to_string())?;
        self.set_setting(SETTING_BASE_MONTH, &month_index.to_string())?;
        Ok(())
    }

    /// 관리자 비밀번호 조회
    pub fn get_admin_password(&self) -> Result<Option<String>, MoaError> {
        self.get_setting(SETTING_ADMIN_PASSWORD)
    }

    /// 관리자 비밀번호 저장
    pub fn set_admin_password(&self, password: &str) -> Result<(), MoaError> {
        self.set_setting(SETTING_ADMIN_PASSWORD, password)
    }

    // --- 데이터 파일 (백업/공유) ---

    /// 저장소 전체를 데이터 파일 구조로 스냅숏
    pub fn snapshot(&self, default_year: i32, default_month: u32) -> Result<DataFile, MoaError> {
        let (base_year, base_month) = self.get_base_period(default_year, default_month)?;
        Ok(DataFile {
            base_year,
            base_month,
            clients: self.list_clients()?,
            submission_data: self.get_submission_data()?,
            payment_items: self.list_payment_items(None)?,
            retroactive_submissions: self.get_retro_flags()?,
            access_logs: self.list_access_logs()?,
            admin_settings: crate::models::AdminSettings {
                password: self.get_admin_password()?,
            },
            saved_at: None,
        })
    }

    /// 데이터 파일 내용으로 저장소 전체를 교체한다.
    /// 마지막 저장이 이기는 모델이므로 병합 없이 통째로 덮어쓴다.
    pub fn replace_all(&self, data: &DataFile) -> Result<(), MoaError> {
        let tx = self.conn.unchecked_transaction()?;

        tx.execute("DELETE FROM support_workers", [])?;
        tx.execute("DELETE FROM clients", [])?;
        for client in &data.clients {
            tx.execute(
                "INSERT OR REPLACE INTO clients
                 (id, name, dob, contract_start, contract_end, contract_history_json, family_support)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    &client.id,
                    &client.name,
                    &client.dob,
                    &client.contract_start,
                    &client.contract_end,
                    serde_json::to_string(&client.contract_history)?,
                    client.family_support,
                ],
            )?;
            for worker in &client.support_workers {
                tx.execute(
                    "INSERT OR REPLACE INTO support_workers
                     (id, client_id, name, dob, service_start, service_end)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![
                        &worker.id,
                        &client.id,
                        &worker.name,
                        &worker.dob,
                        &worker.service_period.start,
                        &worker.service_period.end,
                    ],
                )?;
            }
        }

        self.replace_submission_data(&tx, &data.submission_data)?;

        tx.execute("DELETE FROM payment_items", [])?;
        for item in &data.payment_items {
            let year = item_year(item).unwrap_or(data.base_year);
            insert_payment_item(&tx, year, item)?;
        }

        tx.execute("DELETE FROM retro_submissions", [])?;
        for (item_id, checked) in &data.retroactive_submissions {
            tx.execute(
                "INSERT OR REPLACE INTO retro_submissions (item_id, checked) VALUES (?1, ?2)",
                params![item_id, checked],
            )?;
        }

        tx.execute("DELETE FROM access_logs", [])?;
        for log in &data.access_logs {
            tx.execute(
                "INSERT INTO access_logs (user_name, log_type, timestamp) VALUES (?1, ?2, ?3)",
                params![&log.user_name, &log.log_type, &log.timestamp],
            )?;
        }

        tx.execute(
            "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
            params![SETTING_BASE_YEAR, data.base_year.to_string()],
        )?;
        tx.execute(
            "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
            params![SETTING_BASE_MONTH, data.base_month.to_string()],
        )?;
        if let Some(password) = &data.admin_settings.password {
            tx.execute(
                "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
                params![SETTING_ADMIN_PASSWORD, password],
            )?;
        }

        tx.commit()?;
        Ok(())
    }
}

fn insert_payment_item(
    tx: &rusqlite::Transaction,
    year: i32,
    item: &PaymentItem,
) -> Result<(), MoaError> {
    tx.execute(
        "INSERT OR REPLACE INTO payment_items
         (id, year, client_name, client_dob, service_start, service_end,
          worker_name, worker_dob, payment_type, return_type, reason, month)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            &item.id,
            year,
            &item.client_name,
            &item.client_dob,
            &item.service_start,
            &item.service_end,
            &item.worker_name,
            &item.worker_dob,
            &item.payment_type,
            &item.return_type,
            &item.reason,
            item.month,
        ],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn open_test_db(dir: &tempfile::TempDir) -> Database {
        let db = Database::new(&dir.path().join("test.db")).unwrap();
        db.initialize().unwrap();
        db
    }

    fn sample_client(id: &str, name: &str) -> Client {
        Client {
            id: id.to_string(),
            name: name.to_string(),
            dob: "1988-05-15".to_string(),
            contract_start: "2025-01-01".to_string(),
            contract_end: "2025-12-31".to_string(),
            contract_history: vec![ContractPeriod {
                start: "2025-01-01".to_string(),
                end: "2025-12-31".to_string(),
            }],
            support_workers: vec![SupportWorker {
                id: format!("{}-w1", id),
                name: "박지원".to_string(),
                dob: "1990-01-01".to_string(),
                service_period: ServicePeriod {
                    start: "2025-01-01".to_string(),
                    end: String::new(),
                },
            }],
            family_support: true,
        }
    }

    fn sample_item(id: &str, start: &str, month: u32) -> PaymentItem {
        PaymentItem {
            id: id.to_string(),
            client_name: "김이용".to_string(),
            client_dob: "1988-05-15".to_string(),
            service_start: start.to_string(),
            service_end: String::new(),
            worker_name: "박지원".to_string(),
            worker_dob: "1990-01-01".to_string(),
            payment_type: "소급".to_string(),
            return_type: String::new(),
            reason: None,
            month,
        }
    }

    #[test]
    fn test_client_roundtrip_with_workers() {
        let dir = tempdir().unwrap();
        let db = open_test_db(&dir);

        db.save_client(&sample_client("c1", "김이용")).unwrap();
        db.save_client(&sample_client("c2", "이도움")).unwrap();

        let clients = db.list_clients().unwrap();
        assert_eq!(clients.len(), 2);
        assert_eq!(clients[0].name, "김이용"); // 이름순 정렬
        assert_eq!(clients[0].support_workers.len(), 1);
        assert_eq!(clients[0].contract_history.len(), 1);
        assert!(clients[0].family_support);
    }

    #[test]
    fn test_save_client_replaces_workers() {
        let dir = tempdir().unwrap();
        let db = open_test_db(&dir);

        let mut client = sample_client("c1", "김이용");
        db.save_client(&client).unwrap();

        client.support_workers.clear();
        db.save_client(&client).unwrap();

        let loaded = db.get_client("c1").unwrap();
        assert!(loaded.support_workers.is_empty());
    }

    #[test]
    fn test_delete_client_removes_workers() {
        let dir = tempdir().unwrap();
        let db = open_test_db(&dir);

        db.save_client(&sample_client("c1", "김이용")).unwrap();
        db.delete_client("c1").unwrap();

        assert!(db.list_clients().unwrap().is_empty());
        assert!(matches!(
            db.get_client("c1"),
            Err(MoaError::ClientNotFound(_))
        ));
        assert!(matches!(
            db.delete_client("c1"),
            Err(MoaError::ClientNotFound(_))
        ));
    }

    #[test]
    fn test_submission_record_roundtrip() {
        let dir = tempdir().unwrap();
        let db = open_test_db(&dir);

        let mut record = MonthSubmission::default();
        record
            .worker_submissions
            .insert("w1".to_string(), Default::default());
        db.save_submission_record("c1-2025-4", "c1", 2025, 4, &record)
            .unwrap();

        let data = db.get_submission_data().unwrap();
        assert_eq!(data.len(), 1);
        assert!(data.get("c1-2025-4").unwrap().worker_submissions.contains_key("w1"));
    }

    #[test]
    fn test_replace_payment_items_only_touches_target_year() {
        let dir = tempdir().unwrap();
        let db = open_test_db(&dir);

        db.replace_payment_items_for_year(
            2024,
            &[sample_item("a", "2024-03-15T09:00", 2)],
        )
        .unwrap();
        db.replace_payment_items_for_year(
            2025,
            &[sample_item("b", "2025-03-15T09:00", 2)],
        )
        .unwrap();

        // 2025년 재업로드: 2025년 것만 교체된다
        db.replace_payment_items_for_year(
            2025,
            &[sample_item("c", "2025-06-01T10:00", 5)],
        )
        .unwrap();

        let all = db.list_payment_items(None).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(db.list_payment_items(Some(2024)).unwrap()[0].id, "a");
        assert_eq!(db.list_payment_items(Some(2025)).unwrap()[0].id, "c");
    }

    #[test]
    fn test_retro_flags_and_settings() {
        let dir = tempdir().unwrap();
        let db = open_test_db(&dir);

        db.set_retro_flag("item-1", true).unwrap();
        db.set_retro_flag("item-1", false).unwrap();
        db.set_retro_flag("item-2", true).unwrap();

        let flags = db.get_retro_flags().unwrap();
        assert_eq!(flags.get("item-1"), Some(&false));
        assert_eq!(flags.get("item-2"), Some(&true));

        assert_eq!(db.get_base_period(2025, 4).unwrap(), (2025, 4));
        db.set_base_period(2026, 0).unwrap();
        assert_eq!(db.get_base_period(2025, 4).unwrap(), (2026, 0));
    }

    #[test]
    fn test_snapshot_and_replace_all_roundtrip() {
        let dir = tempdir().unwrap();
        let db = open_test_db(&dir);

        db.save_client(&sample_client("c1", "김이용")).unwrap();
        db.replace_payment_items_for_year(2025, &[sample_item("a", "2025-03-15T09:00", 2)])
            .unwrap();
        db.set_retro_flag("a", true).unwrap();
        db.set_base_period(2025, 4).unwrap();
        db.append_access_log(&AccessLog {
            user_name: "관리자".to_string(),
            log_type: "login".to_string(),
            timestamp: "2025-05-01T09:00:00Z".to_string(),
        })
        .unwrap();

        let snapshot = db.snapshot(2025, 4).unwrap();
        assert_eq!(snapshot.clients.len(), 1);
        assert_eq!(snapshot.payment_items.len(), 1);
        assert_eq!(snapshot.access_logs.len(), 1);

        // 두 번째 DB에 그대로 복원
        let dir2 = tempdir().unwrap();
        let db2 = open_test_db(&dir2);
        db2.replace_all(&snapshot).unwrap();

        let restored = db2.snapshot(0, 0).unwrap();
        assert_eq!(restored.base_year, 2025);
        assert_eq!(restored.base_month, 4);
        assert_eq!(restored.clients.len(), 1);
        assert_eq!(restored.clients[0].support_workers.len(), 1);
        assert_eq!(restored.payment_items[0].id, "a");
        assert_eq!(restored.retroactive_submissions.get("a"), Some(&true));
        assert_eq!(restored.access_logs.len(), 1);
    }
}
