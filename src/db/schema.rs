//! Database Schema
//!
//! SQLite 테이블 스키마 정의

/// 데이터베이스 스키마 생성 SQL
pub const CREATE_SCHEMA: &str = r#"
PRAGMA foreign_keys = ON;

-- 이용인 테이블
CREATE TABLE IF NOT EXISTS clients (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    dob TEXT NOT NULL,
    contract_start TEXT NOT NULL DEFAULT '',
    contract_end TEXT NOT NULL DEFAULT '',
    contract_history_json TEXT NOT NULL DEFAULT '[]',  -- JSON Array
    family_support INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_clients_name ON clients(name);

-- 활동지원사 테이블 (이용인에 종속)
CREATE TABLE IF NOT EXISTS support_workers (
    id TEXT PRIMARY KEY,
    client_id TEXT NOT NULL,
    name TEXT NOT NULL,
    dob TEXT NOT NULL,
    service_start TEXT NOT NULL DEFAULT '',
    service_end TEXT NOT NULL DEFAULT '',
    FOREIGN KEY (client_id) REFERENCES clients(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_support_workers_client ON support_workers(client_id);

-- 월별 제출 레코드: key = {clientId}-{year}-{monthIndex}
CREATE TABLE IF NOT EXISTS submissions (
    key TEXT PRIMARY KEY,
    client_id TEXT NOT NULL,
    year INTEGER NOT NULL,
    month INTEGER NOT NULL,
    no_work INTEGER NOT NULL DEFAULT 0,
    workers_json TEXT NOT NULL DEFAULT '{}'  -- workerId -> 서류별 체크 상태
);

CREATE INDEX IF NOT EXISTS idx_submissions_client ON submissions(client_id);
CREATE INDEX IF NOT EXISTS idx_submissions_year ON submissions(year);

-- 엑셀 업로드에서 파생된 결제 내역 (연도 단위로 통째 교체)
CREATE TABLE IF NOT EXISTS payment_items (
    id TEXT PRIMARY KEY,
    year INTEGER NOT NULL,
    client_name TEXT NOT NULL,
    client_dob TEXT NOT NULL DEFAULT '',
    service_start TEXT NOT NULL,
    service_end TEXT NOT NULL DEFAULT '',
    worker_name TEXT NOT NULL DEFAULT '',
    worker_dob TEXT NOT NULL DEFAULT '',
    payment_type TEXT NOT NULL DEFAULT '',
    return_type TEXT NOT NULL DEFAULT '',
    reason TEXT,
    month INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_payment_items_year ON payment_items(year);
CREATE INDEX IF NOT EXISTS idx_payment_items_month ON payment_items(year, month);

-- 소급결제 항목별 증빙 확인 체크
CREATE TABLE IF NOT EXISTS retro_submissions (
    item_id TEXT PRIMARY KEY,
    checked INTEGER NOT NULL DEFAULT 0
);

-- 접속 기록 (다중 작업자 경고용)
CREATE TABLE IF NOT EXISTS access_logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_name TEXT NOT NULL,
    log_type TEXT NOT NULL CHECK (log_type IN ('login', 'logout')),
    timestamp TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_access_logs_user ON access_logs(user_name);

-- 키-값 설정 (기준 연/월, 관리자 비밀번호 등)
CREATE TABLE IF NOT EXISTS settings (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;
