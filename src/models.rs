//! MoaDocs Data Models
//!
//! 프론트엔드 TypeScript 타입과 매핑되는 Rust 데이터 모델

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// 계약 기간 (종료일이 빈 문자열이면 진행 중 계약)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractPeriod {
    pub start: String,
    #[serde(default)]
    pub end: String,
}

/// 활동지원사 서비스 제공 기간
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicePeriod {
    pub start: String,
    #[serde(default)]
    pub end: String,
}

/// 활동지원사 (이용인에 소속, 이용인 삭제 시 함께 삭제)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportWorker {
    pub id: String,
    pub name: String,
    pub dob: String,
    pub service_period: ServicePeriod,
}

/// 이용인
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,
    pub dob: String,
    /// 최신 계약 기간의 시작일 (표시용)
    pub contract_start: String,
    /// 최신 계약 기간의 종료일 (표시용)
    pub contract_end: String,
    /// 전체 계약 이력. 비어 있으면 contract_start/end 를 단일 기간으로 사용
    #[serde(default)]
    pub contract_history: Vec<ContractPeriod>,
    #[serde(default)]
    pub support_workers: Vec<SupportWorker>,
    #[serde(default)]
    pub family_support: bool,
}

impl Client {
    /// 활동 판정에 사용할 계약 기간 목록.
    /// 이력이 있으면 이력 전체, 없으면 메인 시작/종료일 하나.
    pub fn contract_periods(&self) -> Vec<ContractPeriod> {
        if !self.contract_history.is_empty() {
            self.contract_history.clone()
        } else {
            vec![ContractPeriod {
                start: self.contract_start.clone(),
                end: self.contract_end.clone(),
            }]
        }
    }
}

/// 월별 서류 제출 체크 상태 (지원사 1명 기준)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerSubmissionStatus {
    #[serde(default)]
    pub schedule: bool,
    #[serde(default)]
    pub weekly_report: bool,
    #[serde(default)]
    pub retroactive_payment: bool,
}

/// (이용인, 연, 월) 단위 제출 레코드
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSubmission {
    #[serde(default)]
    pub no_work: bool,
    #[serde(default)]
    pub worker_submissions: HashMap<String, WorkerSubmissionStatus>,
}

/// 제출 데이터 전체: `{clientId}-{year}-{monthIndex}` 키 → 월 레코드
pub type SubmissionData = HashMap<String, MonthSubmission>;

/// 결제 항목 ID → 증빙 확인 여부
pub type RetroactiveSubmissionStatus = HashMap<String, bool>;

/// 엑셀 업로드에서 파생되는 결제 내역 항목
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentItem {
    pub id: String,
    pub client_name: String,
    pub client_dob: String,
    pub service_start: String,
    pub service_end: String,
    pub worker_name: String,
    pub worker_dob: String,
    /// 결제구분 (소급, 예외, 일반 등 자유 텍스트)
    #[serde(default)]
    pub payment_type: String,
    /// 반납구분 (반납, 과오 등 자유 텍스트)
    #[serde(default)]
    pub return_type: String,
    /// 소급결제 사유
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// service_start 기준 0-11 월 인덱스
    pub month: u32,
}

/// 접속 기록 (다중 작업자 경고용, 잠금 아님)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessLog {
    pub user_name: String,
    /// "login" | "logout"
    #[serde(rename = "type")]
    pub log_type: String,
    pub timestamp: String,
}

/// 관리자 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// 백업/공유용 데이터 파일 전체 구조 (JSON)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataFile {
    pub base_year: i32,
    pub base_month: u32,
    pub clients: Vec<Client>,
    #[serde(default)]
    pub submission_data: SubmissionData,
    #[serde(default)]
    pub payment_items: Vec<PaymentItem>,
    #[serde(default)]
    pub retroactive_submissions: RetroactiveSubmissionStatus,
    #[serde(default)]
    pub access_logs: Vec<AccessLog>,
    #[serde(default)]
    pub admin_settings: AdminSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<String>,
}
