//! Submission Status
//!
//! 이용인 × 월 × 서류 종류별 제출 상태 판정과 제출 레코드 갱신.
//! 상태 계산은 저장 없이 매번 파생되고, 사용자가 직접 바꾸는 것은
//! 월 레코드(근무없음 + 지원사별 체크)와 소급 항목별 증빙 체크뿐이다.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::dates::{get_submission_key, is_client_active_in_month, is_worker_active_in_month};
use crate::models::{
    Client, MonthSubmission, PaymentItem, RetroactiveSubmissionStatus, SubmissionData,
    SupportWorker, WorkerSubmissionStatus,
};
use crate::payments::retro_items_for_worker;

/// 서류 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocType {
    Schedule,
    WeeklyReport,
    RetroactivePayment,
}

impl DocType {
    /// 화면 표기용 한글 이름
    pub fn label(&self) -> &'static str {
        match self {
            DocType::Schedule => "일정표",
            DocType::WeeklyReport => "주간업무보고",
            DocType::RetroactivePayment => "소급결제",
        }
    }
}

/// 상태 라벨. 우선순위 순서는 `get_status` 참고.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusLabel {
    NoContract,
    NotApplicable,
    NoWorkers,
    NoWork,
    Submitted,
    Missing,
}

impl StatusLabel {
    /// 화면 표기용 한글 텍스트
    pub fn text(&self) -> &'static str {
        match self {
            StatusLabel::NoContract => "미계약",
            StatusLabel::NotApplicable => "해당없음",
            StatusLabel::NoWorkers => "지원사 X",
            StatusLabel::NoWork => "근무없음",
            StatusLabel::Submitted => "유",
            StatusLabel::Missing => "무",
        }
    }
}

/// 상태 그리드의 셀 하나
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCell {
    pub label: StatusLabel,
    pub text: &'static str,
    pub editable: bool,
}

impl StatusCell {
    fn locked(label: StatusLabel) -> StatusCell {
        StatusCell {
            label,
            text: label.text(),
            editable: false,
        }
    }

    fn new(label: StatusLabel, editable: bool) -> StatusCell {
        StatusCell {
            label,
            text: label.text(),
            editable,
        }
    }
}

/// 셀 편집 가능 여부: 보고 기간이 시작/마감된 달만 편집하되,
/// 일정표는 다음 달 것을 미리 제출할 수 있다.
pub fn cell_editable(month_index: u32, doc_type: DocType, base_month: u32) -> bool {
    month_index <= base_month
        || (month_index == base_month + 1 && doc_type == DocType::Schedule)
}

/// 근무없음 플래그는 이미 시작된 달에만 설정할 수 있다
pub fn no_work_editable(month_index: u32, base_month: u32) -> bool {
    month_index <= base_month
}

fn active_workers(client: &Client, year: i32, month_index: u32) -> Vec<&SupportWorker> {
    client
        .support_workers
        .iter()
        .filter(|w| is_worker_active_in_month(w, year, month_index))
        .collect()
}

fn worker_flag(
    record: Option<&MonthSubmission>,
    worker_id: &str,
    doc_type: DocType,
) -> bool {
    record
        .and_then(|r| r.worker_submissions.get(worker_id))
        .map(|s| match doc_type {
            DocType::Schedule => s.schedule,
            DocType::WeeklyReport => s.weekly_report,
            DocType::RetroactivePayment => s.retroactive_payment,
        })
        .unwrap_or(false)
}

/// 상태 판정. 우선순위가 엄격히 고정된 결정 테이블:
/// 미계약 → 해당없음(미래) → 지원사 없음 → 근무없음 → 제출/미제출
pub fn get_status(
    client: &Client,
    month_index: u32,
    doc_type: DocType,
    submission_data: &SubmissionData,
    payment_items: &[PaymentItem],
    base_year: i32,
    base_month: u32,
) -> StatusCell {
    // 1. 해당 월에 계약이 없으면 다른 어떤 값과도 무관하게 미계약
    if !is_client_active_in_month(client, base_year, month_index) {
        return StatusCell::locked(StatusLabel::NoContract);
    }

    // 2-3. 미래 월: 다음 달은 일정표만 미리 낼 수 있고, 그 이후는 전부 해당없음
    if month_index > base_month + 1 {
        return StatusCell::locked(StatusLabel::NotApplicable);
    }
    if month_index == base_month + 1 && doc_type != DocType::Schedule {
        return StatusCell::locked(StatusLabel::NotApplicable);
    }

    let editable = cell_editable(month_index, doc_type, base_month);

    // 4. 활동 중인 지원사가 없으면 입력 오류 상태로 표시 (수정 가능)
    let workers = active_workers(client, base_year, month_index);
    if workers.is_empty() {
        return StatusCell::new(StatusLabel::NoWorkers, editable);
    }

    let key = get_submission_key(&client.id, base_year, month_index);
    let record = submission_data.get(&key);

    // 5. 근무없음으로 표시된 달
    if record.map(|r| r.no_work).unwrap_or(false) {
        return StatusCell::new(StatusLabel::NoWork, editable);
    }

    // 6. 소급결제: 증빙 대상 항목이 있는 지원사들만 놓고 전원 제출 여부 판정
    if doc_type == DocType::RetroactivePayment {
        let with_retro: Vec<&&SupportWorker> = workers
            .iter()
            .filter(|w| {
                !retro_items_for_worker(
                    payment_items,
                    client,
                    &w.name,
                    &w.dob,
                    base_year,
                    month_index,
                )
                .is_empty()
            })
            .collect();

        if with_retro.is_empty() {
            return StatusCell::locked(StatusLabel::NotApplicable);
        }

        let all_submitted = with_retro
            .iter()
            .all(|w| worker_flag(record, &w.id, DocType::RetroactivePayment));
        return StatusCell::new(
            if all_submitted {
                StatusLabel::Submitted
            } else {
                StatusLabel::Missing
            },
            editable,
        );
    }

    // 7. 일정표/주간업무보고: 활동 중인 지원사 전원이 체크되어야 제출
    let all_submitted = workers
        .iter()
        .all(|w| worker_flag(record, &w.id, doc_type));
    StatusCell::new(
        if all_submitted {
            StatusLabel::Submitted
        } else {
            StatusLabel::Missing
        },
        editable,
    )
}

/// 월 레코드 갱신 요청. 근무없음 설정이거나 지원사 1명의 서류 1종 체크.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionUpdate {
    #[serde(default)]
    pub no_work: Option<bool>,
    #[serde(default)]
    pub worker_id: Option<String>,
    #[serde(default)]
    pub doc_type: Option<DocType>,
    #[serde(default)]
    pub value: Option<bool>,
}

/// 월 레코드를 깊은 복사 후 통째로 교체하는 방식의 갱신.
/// 근무없음을 켜면 같은 갱신 안에서 그 달의 모든 지원사 체크가 해제된다.
pub fn apply_submission_update(
    data: &mut SubmissionData,
    client_id: &str,
    year: i32,
    month_index: u32,
    update: &SubmissionUpdate,
) {
    let key = get_submission_key(client_id, year, month_index);
    let mut record = data.get(&key).cloned().unwrap_or_default();

    if let Some(no_work) = update.no_work {
        record.no_work = no_work;
        if no_work {
            for status in record.worker_submissions.values_mut() {
                *status = WorkerSubmissionStatus::default();
            }
        }
    }

    if let (Some(worker_id), Some(doc_type), Some(value)) =
        (&update.worker_id, update.doc_type, update.value)
    {
        let status = record
            .worker_submissions
            .entry(worker_id.clone())
            .or_default();
        match doc_type {
            DocType::Schedule => status.schedule = value,
            DocType::WeeklyReport => status.weekly_report = value,
            DocType::RetroactivePayment => status.retroactive_payment = value,
        }
    }

    data.insert(key, record);
}

/// 소급 증빙 재조정: 항목별 체크가 원본이고, 지원사별 소급 플래그는
/// "그 지원사의 증빙 대상 항목이 전부 체크됨"의 파생값이다.
/// 저장된 플래그와 달라진 지원사 목록을 (workerId, 새 값)으로 돌려준다.
pub fn reconcile_retroactive(
    client: &Client,
    year: i32,
    month_index: u32,
    payment_items: &[PaymentItem],
    retro_flags: &RetroactiveSubmissionStatus,
    submission_data: &SubmissionData,
) -> Vec<(String, bool)> {
    let key = get_submission_key(&client.id, year, month_index);
    let record = submission_data.get(&key);

    let mut changes = Vec::new();
    for worker in active_workers(client, year, month_index) {
        let items = retro_items_for_worker(
            payment_items,
            client,
            &worker.name,
            &worker.dob,
            year,
            month_index,
        );
        if items.is_empty() {
            continue;
        }

        let aggregate = items
            .iter()
            .all(|item| retro_flags.get(&item.id).copied().unwrap_or(false));
        let stored = worker_flag(record, &worker.id, DocType::RetroactivePayment);
        if aggregate != stored {
            changes.push((worker.id.clone(), aggregate));
        }
    }
    changes
}

/// 연도 구분이 없는 구형 키(`{id}-{month}`)를 현재 형식
/// (`{id}-{year}-{month}`)으로 재작성한다. 키는 오른쪽부터 해석하므로
/// 하이픈이 들어간 ID도 살아남는다. 이미 새 형식인 키는 건드리지 않고,
/// 같은 새 키가 이미 있으면 덮어쓰지 않는다 (멱등).
pub fn migrate_legacy_keys<V: Clone>(map: &HashMap<String, V>, base_year: i32) -> (HashMap<String, V>, bool) {
    let mut migrated: HashMap<String, V> = HashMap::new();
    let mut changed = false;

    // 새 형식 키를 먼저 옮겨 두어야 구형 키가 덮어쓰지 못한다
    for (key, value) in map {
        if !is_legacy_key(key) {
            migrated.insert(key.clone(), value.clone());
        }
    }

    for (key, value) in map {
        if !is_legacy_key(key) {
            continue;
        }
        let parts: Vec<&str> = key.split('-').collect();
        let month_part = parts[parts.len() - 1];
        let Ok(month_index) = month_part.parse::<u32>() else {
            // 월을 읽을 수 없으면 손대지 않는다
            migrated.insert(key.clone(), value.clone());
            continue;
        };
        let id_part = parts[..parts.len() - 1].join("-");
        let new_key = get_submission_key(&id_part, base_year, month_index);
        if !migrated.contains_key(&new_key) {
            migrated.insert(new_key, value.clone());
        }
        changed = true;
    }

    (migrated, changed)
}

fn is_legacy_key(key: &str) -> bool {
    let parts: Vec<&str> = key.split('-').collect();
    if parts.len() < 2 {
        return false;
    }
    let second_last = parts[parts.len() - 2];
    let is_year = second_last.len() == 4 && second_last.bytes().all(|b| b.is_ascii_digit());
    !is_year
}
