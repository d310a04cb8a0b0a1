//! Payment Sheet Ingestion
//!
//! 결제 내역 엑셀(.xlsx/.xls)을 읽어 PaymentItem 목록으로 변환하고,
//! 소급/예외·미등록(비정상)·반납 여부를 분류한다.

use std::path::Path;

use calamine::{open_workbook_auto, Data, DataType, Reader};
use chrono::{Datelike, NaiveDateTime};

use crate::dates::{normalize_dob, parse_datetime_flexible};
use crate::error::MoaError;
use crate::models::{Client, PaymentItem};

/// 시트 셀 값. calamine 의존 없이 행 파싱 로직을 테스트하기 위한 경계 타입.
#[derive(Debug, Clone, PartialEq)]
pub enum SheetCell {
    Empty,
    Text(String),
    Date(NaiveDateTime),
}

impl SheetCell {
    fn from_data(data: &Data) -> SheetCell {
        match data {
            Data::Empty => SheetCell::Empty,
            Data::String(s) => SheetCell::Text(s.clone()),
            Data::Float(f) => SheetCell::Text(trim_float(*f)),
            Data::Int(i) => SheetCell::Text(i.to_string()),
            Data::Bool(b) => SheetCell::Text(b.to_string()),
            Data::Error(_) => SheetCell::Empty,
            other => match other.as_datetime() {
                Some(dt) => SheetCell::Date(dt),
                None => SheetCell::Text(other.to_string()),
            },
        }
    }
}

// 123.0 → "123" (생년월일이 숫자 셀로 들어오는 경우 대비)
fn trim_float(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

fn cell_text(cell: &SheetCell) -> String {
    match cell {
        SheetCell::Empty => String::new(),
        SheetCell::Text(s) => s.trim().to_string(),
        SheetCell::Date(dt) => dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
    }
}

/// 생년월일 셀 → 정규화된 `YYYY-MM-DD`.
/// 엑셀 날짜 셀은 달력 필드로 직접 포맷하고, 문자열은 정규화를 거친다.
pub fn dob_from_cell(cell: &SheetCell) -> String {
    match cell {
        SheetCell::Date(dt) => dt.format("%Y-%m-%d").to_string(),
        _ => normalize_dob(&cell_text(cell)),
    }
}

fn datetime_from_cell(cell: &SheetCell) -> Option<NaiveDateTime> {
    match cell {
        SheetCell::Date(dt) => Some(*dt),
        SheetCell::Text(s) => parse_datetime_flexible(s),
        SheetCell::Empty => None,
    }
}

/// 열 인덱스 매핑. 헤더 이름 기반 매핑과 고정 위치 폴백 둘 다 이 형태로 수렴한다.
#[derive(Debug, Clone)]
struct ColumnMap {
    client_name: usize,
    client_dob: usize,
    service_start: usize,
    service_end: Option<usize>,
    worker_name: Option<usize>,
    worker_dob: Option<usize>,
    payment_type: Option<usize>,
    return_type: Option<usize>,
    reason: Option<usize>,
}

impl ColumnMap {
    /// 원본 양식의 고정 열 순서:
    /// 대상자명, 생년월일, 서비스시작, 서비스종료, 제공인력명, 제공인력생년월일,
    /// (있으면) 결제구분, 반납구분, 사유
    fn positional() -> ColumnMap {
        ColumnMap {
            client_name: 0,
            client_dob: 1,
            service_start: 2,
            service_end: Some(3),
            worker_name: Some(4),
            worker_dob: Some(5),
            payment_type: Some(6),
            return_type: Some(7),
            reason: Some(8),
        }
    }
}

/// 헤더 행에서 열 매핑을 추정. 공백 제거 후 부분 문자열 일치로 찾는다.
/// "생년월일"처럼 두 열에 나타나는 헤더는 "제공인력" 포함 여부로 구분한다.
fn resolve_columns(header: &[SheetCell]) -> Option<ColumnMap> {
    let names: Vec<String> = header
        .iter()
        .map(|c| cell_text(c).split_whitespace().collect::<String>())
        .collect();

    let find = |pred: &dyn Fn(&str) -> bool| -> Option<usize> {
        names.iter().position(|n| !n.is_empty() && pred(n))
    };

    let client_name = find(&|n| n.contains("대상자명") || n.contains("이용인명"))?;
    let service_start = find(&|n| n.contains("서비스시작"))?;
    let client_dob = find(&|n| n.contains("생년월일") && !n.contains("제공인력"))?;

    Some(ColumnMap {
        client_name,
        client_dob,
        service_start,
        service_end: find(&|n| n.contains("서비스종료")),
        worker_name: find(&|n| n.contains("제공인력명")),
        worker_dob: find(&|n| n.contains("제공인력") && n.contains("생년월일")),
        payment_type: find(&|n| n.contains("결제구분")),
        return_type: find(&|n| n.contains("반납구분")),
        reason: find(&|n| n.contains("사유")),
    })
}

/// JS 원본과 동일한 32비트 롤링 해시: `hash = hash*31 + code` (UTF-16 코드 유닛)
pub fn simple_hash(s: &str) -> i32 {
    let mut hash: i32 = 0;
    for code in s.encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(code as i32);
    }
    hash
}

fn get(row: &[SheetCell], idx: usize) -> SheetCell {
    row.get(idx).cloned().unwrap_or(SheetCell::Empty)
}

fn get_opt(row: &[SheetCell], idx: Option<usize>) -> SheetCell {
    idx.map(|i| get(row, i)).unwrap_or(SheetCell::Empty)
}

/// 시트 행들을 PaymentItem 목록으로 변환.
///
/// - 첫 행은 헤더: 이름 매핑이 되면 그것을, 안 되면 고정 열 순서를 쓴다.
/// - 이용인 이름 또는 서비스 시작이 없는/파싱 불가한 행은 건너뛴다.
/// - 서비스 시작 연도가 `expected_year`와 다른 행도 건너뛴다
///   (연도별 업로드이므로 타 연도 행은 오류가 아니라 배제 대상).
pub fn parse_payment_rows(
    rows: &[Vec<SheetCell>],
    expected_year: i32,
    uploaded_at: i64,
) -> Result<Vec<PaymentItem>, MoaError> {
    if rows.is_empty() {
        return Err(MoaError::Workbook(
            "시트에 데이터가 없습니다".to_string(),
        ));
    }

    let columns = match resolve_columns(&rows[0]) {
        Some(map) => map,
        // 헤더 매핑 실패 시 원본 양식의 고정 열 순서로 폴백하되,
        // 열이 최소한(이름·생년월일·시작시간)도 안 되는 시트는 업로드 전체를 거부한다
        None if rows[0].len() >= 3 => ColumnMap::positional(),
        None => {
            return Err(MoaError::Workbook(
                "필수 컬럼을 찾을 수 없습니다".to_string(),
            ))
        }
    };

    let mut items = Vec::new();
    for (index, row) in rows.iter().enumerate().skip(1) {
        let client_name = cell_text(&get(row, columns.client_name));
        if client_name.is_empty() {
            continue;
        }

        let start_cell = get(row, columns.service_start);
        let Some(service_start) = datetime_from_cell(&start_cell) else {
            log::warn!("결제 내역 {}행: 서비스 시작 시간 파싱 불가, 건너뜀", index + 1);
            continue;
        };
        if service_start.year() != expected_year {
            continue;
        }

        let client_dob = dob_from_cell(&get(row, columns.client_dob));
        let worker_name = cell_text(&get_opt(row, columns.worker_name));
        let worker_dob = dob_from_cell(&get_opt(row, columns.worker_dob));
        let service_start_text = cell_text(&start_cell);
        let service_end_text = cell_text(&get_opt(row, columns.service_end));
        let reason = cell_text(&get_opt(row, columns.reason));

        let identity = format!(
            "{}|{}|{}|{}|{}",
            client_name, client_dob, service_start_text, worker_name, index
        );
        let id = format!("{}-{}-{}", simple_hash(&identity), index, uploaded_at);

        items.push(PaymentItem {
            id,
            client_name,
            client_dob,
            service_start: service_start_text,
            service_end: service_end_text,
            worker_name,
            worker_dob,
            payment_type: cell_text(&get_opt(row, columns.payment_type)),
            return_type: cell_text(&get_opt(row, columns.return_type)),
            reason: if reason.is_empty() { None } else { Some(reason) },
            month: service_start.month0(),
        });
    }

    Ok(items)
}

/// 엑셀 파일을 열어 첫 번째 시트를 파싱한다.
/// 파일/시트 자체가 손상된 경우는 전체 실패, 개별 행 문제는 행 단위로 건너뛴다.
pub fn parse_payment_workbook(
    path: &Path,
    expected_year: i32,
) -> Result<Vec<PaymentItem>, MoaError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| MoaError::Workbook(format!("엑셀 파일을 열 수 없습니다: {}", e)))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| MoaError::Workbook("시트가 없습니다".to_string()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| MoaError::Workbook(format!("시트를 읽을 수 없습니다: {}", e)))?;

    let rows: Vec<Vec<SheetCell>> = range
        .rows()
        .map(|row| row.iter().map(SheetCell::from_data).collect())
        .collect();

    let uploaded_at = chrono::Utc::now().timestamp_millis();
    let items = parse_payment_rows(&rows, expected_year, uploaded_at)?;
    log::info!(
        "결제 내역 업로드: {}년 {}건 ({} 시트)",
        expected_year,
        items.len(),
        sheet_name
    );
    Ok(items)
}

/// 반납/과오 항목 여부. 해당 항목은 모든 제출 판정에서 제외된다.
pub fn is_excluded(item: &PaymentItem) -> bool {
    item.return_type.contains("반납") || item.return_type.contains("과오")
}

/// 소급/예외 결제 여부 (부분 문자열 판정 — 결합 라벨 허용)
pub fn is_retro_exception(item: &PaymentItem) -> bool {
    item.payment_type.contains("소급") || item.payment_type.contains("예외")
}

/// 항목의 서비스 시작 연도
pub fn item_year(item: &PaymentItem) -> Option<i32> {
    parse_datetime_flexible(&item.service_start).map(|dt| dt.year())
}

/// 결제 내역 ↔ 명부 상의 사람 매칭.
/// 안정적인 ID가 없어 (이름, 정규화 생년월일) 자연키로 비교한다.
/// ID 조인으로 바꾸려면 이 함수만 교체하면 된다.
pub fn matches_person(item_name: &str, item_dob: &str, name: &str, dob: &str) -> bool {
    item_name.trim() == name.trim() && normalize_dob(item_dob) == normalize_dob(dob)
}

fn matches_client(item: &PaymentItem, client: &Client) -> bool {
    matches_person(&item.client_name, &item.client_dob, &client.name, &client.dob)
}

/// 미등록(비정상) 결제: 해당 연도, 반납 아님, 명부의 어떤 이용인과도 매칭 안 됨
pub fn abnormal_payments<'a>(
    items: &'a [PaymentItem],
    clients: &[Client],
    year: i32,
) -> Vec<&'a PaymentItem> {
    items
        .iter()
        .filter(|item| item_year(item) == Some(year))
        .filter(|item| !is_excluded(item))
        .filter(|item| !clients.iter().any(|c| matches_client(item, c)))
        .collect()
}

/// 소급/예외 결제: 해당 연도, 반납 아님, 결제구분에 소급/예외 포함
pub fn retro_exception_payments<'a>(items: &'a [PaymentItem], year: i32) -> Vec<&'a PaymentItem> {
    items
        .iter()
        .filter(|item| item_year(item) == Some(year))
        .filter(|item| !is_excluded(item))
        .filter(|item| is_retro_exception(item))
        .collect()
}

/// 특정 (이용인, 지원사, 연, 월)의 소급/예외 증빙 대상 항목
pub fn retro_items_for_worker<'a>(
    items: &'a [PaymentItem],
    client: &Client,
    worker_name: &str,
    worker_dob: &str,
    year: i32,
    month_index: u32,
) -> Vec<&'a PaymentItem> {
    items
        .iter()
        .filter(|item| item.month == month_index)
        .filter(|item| item_year(item) == Some(year))
        .filter(|item| !is_excluded(item))
        .filter(|item| is_retro_exception(item))
        .filter(|item| matches_client(item, client))
        .filter(|item| matches_person(&item.worker_name, &item.worker_dob, worker_name, worker_dob))
        .collect()
}
