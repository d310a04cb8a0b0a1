//! Date Utilities
//!
//! 생년월일 정규화, 제출 키 생성, 월 단위 계약/서비스 기간 판정

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};

use crate::models::{Client, ContractPeriod, SupportWorker};

/// 종료일이 비어 있는 "진행 중" 기간에 사용하는 먼 미래 날짜
pub const OPEN_END_SENTINEL: &str = "2099-12-31";

fn open_end_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2099, 12, 31).expect("valid sentinel date")
}

/// 생년월일 문자열을 `YYYY-MM-DD`로 정규화.
/// 인식 불가능한 형식은 trim만 해서 그대로 돌려준다 (에러 아님).
pub fn normalize_dob(input: &str) -> String {
    normalize_dob_at(input, Local::now().year())
}

/// `normalize_dob`의 테스트 가능한 내부 구현. 6자리 `YYMMDD`의 세기 보정은
/// 2000년대를 먼저 가정하고, 결과 연도가 `current_year`를 넘으면 1900년대로
/// 내린다.
pub fn normalize_dob_at(input: &str, current_year: i32) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    // YYYY[-/.]?MM[-/.]?DD 접두 패턴 (뒤에 다른 문자가 붙어 있어도 허용)
    if let Some((y, m, d)) = match_ymd_prefix(trimmed) {
        return format!("{}-{}-{}", y, m, d);
    }

    let digits: String = trimmed.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() == 8 {
        return format!("{}-{}-{}", &digits[0..4], &digits[4..6], &digits[6..8]);
    }

    if digits.len() == 6 {
        let yy: i32 = digits[0..2].parse().unwrap_or(0);
        let mut full_year = 2000 + yy;
        if full_year > current_year {
            full_year = 1900 + yy;
        }
        return format!("{}-{}-{}", full_year, &digits[2..4], &digits[4..6]);
    }

    trimmed.to_string()
}

fn match_ymd_prefix(s: &str) -> Option<(String, String, String)> {
    let bytes = s.as_bytes();
    let mut pos = 0usize;

    // 바이트 단위로 먼저 검사해야 한글 등 멀티바이트 입력에서 안전하다
    let take_digits = |n: usize, pos: &mut usize| -> Option<String> {
        let end = *pos + n;
        if bytes.len() < end || !bytes[*pos..end].iter().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let slice = std::str::from_utf8(&bytes[*pos..end]).ok()?.to_string();
        *pos = end;
        Some(slice)
    };
    let skip_sep = |pos: &mut usize| {
        if let Some(&b) = bytes.get(*pos) {
            if b == b'-' || b == b'/' || b == b'.' {
                *pos += 1;
            }
        }
    };

    let y = take_digits(4, &mut pos)?;
    skip_sep(&mut pos);
    let m = take_digits(2, &mut pos)?;
    skip_sep(&mut pos);
    let d = take_digits(2, &mut pos)?;
    Some((y, m, d))
}

/// 정규화된 생년월일을 6자리 `YYMMDD`로 축약.
/// 6/8자리를 추출할 수 없으면 입력을 그대로 돌려준다.
pub fn format_dob_to_yymmdd(dob: &str) -> String {
    if dob.trim().is_empty() {
        return String::new();
    }
    let normalized = normalize_dob(dob);
    let parts: Vec<&str> = normalized.split('-').collect();
    if parts.len() == 3 && parts[0].len() == 4 && parts[0].bytes().all(|b| b.is_ascii_digit()) {
        return format!("{}{}{}", &parts[0][2..], parts[1], parts[2]);
    }
    let digits: String = normalized.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == 6 {
        return digits;
    }
    dob.to_string()
}

/// 제출 데이터 키: `{clientId}-{year}-{monthIndex}`
pub fn get_submission_key(client_id: &str, year: i32, month_index: u32) -> String {
    format!("{}-{}-{}", client_id, year, month_index)
}

/// 날짜 문자열을 관대하게 파싱. 날짜만, 혹은 날짜+시각 형식 모두 허용.
pub fn parse_date_flexible(s: &str) -> Option<NaiveDate> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    parse_datetime_flexible(trimmed)
        .map(|dt| dt.date())
        // 정규화를 거치면 "19900101" 같은 형식도 수용된다
        .or_else(|| NaiveDate::parse_from_str(&normalize_dob(trimmed), "%Y-%m-%d").ok())
}

/// 서비스 시작/종료 같은 타임스탬프 문자열 파싱 (`2025-03-15T09:00` 등)
pub fn parse_datetime_flexible(s: &str) -> Option<NaiveDateTime> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    for fmt in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt);
        }
    }
    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// (연, 0-based 월 인덱스)의 첫날과 마지막 날
pub fn month_bounds(year: i32, month_index: u32) -> Option<(NaiveDate, NaiveDate)> {
    if month_index > 11 {
        return None;
    }
    let month = month_index + 1;
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((start, next.pred_opt()?))
}

/// 기간 목록 중 하나라도 해당 (연, 월)과 겹치면 true.
/// 시작일이 없거나 파싱 불가능한 기간은 매칭되지 않고,
/// 종료일이 빈 기간은 진행 중으로 보아 먼 미래까지 유효하다.
pub fn is_active_in_month(periods: &[ContractPeriod], year: i32, month_index: u32) -> bool {
    let Some((month_start, month_end)) = month_bounds(year, month_index) else {
        return false;
    };

    periods.iter().any(|period| {
        let Some(start) = parse_date_flexible(&period.start) else {
            return false;
        };
        let end = if period.end.trim().is_empty() {
            open_end_date()
        } else {
            // 비어 있지 않은데 파싱이 안 되는 종료일은 매칭하지 않는다
            let Some(end) = parse_date_flexible(&period.end) else {
                return false;
            };
            end
        };

        start <= month_end && end >= month_start
    })
}

/// 이용인이 해당 월에 계약 중인지 (계약 이력 전체 기준)
pub fn is_client_active_in_month(client: &Client, year: i32, month_index: u32) -> bool {
    is_active_in_month(&client.contract_periods(), year, month_index)
}

/// 활동지원사가 해당 월에 서비스 제공 기간에 속하는지
pub fn is_worker_active_in_month(worker: &SupportWorker, year: i32, month_index: u32) -> bool {
    let period = ContractPeriod {
        start: worker.service_period.start.clone(),
        end: worker.service_period.end.clone(),
    };
    is_active_in_month(std::slice::from_ref(&period), year, month_index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ServicePeriod;

    fn period(start: &str, end: &str) -> ContractPeriod {
        ContractPeriod {
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    #[test]
    fn test_normalize_dob_passthrough_formats() {
        assert_eq!(normalize_dob_at("1990-01-01", 2025), "1990-01-01");
        assert_eq!(normalize_dob_at("1990/05/15", 2025), "1990-05-15");
        assert_eq!(normalize_dob_at("1990.05.15", 2025), "1990-05-15");
        assert_eq!(normalize_dob_at("19900515", 2025), "1990-05-15");
        // 접두 일치: 뒤에 시간이 붙어 있어도 날짜 부분만 사용
        assert_eq!(normalize_dob_at("1990-05-15 00:00", 2025), "1990-05-15");
    }

    #[test]
    fn test_normalize_dob_eight_digits_with_noise() {
        // 숫자만 남겼을 때 8자리면 YYYYMMDD
        assert_eq!(normalize_dob_at("생년월일: 1988년05월15일", 2025), "1988-05-15");
    }

    #[test]
    fn test_normalize_dob_six_digit_century() {
        assert_eq!(normalize_dob_at("900101", 2025), "1990-01-01");
        assert_eq!(normalize_dob_at("050101", 2025), "2005-01-01");
        assert_eq!(normalize_dob_at("980312", 2025), "1998-03-12");
        assert_eq!(normalize_dob_at("250101", 2025), "2025-01-01");
    }

    #[test]
    fn test_century_divergence_vs_fixed_rule() {
        // 고정 임계값(<50 → 2000년대) 규칙이면 2030-01-01이 되지만,
        // 동적 규칙에서는 2030 > 2025 이므로 1930년대로 내린다.
        assert_eq!(normalize_dob_at("300101", 2025), "1930-01-01");
        // 시간이 흘러 2031년이 되면 같은 입력이 2030년대로 해석된다
        assert_eq!(normalize_dob_at("300101", 2031), "2030-01-01");
    }

    #[test]
    fn test_normalize_dob_six_digit_never_exceeds_current_year() {
        for yy in 0..100 {
            let input = format!("{:02}0101", yy);
            let out = normalize_dob_at(&input, 2025);
            let year: i32 = out[0..4].parse().unwrap();
            assert!(year <= 2025, "{} -> {}", input, out);
        }
    }

    #[test]
    fn test_normalize_dob_fallback_and_empty() {
        assert_eq!(normalize_dob_at("", 2025), "");
        assert_eq!(normalize_dob_at("   ", 2025), "");
        assert_eq!(normalize_dob_at("모름", 2025), "모름");
        assert_eq!(normalize_dob_at(" 1990-1 ", 2025), "1990-1"); // 자릿수 불일치 → 원본 유지
    }

    #[test]
    fn test_normalize_dob_idempotent() {
        for input in ["1990-01-01", "900101", "19900101", "모름", ""] {
            let once = normalize_dob_at(input, 2025);
            assert_eq!(normalize_dob_at(&once, 2025), once);
        }
    }

    #[test]
    fn test_format_dob_to_yymmdd() {
        assert_eq!(format_dob_to_yymmdd("1990-01-01"), "900101");
        assert_eq!(format_dob_to_yymmdd("19900101"), "900101");
        assert_eq!(format_dob_to_yymmdd("900101"), "900101");
        assert_eq!(format_dob_to_yymmdd(""), "");
        assert_eq!(format_dob_to_yymmdd("모름"), "모름");
    }

    #[test]
    fn test_get_submission_key() {
        assert_eq!(get_submission_key("c1", 2025, 4), "c1-2025-4");
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(
            month_bounds(2025, 0),
            Some((
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
            ))
        );
        assert_eq!(
            month_bounds(2025, 11),
            Some((
                NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()
            ))
        );
        assert_eq!(month_bounds(2025, 12), None);
    }

    #[test]
    fn test_overlap_basic() {
        let periods = vec![period("2025-03-01", "2025-10-01")];
        assert!(!is_active_in_month(&periods, 2025, 1)); // 2월
        assert!(is_active_in_month(&periods, 2025, 2)); // 3월
        assert!(is_active_in_month(&periods, 2025, 9)); // 10월 (종료일 포함)
        assert!(!is_active_in_month(&periods, 2025, 10)); // 11월
    }

    #[test]
    fn test_overlap_open_end_far_future() {
        let periods = vec![period("2020-06-15", "")];
        assert!(is_active_in_month(&periods, 2020, 5));
        assert!(is_active_in_month(&periods, 2035, 0));
        assert!(is_active_in_month(&periods, 2099, 11));
        assert!(!is_active_in_month(&periods, 2020, 4));
    }

    #[test]
    fn test_overlap_order_independent() {
        let a = period("2023-01-01", "2023-06-30");
        let b = period("2024-01-01", "");
        let c = period("", "2025-12-31"); // 시작일 없음 → 매칭 안 됨

        let forward = vec![a.clone(), b.clone(), c.clone()];
        let backward = vec![c, b, a];
        for (year, month) in [(2023, 3), (2023, 11), (2024, 6), (2026, 0)] {
            assert_eq!(
                is_active_in_month(&forward, year, month),
                is_active_in_month(&backward, year, month)
            );
        }
    }

    #[test]
    fn test_overlap_missing_or_bad_start() {
        assert!(!is_active_in_month(&[period("", "2025-12-31")], 2025, 5));
        assert!(!is_active_in_month(&[period("날짜아님", "")], 2025, 5));
        assert!(!is_active_in_month(&[], 2025, 5));
    }

    #[test]
    fn test_overlap_unparseable_end_never_matches() {
        // 빈 종료일은 진행 중이지만, 깨진 종료일은 매칭되지 않는다
        assert!(!is_active_in_month(&[period("2025-01-01", "종료미정")], 2025, 5));
    }

    #[test]
    fn test_worker_activity() {
        let worker = SupportWorker {
            id: "w1".to_string(),
            name: "박지원".to_string(),
            dob: "1990-01-01".to_string(),
            service_period: ServicePeriod {
                start: "2025-01-01".to_string(),
                end: "2025-12-31".to_string(),
            },
        };
        assert!(is_worker_active_in_month(&worker, 2025, 0));
        assert!(is_worker_active_in_month(&worker, 2025, 11));
        assert!(!is_worker_active_in_month(&worker, 2026, 0));
    }

    #[test]
    fn test_client_activity_uses_history() {
        let client = Client {
            id: "c1".to_string(),
            name: "김이용".to_string(),
            dob: "1988-05-15".to_string(),
            contract_start: "2025-01-01".to_string(),
            contract_end: "2025-12-31".to_string(),
            contract_history: vec![
                period("2023-01-01", "2023-06-30"),
                period("2025-01-01", "2025-12-31"),
            ],
            support_workers: vec![],
            family_support: false,
        };
        assert!(is_client_active_in_month(&client, 2023, 2));
        assert!(!is_client_active_in_month(&client, 2024, 2)); // 이력 공백기
        assert!(is_client_active_in_month(&client, 2025, 2));
    }

    #[test]
    fn test_parse_datetime_flexible() {
        assert!(parse_datetime_flexible("2025-03-15T09:00").is_some());
        assert!(parse_datetime_flexible("2025-03-15 09:00:00").is_some());
        assert!(parse_datetime_flexible("2025-03-15").is_some());
        assert!(parse_datetime_flexible("없음").is_none());
    }
}
