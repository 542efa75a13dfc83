//! Reshaping of flat DART rows into nested, deterministic JSON.
//!
//! DART returns rows in whatever order its backend produces. Every grouping
//! here sorts on row content, so the same set of rows always yields the same
//! output regardless of arrival order.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde_json::{Map, Value, json};

use super::client::Row;
use super::codes::{
    CorpClass, ReportCode, StatementDivision, UNKNOWN_LABEL, full_time_label, gender_label,
    registered_executive_label,
};
use super::endpoints::{SectionShape, SummarySection, VIEWER_URL};

/// Internal identifiers removed from every regular-report row.
const BASE_DROP_FIELDS: [&str; 3] = ["rcept_no", "corp_code", "corp_cls"];

/// Identifiers removed from financial statement rows.
const STATEMENT_DROP_FIELDS: [&str; 4] = ["rcept_no", "reprt_code", "corp_code", "sj_div"];

/// Key for rows whose `sj_div` is not a known statement division.
pub const OTHER_STATEMENTS: &str = "other_statements";

fn str_field<'a>(row: &'a Row, key: &str) -> Option<&'a str> {
    row.get(key).and_then(Value::as_str)
}

fn canonical(row: &Row) -> String {
    serde_json::to_string(row).unwrap_or_default()
}

/// Parse a DART amount such as `"1,234"`. Anything non-numeric counts as zero.
pub fn parse_count(raw: Option<&str>) -> u64 {
    raw.map(|s| s.trim().replace(',', ""))
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0)
}

/// Drop internal identifiers and add the Korean market class label.
pub fn normalize_rows(rows: Vec<Row>, extra_drop: &[&str]) -> Vec<Row> {
    rows.into_iter()
        .map(|mut row| {
            let class = CorpClass::label(str_field(&row, "corp_cls"));
            for key in BASE_DROP_FIELDS.iter().chain(extra_drop) {
                row.remove(*key);
            }
            row.insert("corp_cls_nm".to_string(), Value::from(class));
            row
        })
        .collect()
}

/// Reshape the rows of one summary section into its output value.
pub fn reshape_section(section: &SummarySection, mut rows: Vec<Row>) -> Value {
    match section.shape {
        SectionShape::Rows => {}
        SectionShape::Employees => {
            for row in &mut rows {
                let gender = gender_label(str_field(row, "sexdstn"));
                row.insert("sexdstn_nm".to_string(), Value::from(gender));
            }
        }
        SectionShape::Executives => {
            for row in &mut rows {
                let gender = gender_label(str_field(row, "sexdstn"));
                let registered = registered_executive_label(str_field(row, "rgist_exctv_at"));
                let full_time = full_time_label(str_field(row, "fte_at"));
                row.insert("sexdstn_nm".to_string(), Value::from(gender));
                row.insert("rgist_exctv_at_nm".to_string(), Value::from(registered));
                row.insert("fte_at_nm".to_string(), Value::from(full_time));
            }
        }
    }

    let rows = normalize_rows(rows, section.drop_fields);
    match section.shape {
        SectionShape::Employees => group_employees(rows),
        _ => Value::Array(rows.into_iter().map(Value::Object).collect()),
    }
}

/// Group employee rows by business segment (`fo_bbm`) and gender.
///
/// Expects rows that already carry `sexdstn_nm`.
pub fn group_employees(rows: Vec<Row>) -> Value {
    #[derive(Default)]
    struct Segment {
        male: Vec<Row>,
        female: Vec<Row>,
        unknown: Vec<Row>,
        total: u64,
    }

    let mut segments: BTreeMap<String, Segment> = BTreeMap::new();
    for row in rows {
        let name = str_field(&row, "fo_bbm")
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_LABEL)
            .to_string();
        let segment = segments.entry(name).or_default();
        segment.total = segment.total.saturating_add(parse_count(str_field(&row, "sm")));
        match str_field(&row, "sexdstn_nm") {
            Some("남성") => segment.male.push(row),
            Some("여성") => segment.female.push(row),
            _ => segment.unknown.push(row),
        }
    }

    let sorted = |mut rows: Vec<Row>| {
        rows.sort_by_cached_key(canonical);
        rows
    };

    Value::Array(
        segments
            .into_iter()
            .map(|(name, s)| {
                json!({
                    "fo_bbm": name,
                    "total_headcount": s.total,
                    "male": sorted(s.male),
                    "female": sorted(s.female),
                    "unknown": sorted(s.unknown),
                })
            })
            .collect(),
    )
}

fn compare_statement_rows(a: &Row, b: &Row) -> Ordering {
    let ord = |row: &Row| {
        str_field(row, "ord")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(u64::MAX)
    };
    ord(a)
        .cmp(&ord(b))
        .then_with(|| str_field(a, "account_id").cmp(&str_field(b, "account_id")))
        .then_with(|| str_field(a, "account_nm").cmp(&str_field(b, "account_nm")))
        .then_with(|| canonical(a).cmp(&canonical(b)))
}

/// Group financial statement rows under one key per statement division.
///
/// All division keys plus `other_statements` are always present.
pub fn group_financial_statement(rows: Vec<Row>, reprt_code: ReportCode) -> Map<String, Value> {
    let mut groups: BTreeMap<&'static str, Vec<Row>> = StatementDivision::ALL
        .iter()
        .map(|d| (d.group_key(), Vec::new()))
        .chain([(OTHER_STATEMENTS, Vec::new())])
        .collect();

    for mut row in rows {
        let division = str_field(&row, "sj_div").and_then(StatementDivision::from_code);
        let key = division.map(StatementDivision::group_key).unwrap_or(OTHER_STATEMENTS);
        let division_name = division
            .map(StatementDivision::korean_name)
            .unwrap_or(UNKNOWN_LABEL);

        for field in STATEMENT_DROP_FIELDS {
            row.remove(field);
        }
        row.insert("reprt_name_kr".to_string(), Value::from(reprt_code.korean_name()));
        row.insert("sj_div_name_kr".to_string(), Value::from(division_name));

        groups.entry(key).or_default().push(row);
    }

    groups
        .into_iter()
        .map(|(key, mut rows)| {
            rows.sort_by(compare_statement_rows);
            (
                key.to_string(),
                Value::Array(rows.into_iter().map(Value::Object).collect()),
            )
        })
        .collect()
}

/// Viewer URL for a receipt number.
pub fn viewer_url(rcept_no: &str) -> String {
    format!("{}?rcpNo={}", VIEWER_URL, rcept_no)
}

/// Add class labels and viewer links, newest filing first.
pub fn reshape_disclosures(rows: Vec<Row>) -> Vec<Row> {
    let mut rows: Vec<Row> = rows
        .into_iter()
        .map(|mut row| {
            let class = CorpClass::label(str_field(&row, "corp_cls"));
            row.insert("corp_cls_nm".to_string(), Value::from(class));
            if let Some(url) = str_field(&row, "rcept_no").map(viewer_url) {
                row.insert("url".to_string(), Value::from(url));
            }
            row
        })
        .collect();

    rows.sort_by(|a, b| {
        str_field(b, "rcept_dt")
            .cmp(&str_field(a, "rcept_dt"))
            .then_with(|| str_field(b, "rcept_no").cmp(&str_field(a, "rcept_no")))
            .then_with(|| canonical(a).cmp(&canonical(b)))
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::dart::endpoints::{PEOPLE_SECTIONS, INVESTMENT_SECTIONS};

    fn row(value: Value) -> Row {
        match value {
            Value::Object(map) => map,
            _ => panic!("row must be an object"),
        }
    }

    fn statement_rows() -> Vec<Row> {
        vec![
            row(json!({"rcept_no": "1", "reprt_code": "11011", "corp_code": "00126380",
                       "sj_div": "IS", "account_id": "ifrs-full_Revenue", "account_nm": "매출액", "ord": "1"})),
            row(json!({"rcept_no": "1", "sj_div": "BS", "account_id": "ifrs-full_Assets",
                       "account_nm": "자산총계", "ord": "10"})),
            row(json!({"rcept_no": "1", "sj_div": "BS", "account_id": "ifrs-full_CurrentAssets",
                       "account_nm": "유동자산", "ord": "2"})),
            row(json!({"rcept_no": "1", "sj_div": "ZZ", "account_id": "x", "account_nm": "기타", "ord": "1"})),
            row(json!({"rcept_no": "1", "sj_div": "CF", "account_id": "a", "account_nm": "현금", "ord": "x"})),
        ]
    }

    #[test]
    fn test_financial_grouping_has_all_keys() {
        let grouped = group_financial_statement(statement_rows(), ReportCode::Annual);
        for key in [
            "balance_sheet",
            "income_statement",
            "comprehensive_income_statement",
            "cash_flow_statement",
            "statement_of_changes_in_equity",
            "other_statements",
        ] {
            assert!(grouped[key].is_array(), "missing {key}");
        }
        assert_eq!(grouped.len(), 6);
        assert_eq!(grouped["comprehensive_income_statement"], json!([]));
        assert_eq!(grouped["other_statements"][0]["sj_div_name_kr"], UNKNOWN_LABEL);
    }

    #[test]
    fn test_financial_grouping_sorts_by_ord_and_drops_ids() {
        let grouped = group_financial_statement(statement_rows(), ReportCode::Annual);
        let bs = grouped["balance_sheet"].as_array().unwrap();
        assert_eq!(bs[0]["account_nm"], "유동자산");
        assert_eq!(bs[1]["account_nm"], "자산총계");
        assert_eq!(bs[0]["sj_div_name_kr"], "재무상태표");
        assert_eq!(bs[0]["reprt_name_kr"], "사업보고서");
        for key in STATEMENT_DROP_FIELDS {
            assert!(bs[0].get(key).is_none());
        }
    }

    #[test]
    fn test_financial_grouping_is_order_independent() {
        let forward = group_financial_statement(statement_rows(), ReportCode::HalfYear);
        let mut reversed_rows = statement_rows();
        reversed_rows.reverse();
        let reversed = group_financial_statement(reversed_rows, ReportCode::HalfYear);
        assert_eq!(forward, reversed);
    }

    fn employee_rows() -> Vec<Row> {
        vec![
            row(json!({"rcept_no": "1", "corp_cls": "Y", "fo_bbm": "DX", "sexdstn": "남", "sm": "1,200",
                       "reform_bfe_emp_co_rgllbr": "-"})),
            row(json!({"rcept_no": "1", "corp_cls": "Y", "fo_bbm": "DX", "sexdstn": "여", "sm": "800"})),
            row(json!({"rcept_no": "1", "corp_cls": "Y", "fo_bbm": "DS", "sexdstn": "남", "sm": "-"})),
            row(json!({"rcept_no": "1", "corp_cls": "Y", "fo_bbm": "DS", "sexdstn": "합계", "sm": "30"})),
        ]
    }

    fn employees_section() -> &'static SummarySection {
        PEOPLE_SECTIONS.iter().find(|s| s.key == "employees").unwrap()
    }

    #[test]
    fn test_employee_grouping() {
        let value = reshape_section(employees_section(), employee_rows());
        let segments = value.as_array().unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0]["fo_bbm"], "DS");
        assert_eq!(segments[0]["total_headcount"], 30);
        assert_eq!(segments[0]["unknown"].as_array().unwrap().len(), 1);
        assert_eq!(segments[1]["fo_bbm"], "DX");
        assert_eq!(segments[1]["total_headcount"], 2000);
        let male = &segments[1]["male"][0];
        assert_eq!(male["sexdstn_nm"], "남성");
        assert_eq!(male["corp_cls_nm"], "유가증권");
        assert!(male.get("sexdstn").is_none());
        assert!(male.get("rcept_no").is_none());
        assert!(male.get("reform_bfe_emp_co_rgllbr").is_none());
    }

    #[test]
    fn test_employee_grouping_is_order_independent() {
        let mut reversed = employee_rows();
        reversed.reverse();
        assert_eq!(
            reshape_section(employees_section(), employee_rows()),
            reshape_section(employees_section(), reversed)
        );
    }

    #[test]
    fn test_employee_total_saturates() {
        let rows = vec![
            row(json!({"fo_bbm": "DS", "sexdstn": "남", "sm": "18446744073709551615"})),
            row(json!({"fo_bbm": "DS", "sexdstn": "여", "sm": "1"})),
        ];
        let value = reshape_section(employees_section(), rows);
        assert_eq!(value[0]["total_headcount"], u64::MAX);
    }

    #[test]
    fn test_executive_labels() {
        let section = PEOPLE_SECTIONS.iter().find(|s| s.key == "executives").unwrap();
        let rows = vec![row(json!({"nm": "홍길동", "sexdstn": "여", "rgist_exctv_at": "사내이사",
                                   "fte_at": "상근", "corp_cls": "K"}))];
        let value = reshape_section(section, rows);
        let exec = &value[0];
        assert_eq!(exec["sexdstn_nm"], "여성");
        assert_eq!(exec["rgist_exctv_at_nm"], "사내이사");
        assert_eq!(exec["fte_at_nm"], "상근");
        assert_eq!(exec["corp_cls_nm"], "코스닥");
        assert!(exec.get("fte_at").is_none());
    }

    #[test]
    fn test_section_extra_drops() {
        let section = INVESTMENT_SECTIONS
            .iter()
            .find(|s| s.key == "public_offering_fund_usage")
            .unwrap();
        let rows = vec![row(json!({"se_nm": "공모", "on_dclrt_cptal_use_plan": "old",
                                   "real_cptal_use_sttus": "old", "corp_code": "00126380"}))];
        let value = reshape_section(section, rows);
        assert_eq!(value[0], json!({"se_nm": "공모", "corp_cls_nm": UNKNOWN_LABEL}));
    }

    #[test]
    fn test_disclosures_sorted_newest_first() {
        let rows = vec![
            row(json!({"rcept_no": "20230515000001", "rcept_dt": "20230515", "corp_cls": "Y"})),
            row(json!({"rcept_no": "20230814000002", "rcept_dt": "20230814", "corp_cls": "Y"})),
            row(json!({"rcept_no": "20230814000009", "rcept_dt": "20230814", "corp_cls": "Y"})),
        ];
        let out = reshape_disclosures(rows);
        assert_eq!(out[0]["rcept_no"], "20230814000009");
        assert_eq!(out[1]["rcept_no"], "20230814000002");
        assert_eq!(out[2]["rcept_no"], "20230515000001");
        assert_eq!(
            out[0]["url"],
            "https://dart.fss.or.kr/dsaf001/main.do?rcpNo=20230814000009"
        );
        assert_eq!(out[0]["corp_cls_nm"], "유가증권");
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count(Some("1,234")), 1234);
        assert_eq!(parse_count(Some(" 12 ")), 12);
        assert_eq!(parse_count(Some("-")), 0);
        assert_eq!(parse_count(None), 0);
    }
}
