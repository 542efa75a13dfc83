//! DART code tables.
//!
//! DART encodes filing periods, statement kinds and market classes as short
//! codes. These types parse the raw codes and carry the Korean display names
//! shown in DART's own documentation.

use std::fmt;
use std::str::FromStr;

/// Label used when a code is missing or unmapped.
pub const UNKNOWN_LABEL: &str = "알 수 없음";

/// Filing period of a regular report (`reprt_code`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportCode {
    FirstQuarter,
    HalfYear,
    ThirdQuarter,
    Annual,
}

impl ReportCode {
    pub const ALL: [ReportCode; 4] = [
        ReportCode::FirstQuarter,
        ReportCode::HalfYear,
        ReportCode::ThirdQuarter,
        ReportCode::Annual,
    ];

    /// The code DART expects on the wire.
    pub fn code(self) -> &'static str {
        match self {
            Self::FirstQuarter => "11013",
            Self::HalfYear => "11012",
            Self::ThirdQuarter => "11014",
            Self::Annual => "11011",
        }
    }

    pub fn korean_name(self) -> &'static str {
        match self {
            Self::FirstQuarter => "1분기보고서",
            Self::HalfYear => "반기보고서",
            Self::ThirdQuarter => "3분기보고서",
            Self::Annual => "사업보고서",
        }
    }

    /// Short alias accepted in place of the numeric code.
    pub fn alias(self) -> &'static str {
        match self {
            Self::FirstQuarter => "q1",
            Self::HalfYear => "half",
            Self::ThirdQuarter => "q3",
            Self::Annual => "annual",
        }
    }
}

impl FromStr for ReportCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|r| r.code() == s || r.alias().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "Invalid report code '{}'. Use 11013 (Q1), 11012 (half-year), 11014 (Q3) or 11011 (annual)",
                    s
                )
            })
    }
}

impl fmt::Display for ReportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Statement kind of a financial statement row (`sj_div`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatementDivision {
    BalanceSheet,
    IncomeStatement,
    ComprehensiveIncomeStatement,
    CashFlow,
    ChangesInEquity,
}

impl StatementDivision {
    pub const ALL: [StatementDivision; 5] = [
        StatementDivision::BalanceSheet,
        StatementDivision::IncomeStatement,
        StatementDivision::ComprehensiveIncomeStatement,
        StatementDivision::CashFlow,
        StatementDivision::ChangesInEquity,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Self::BalanceSheet => "BS",
            Self::IncomeStatement => "IS",
            Self::ComprehensiveIncomeStatement => "CIS",
            Self::CashFlow => "CF",
            Self::ChangesInEquity => "SCE",
        }
    }

    pub fn korean_name(self) -> &'static str {
        match self {
            Self::BalanceSheet => "재무상태표",
            Self::IncomeStatement => "손익계산서",
            Self::ComprehensiveIncomeStatement => "포괄손익계산서",
            Self::CashFlow => "현금흐름표",
            Self::ChangesInEquity => "자본변동표",
        }
    }

    /// Output key this division is grouped under.
    pub fn group_key(self) -> &'static str {
        match self {
            Self::BalanceSheet => "balance_sheet",
            Self::IncomeStatement => "income_statement",
            Self::ComprehensiveIncomeStatement => "comprehensive_income_statement",
            Self::CashFlow => "cash_flow_statement",
            Self::ChangesInEquity => "statement_of_changes_in_equity",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.code() == code.trim())
    }
}

/// Separate vs. consolidated statements (`fs_div`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FsDiv {
    Separate,
    Consolidated,
}

impl FsDiv {
    pub const ALL: [FsDiv; 2] = [FsDiv::Separate, FsDiv::Consolidated];

    pub fn code(self) -> &'static str {
        match self {
            Self::Separate => "OFS",
            Self::Consolidated => "CFS",
        }
    }

    pub fn korean_name(self) -> &'static str {
        match self {
            Self::Separate => "재무제표",
            Self::Consolidated => "연결재무제표",
        }
    }
}

impl FromStr for FsDiv {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "Invalid fs_div '{}'. Use OFS (separate) or CFS (consolidated)",
                    s
                )
            })
    }
}

/// Market class of a corporation (`corp_cls`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CorpClass {
    Kospi,
    Kosdaq,
    Konex,
    Other,
}

impl CorpClass {
    pub const ALL: [CorpClass; 4] = [
        CorpClass::Kospi,
        CorpClass::Kosdaq,
        CorpClass::Konex,
        CorpClass::Other,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Self::Kospi => "Y",
            Self::Kosdaq => "K",
            Self::Konex => "N",
            Self::Other => "E",
        }
    }

    pub fn korean_name(self) -> &'static str {
        match self {
            Self::Kospi => "유가증권",
            Self::Kosdaq => "코스닥",
            Self::Konex => "코넥스",
            Self::Other => "기타",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code.trim())
    }

    /// Korean label for a raw `corp_cls` value.
    pub fn label(code: Option<&str>) -> &'static str {
        code.and_then(Self::from_code)
            .map(Self::korean_name)
            .unwrap_or(UNKNOWN_LABEL)
    }
}

/// Korean label for a `sexdstn` value.
pub fn gender_label(value: Option<&str>) -> &'static str {
    match value.map(str::trim) {
        Some("남") => "남성",
        Some("여") => "여성",
        _ => UNKNOWN_LABEL,
    }
}

/// Label for `rgist_exctv_at`; unmapped values pass through.
pub fn registered_executive_label(value: Option<&str>) -> String {
    const KNOWN: [&str; 2] = ["등기임원", "미등기임원"];

    let Some(value) = value.map(str::trim) else {
        return UNKNOWN_LABEL.to_string();
    };
    if KNOWN.contains(&value) {
        return value.to_string();
    }
    if let Some(base) = value.strip_suffix(" 등") {
        if KNOWN.contains(&base) {
            return format!("{} 등", base);
        }
    }
    value.to_string()
}

/// Label for `fte_at`; unmapped values pass through.
pub fn full_time_label(value: Option<&str>) -> String {
    match value.map(str::trim) {
        None => UNKNOWN_LABEL.to_string(),
        Some(v) => v.to_string(),
    }
}
