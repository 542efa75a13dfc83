//! Common utilities shared across DART tools.
//!
//! Parameter validation, result formatting, and the helpers that let each
//! tool answer both rmcp calls and registry (HTTP) calls.

use chrono::{Datelike, Local, NaiveDate};
use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::domains::dart::{FsDiv, ReportCode};
use crate::domains::tools::ToolError;

/// First business year OpenDART serves regular-report data for.
pub const FIRST_SUPPORTED_YEAR: i32 = 2015;

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Create a success result carrying `data` as structured content.
///
/// The content holds the one-line summary followed by the pretty-printed JSON.
pub fn structured_result<T: Serialize>(summary: String, data: T) -> CallToolResult {
    let value = match serde_json::to_value(&data) {
        Ok(value) => value,
        Err(e) => return error_result(&format!("Failed to serialize result: {}", e)),
    };
    let json = serde_json::to_string_pretty(&value).unwrap_or_default();

    let mut result = CallToolResult::success(vec![Content::text(summary), Content::text(json)]);
    result.structured_content = Some(value);
    result
}

/// Deserialize registry arguments into a tool's parameter struct.
///
/// A missing (`null`) argument object counts as `{}`.
pub fn parse_arguments<P: DeserializeOwned>(arguments: serde_json::Value) -> Result<P, String> {
    let arguments = if arguments.is_null() {
        serde_json::Value::Object(Default::default())
    } else {
        arguments
    };
    serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {}", e))
}

/// Serialize a tool result the way MCP clients expect it over HTTP.
pub fn to_http_response(result: CallToolResult) -> Result<serde_json::Value, String> {
    serde_json::to_value(&result).map_err(|e| e.to_string())
}

/// Default number of companies returned by a lookup.
pub fn default_limit() -> usize {
    10
}

/// Validate and clamp limit to allowed range (1-100).
pub fn validate_limit(limit: usize) -> usize {
    limit.clamp(1, 100)
}

fn all_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

/// Validate an 8-digit DART corporation code.
pub fn validate_corp_code(corp_code: &str) -> Result<String, ToolError> {
    let corp_code = corp_code.trim();
    if !all_digits(corp_code, 8) {
        return Err(ToolError::invalid_arguments(format!(
            "corp_code must be exactly 8 digits, got '{}'. Use find_company_by_name to look it up",
            corp_code
        )));
    }
    Ok(corp_code.to_string())
}

/// Validate a business year between 2015 and the current year.
pub fn validate_bsns_year(bsns_year: &str) -> Result<String, ToolError> {
    let bsns_year = bsns_year.trim();
    let current = Local::now().year();
    let year = if all_digits(bsns_year, 4) {
        bsns_year.parse::<i32>().ok()
    } else {
        None
    };

    match year {
        Some(year) if (FIRST_SUPPORTED_YEAR..=current).contains(&year) => {
            Ok(bsns_year.to_string())
        }
        _ => Err(ToolError::invalid_arguments(format!(
            "bsns_year must be a 4-digit year between {} and {}, got '{}'",
            FIRST_SUPPORTED_YEAR, current, bsns_year
        ))),
    }
}

pub fn parse_report_code(reprt_code: &str) -> Result<ReportCode, ToolError> {
    reprt_code.parse().map_err(ToolError::invalid_arguments)
}

pub fn parse_fs_div(fs_div: &str) -> Result<FsDiv, ToolError> {
    fs_div.parse().map_err(ToolError::invalid_arguments)
}

/// Validate a `YYYYMMDD` calendar date.
pub fn validate_date(field: &str, value: &str) -> Result<NaiveDate, ToolError> {
    let value = value.trim();
    let invalid = || {
        ToolError::invalid_arguments(format!(
            "{} must be a valid YYYYMMDD date, got '{}'",
            field, value
        ))
    };
    if !all_digits(value, 8) {
        return Err(invalid());
    }

    let year = value[..4].parse().map_err(|_| invalid())?;
    let month = value[4..6].parse().map_err(|_| invalid())?;
    let day = value[6..].parse().map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

/// Validate a `YYYYMMDD` range with `start <= end`.
pub fn validate_date_range(start: &str, end: &str) -> Result<(String, String), ToolError> {
    let start_date = validate_date("start_date", start)?;
    let end_date = validate_date("end_date", end)?;
    if start_date > end_date {
        return Err(ToolError::invalid_arguments(format!(
            "start_date ({}) must not be after end_date ({})",
            start.trim(),
            end.trim()
        )));
    }
    Ok((start.trim().to_string(), end.trim().to_string()))
}

/// Today's local date as `YYYYMMDD`.
pub fn today_yyyymmdd() -> String {
    Local::now().format("%Y%m%d").to_string()
}
