//! Shared machinery for the regular-report summary tools.
//!
//! A summary tool queries several regular-report endpoints for the same
//! company, year and period, one after another, and places each endpoint's
//! reshaped rows under its own key.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use super::super::common::{parse_report_code, validate_bsns_year, validate_corp_code};
use crate::domains::dart::endpoints::SummarySection;
use crate::domains::dart::reshape::reshape_section;
use crate::domains::dart::{DartError, ReportCode};
use crate::domains::tools::ToolError;
use crate::domains::tools::context::ToolContext;

/// Parameters shared by every summary tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SummaryParams {
    #[schemars(description = "8-digit DART corporation code (look it up with find_company_by_name)")]
    pub corp_code: String,

    #[schemars(description = "Business year, 4 digits (2015 or later)")]
    pub bsns_year: String,

    #[schemars(
        description = "Report code: 11013 (Q1), 11012 (half-year), 11014 (Q3), 11011 (annual business report)"
    )]
    pub reprt_code: String,
}

/// Validated summary request.
#[derive(Debug, Clone)]
pub struct SummaryRequest {
    pub corp_code: String,
    pub bsns_year: String,
    pub reprt_code: ReportCode,
}

impl SummaryParams {
    pub fn validate(&self) -> Result<SummaryRequest, ToolError> {
        Ok(SummaryRequest {
            corp_code: validate_corp_code(&self.corp_code)?,
            bsns_year: validate_bsns_year(&self.bsns_year)?,
            reprt_code: parse_report_code(&self.reprt_code)?,
        })
    }
}

/// A fetched summary and how many sections held data.
#[derive(Debug, Clone)]
pub struct Summary {
    pub body: Map<String, Value>,
    pub sections_with_data: usize,
    pub sections_total: usize,
}

impl Summary {
    /// One-line description used as the text content.
    pub fn headline(&self, topic: &str, request: &SummaryRequest) -> String {
        format!(
            "{} for corp_code {} ({} {}): {} of {} sections have data",
            topic,
            request.corp_code,
            request.bsns_year,
            request.reprt_code.korean_name(),
            self.sections_with_data,
            self.sections_total
        )
    }
}

/// Query every section in order.
///
/// A section DART reports as "no data" becomes an empty array. Any other
/// failure aborts the whole summary. When no section has data at all, the
/// no-data error is returned instead of an empty summary.
pub async fn fetch_summary(
    ctx: &ToolContext,
    sections: &[SummarySection],
    request: &SummaryRequest,
) -> Result<Summary, ToolError> {
    ctx.require_api_key()?;

    let mut body = Map::new();
    body.insert("corp_code".to_string(), Value::from(request.corp_code.clone()));
    body.insert("bsns_year".to_string(), Value::from(request.bsns_year.clone()));
    body.insert("reprt_code".to_string(), Value::from(request.reprt_code.code()));
    body.insert(
        "reprt_name".to_string(),
        Value::from(request.reprt_code.korean_name()),
    );

    let mut sections_with_data = 0;
    let mut last_no_data: Option<DartError> = None;

    for section in sections {
        let result = ctx
            .client
            .regular_report(
                section.endpoint,
                &request.corp_code,
                &request.bsns_year,
                request.reprt_code,
            )
            .await;

        let value = match result {
            Ok(rows) => {
                sections_with_data += 1;
                reshape_section(section, rows)
            }
            Err(e) if e.is_no_data() => {
                debug!(section = section.key, "No data for section");
                last_no_data = Some(e);
                Value::Array(Vec::new())
            }
            Err(e) => return Err(e.into()),
        };
        body.insert(section.key.to_string(), value);
    }

    if sections_with_data == 0 {
        if let Some(e) = last_no_data {
            return Err(e.into());
        }
    }

    info!(
        corp_code = %request.corp_code,
        sections = sections.len(),
        with_data = sections_with_data,
        "Summary fetched"
    );

    Ok(Summary {
        body,
        sections_with_data,
        sections_total: sections.len(),
    })
}
