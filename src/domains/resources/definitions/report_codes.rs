//! Report-code table resource.

use serde_json::{Value, json};

use super::{ResourceDefinition, pretty};
use crate::domains::dart::ReportCode;
use crate::domains::resources::service::ResourceContent;

/// DART `reprt_code` values accepted by the regular-report tools.
pub struct ReportCodesResource;

impl ResourceDefinition for ReportCodesResource {
    const URI: &'static str = "dart://codes/report";
    const NAME: &'static str = "DART Report Codes";
    const DESCRIPTION: &'static str =
        "reprt_code values (11013 Q1, 11012 half-year, 11014 Q3, 11011 annual) with their Korean names";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        let codes: Vec<Value> = ReportCode::ALL
            .iter()
            .map(|code| {
                json!({
                    "reprt_code": code.code(),
                    "name": code.korean_name(),
                    "alias": code.alias(),
                })
            })
            .collect();
        ResourceContent::Text(pretty(json!({ "report_codes": codes })))
    }
}
