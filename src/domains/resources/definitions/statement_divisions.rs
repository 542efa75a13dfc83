//! Statement division tables: `sj_div` and `fs_div`.

use serde_json::{Value, json};

use super::{ResourceDefinition, pretty};
use crate::domains::dart::{FsDiv, StatementDivision};
use crate::domains::resources::service::ResourceContent;

pub struct StatementDivisionsResource;

impl ResourceDefinition for StatementDivisionsResource {
    const URI: &'static str = "dart://codes/statement-division";
    const NAME: &'static str = "DART Statement Divisions";
    const DESCRIPTION: &'static str = "sj_div statement types with the output key each is grouped under, and fs_div separate/consolidated selectors";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        let sj_div: Vec<Value> = StatementDivision::ALL
            .iter()
            .map(|div| {
                json!({
                    "sj_div": div.code(),
                    "name": div.korean_name(),
                    "group_key": div.group_key(),
                })
            })
            .collect();
        let fs_div: Vec<Value> = FsDiv::ALL
            .iter()
            .map(|div| json!({ "fs_div": div.code(), "name": div.korean_name() }))
            .collect();

        ResourceContent::Text(pretty(json!({ "sj_div": sj_div, "fs_div": fs_div })))
    }
}
