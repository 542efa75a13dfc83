//! Corporation class (`corp_cls`) table resource.

use serde_json::{Value, json};

use super::{ResourceDefinition, pretty};
use crate::domains::dart::CorpClass;
use crate::domains::resources::service::ResourceContent;

pub struct CorpClassesResource;

impl ResourceDefinition for CorpClassesResource {
    const URI: &'static str = "dart://codes/corp-class";
    const NAME: &'static str = "DART Corporation Classes";
    const DESCRIPTION: &'static str =
        "corp_cls market classes (Y KOSPI, K KOSDAQ, N KONEX, E other) and the labels tools report as corp_cls_nm";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        let classes: Vec<Value> = CorpClass::ALL
            .iter()
            .map(|class| json!({ "corp_cls": class.code(), "corp_cls_nm": class.korean_name() }))
            .collect();
        ResourceContent::Text(pretty(json!({ "corp_classes": classes })))
    }
}
