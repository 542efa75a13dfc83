//! Resource Registry - central registration of all resources.
//!
//! When adding a new resource:
//! 1. Create the resource file in `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it here in `get_all_resources()`

use rmcp::model::{AnnotateAble, RawResource};

use super::definitions::{
    CorpClassesResource, ReportCodesResource, ResourceDefinition, ServerInfoResource,
    StatementDivisionsResource,
};
use super::service::ResourceEntry;

/// Build an annotated resource entry from a definition.
fn build_resource<R: ResourceDefinition>() -> ResourceEntry {
    let mut raw = RawResource::new(R::URI, R::NAME);
    raw.description = Some(R::DESCRIPTION.to_string());
    raw.mime_type = Some(R::MIME_TYPE.to_string());

    ResourceEntry {
        resource: raw.no_annotation(),
        content: R::content(),
    }
}

/// Get all registered resources as ResourceEntries.
pub fn get_all_resources() -> Vec<ResourceEntry> {
    vec![
        build_resource::<ReportCodesResource>(),
        build_resource::<StatementDivisionsResource>(),
        build_resource::<CorpClassesResource>(),
        build_resource::<ServerInfoResource>(),
    ]
}

/// Get the list of all resource URIs.
pub fn resource_uris() -> Vec<&'static str> {
    vec![
        ReportCodesResource::URI,
        StatementDivisionsResource::URI,
        CorpClassesResource::URI,
        ServerInfoResource::URI,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_all_resources() {
        let resources = get_all_resources();
        assert_eq!(resources.len(), 4);

        let uris: Vec<_> = resources
            .iter()
            .map(|r| r.resource.raw.uri.as_str())
            .collect();
        assert_eq!(uris, resource_uris());
        assert!(uris.contains(&"dart://codes/report"));
        assert!(uris.contains(&"dart://server/info"));
    }

    #[test]
    fn test_resources_carry_mime_type() {
        for entry in get_all_resources() {
            assert_eq!(
                entry.resource.raw.mime_type.as_deref(),
                Some("application/json")
            );
        }
    }
}
