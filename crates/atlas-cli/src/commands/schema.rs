use atlas_core::entities::{AmbiguousReference, Location, PinnedData, WorkQueue};
use schemars::{Schema, schema_for};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{SchemaArgs, SchemaDocument};
use crate::output::output;

/// Handle `atlas schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&schema(args.document), flags.format)
}

/// JSON Schema of one persisted document.
#[must_use]
pub fn schema(document: SchemaDocument) -> Schema {
    match document {
        SchemaDocument::WorkQueue => schema_for!(WorkQueue),
        SchemaDocument::Pinned => schema_for!(PinnedData),
        SchemaDocument::Locations => schema_for!(Vec<Location>),
        SchemaDocument::Ambiguous => schema_for!(Vec<AmbiguousReference>),
    }
}

#[cfg(test)]
mod tests {
    use super::schema;
    use crate::cli::root_commands::SchemaDocument;

    #[test]
    fn work_queue_schema_uses_camel_case_fields() {
        let value = serde_json::to_value(schema(SchemaDocument::WorkQueue)).expect("schema json");
        let properties = value["properties"].as_object().expect("object schema");
        assert!(properties.contains_key("currentIndex"));
        assert!(properties.contains_key("sourceFiles"));
    }

    #[test]
    fn pinned_schema_is_a_map() {
        let value = serde_json::to_value(schema(SchemaDocument::Pinned)).expect("schema json");
        assert_eq!(value["type"], "object");
        assert!(value.get("additionalProperties").is_some());
    }

    #[test]
    fn list_documents_are_arrays() {
        for document in [SchemaDocument::Locations, SchemaDocument::Ambiguous] {
            let value = serde_json::to_value(schema(document)).expect("schema json");
            assert_eq!(value["type"], "array");
        }
    }
}
