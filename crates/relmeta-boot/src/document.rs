//! Parsed mapping-document object graph.
//!
//! This crate never parses XML text. Documents arrive as this already-parsed,
//! schema-valid tree; the processor walks it and synthesizes annotation
//! usages. Every document carries an origin string so binding failures can
//! name their source without a debugger.

use serde::{Deserialize, Serialize};

///
/// MappingDocument
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct MappingDocument {
    /// Where the document came from (file name, resource path).
    pub origin: String,
    pub root: DocumentRoot,
}

///
/// DocumentRoot
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentRoot {
    EntityMappings(EntityMappingsRoot),
    /// Legacy-format mapping document. Recognized only to be rejected.
    Legacy,
}

///
/// EntityMappingsRoot
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct EntityMappingsRoot {
    pub package: Option<String>,
    pub access: Option<AccessKind>,
    pub type_registrations: Vec<TypeRegistrationElement>,
    pub converters: Vec<ConverterElement>,
    pub sequence_generators: Vec<SequenceGeneratorElement>,
    pub table_generators: Vec<TableGeneratorElement>,
    pub generic_generators: Vec<GenericGeneratorElement>,
    pub embeddables: Vec<EmbeddableElement>,
    pub mapped_superclasses: Vec<MappedSuperclassElement>,
    pub entities: Vec<EntityElement>,
}

///
/// AccessKind
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccessKind {
    Field,
    Property,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TypeRegistrationElement {
    pub class: String,
    pub descriptor: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ConverterElement {
    pub class: String,
    pub auto_apply: bool,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SequenceGeneratorElement {
    pub name: String,
    pub sequence_name: Option<String>,
    pub initial_value: Option<i64>,
    pub allocation_size: Option<i64>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TableGeneratorElement {
    pub name: String,
    pub table: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GenericGeneratorElement {
    pub name: String,
    pub strategy: String,
}

///
/// EntityElement
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct EntityElement {
    pub class: Option<String>,
    pub name: Option<String>,
    pub access: Option<AccessKind>,
    pub metadata_complete: bool,
    pub table: Option<TableElement>,
    pub secondary_tables: Vec<SecondaryTableElement>,
    pub attributes: AttributesElement,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MappedSuperclassElement {
    pub class: String,
    pub access: Option<AccessKind>,
    pub attributes: AttributesElement,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct EmbeddableElement {
    pub class: String,
    pub access: Option<AccessKind>,
    pub attributes: AttributesElement,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TableElement {
    pub name: Option<String>,
    pub catalog: Option<String>,
    pub schema: Option<String>,
    pub check: Option<String>,
    pub comment: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SecondaryTableElement {
    pub name: String,
}

///
/// AttributesElement
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AttributesElement {
    pub ids: Vec<IdElement>,
    pub embedded_id: Option<EmbeddedIdElement>,
    pub versions: Vec<VersionElement>,
    pub basics: Vec<BasicElement>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct IdElement {
    pub name: String,
    pub access: Option<AccessKind>,
    pub column: Option<ColumnElement>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct EmbeddedIdElement {
    pub name: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct VersionElement {
    pub name: String,
    pub access: Option<AccessKind>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BasicElement {
    pub name: String,
    pub access: Option<AccessKind>,
    pub fetch: Option<FetchElement>,
    pub optional: Option<bool>,
    pub optimistic_lock: Option<bool>,
    pub enumerated: Option<EnumeratedElement>,
    pub lob: bool,
    pub nationalized: bool,
    pub column: Option<ColumnElement>,
    pub formula: Option<String>,
    pub convert: Option<ConvertElement>,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FetchElement {
    Eager,
    Lazy,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EnumeratedElement {
    Ordinal,
    String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ColumnElement {
    pub name: Option<String>,
    pub nullable: Option<bool>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ConvertElement {
    pub converter: Option<String>,
}

impl EntityElement {
    /// Entity name precedence: explicit `name`, else the simple class name.
    #[must_use]
    pub fn resolved_name(&self) -> Option<String> {
        if let Some(name) = &self.name {
            return Some(name.clone());
        }
        self.class
            .as_deref()
            .map(|class| class.rsplit(['.', ':']).next().unwrap_or(class).to_string())
    }
}
