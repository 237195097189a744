use crate::model::table::Column;
use relmeta_annotate::value::TypeName;

///
/// FetchTiming
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum FetchTiming {
    #[default]
    Eager,
    Lazy,
}

///
/// EnumStorage
/// How an enum-typed attribute is written to its column.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EnumStorage {
    Ordinal,
    Named,
}

///
/// BasicAttributeMapping
///

#[derive(Clone, Debug)]
pub struct BasicAttributeMapping {
    pub name: String,
    pub column: Column,
    pub optional: bool,
    pub fetch: FetchTiming,
    /// Participates in optimistic-lock version checks unless excluded.
    pub optimistic_locked: bool,
    pub enumerated: Option<EnumStorage>,
    pub lob: bool,
    pub nationalized: bool,
    pub attribute_type: Option<TypeName>,
}

impl BasicAttributeMapping {
    #[must_use]
    pub fn new(name: impl Into<String>, column: Column) -> Self {
        Self {
            name: name.into(),
            column,
            optional: true,
            fetch: FetchTiming::Eager,
            optimistic_locked: true,
            enumerated: None,
            lob: false,
            nationalized: false,
            attribute_type: None,
        }
    }
}

///
/// EmbeddedAttributeMapping
///

#[derive(Clone, Debug)]
pub struct EmbeddedAttributeMapping {
    pub name: String,
    /// Managed name of the embeddable type; resolved during runtime-model
    /// completion, possibly as a forward reference.
    pub embeddable: String,
}

///
/// ToOneAttributeMapping
///

#[derive(Clone, Debug)]
pub struct ToOneAttributeMapping {
    pub name: String,
    pub target_entity: String,
    pub fetch: FetchTiming,
    pub optional: bool,
    pub join_column: Column,
}

///
/// PluralAttributeMapping
///

#[derive(Clone, Debug)]
pub struct PluralAttributeMapping {
    pub name: String,
    /// Collection role: `OwnerEntity.attribute`.
    pub role: String,
    pub fetch: FetchTiming,
}

///
/// AttributeMapping
///

#[derive(Clone, Debug)]
pub enum AttributeMapping {
    Basic(BasicAttributeMapping),
    Embedded(EmbeddedAttributeMapping),
    ToOne(ToOneAttributeMapping),
    Plural(PluralAttributeMapping),
}

impl AttributeMapping {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Basic(a) => &a.name,
            Self::Embedded(a) => &a.name,
            Self::ToOne(a) => &a.name,
            Self::Plural(a) => &a.name,
        }
    }
}
