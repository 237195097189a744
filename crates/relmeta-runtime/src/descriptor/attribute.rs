use crate::{
    error::RuntimeModelError,
    model::InFlightRuntimeModel,
    process::{NavigableTask, RuntimeCreationContext},
    typesys::{JdbcTypeCode, TypeConfiguration, jdbc_codes},
};
use relmeta_boot::model::{
    AttributeMapping, BasicAttributeMapping, FetchTiming,
    attribute::EnumStorage,
    table::Column,
};

///
/// BasicAttribute
///

#[derive(Clone, Debug)]
pub struct BasicAttribute {
    pub name: String,
    pub column: Column,
    pub jdbc_code: JdbcTypeCode,
    pub optional: bool,
    pub lob: bool,
    pub nationalized: bool,
    pub optimistic_locked: bool,
}

///
/// EmbeddedAttribute
///

#[derive(Clone, Debug)]
pub struct EmbeddedAttribute {
    pub name: String,
    pub embeddable: String,
}

///
/// ToOneAttribute
///

#[derive(Clone, Debug)]
pub struct ToOneAttribute {
    pub name: String,
    pub target_entity: String,
    pub join_column: Column,
    pub fetch: FetchTiming,
    pub optional: bool,
}

///
/// PluralAttribute
///

#[derive(Clone, Debug)]
pub struct PluralAttribute {
    pub name: String,
    pub role: String,
}

///
/// RuntimeAttribute
///

#[derive(Clone, Debug)]
pub enum RuntimeAttribute {
    Basic(BasicAttribute),
    Embedded(EmbeddedAttribute),
    ToOne(ToOneAttribute),
    Plural(PluralAttribute),
}

impl RuntimeAttribute {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Basic(a) => &a.name,
            Self::Embedded(a) => &a.name,
            Self::ToOne(a) => &a.name,
            Self::Plural(a) => &a.name,
        }
    }

    /// Column this attribute contributes to its owner's table, if any.
    #[must_use]
    pub const fn column(&self) -> Option<&Column> {
        match self {
            Self::Basic(a) => Some(&a.column),
            Self::ToOne(a) => Some(&a.join_column),
            Self::Embedded(_) | Self::Plural(_) => None,
        }
    }

    /// Whether the attribute participates in optimistic version checks.
    #[must_use]
    pub const fn optimistic_locked(&self) -> bool {
        match self {
            Self::Basic(a) => a.optimistic_locked,
            Self::ToOne(_) => true,
            Self::Embedded(_) | Self::Plural(_) => false,
        }
    }
}

/// Resolve a boot basic mapping against the type configuration.
#[must_use]
pub fn resolve_basic(boot: &BasicAttributeMapping, types: &TypeConfiguration) -> BasicAttribute {
    BasicAttribute {
        name: boot.name.clone(),
        column: boot.column.clone(),
        jdbc_code: resolve_jdbc_code(boot, types),
        optional: boot.optional,
        lob: boot.lob,
        nationalized: boot.nationalized,
        optimistic_locked: boot.optimistic_locked,
    }
}

// Resolution precedence: LOB beats nationalization beats enum storage beats
// the registry's recommendation; varchar is the terminal fallback.
fn resolve_jdbc_code(boot: &BasicAttributeMapping, types: &TypeConfiguration) -> JdbcTypeCode {
    if boot.lob {
        let binary = boot
            .attribute_type
            .as_ref()
            .is_some_and(|t| t.simple_name() == "Bytes");
        if binary {
            return jdbc_codes::BLOB;
        }
        return if boot.nationalized {
            jdbc_codes::NCLOB
        } else {
            jdbc_codes::CLOB
        };
    }
    if boot.nationalized {
        return jdbc_codes::NVARCHAR;
    }
    if let Some(storage) = boot.enumerated {
        return match storage {
            EnumStorage::Named => jdbc_codes::VARCHAR,
            EnumStorage::Ordinal => jdbc_codes::INTEGER,
        };
    }
    boot.attribute_type
        .as_ref()
        .and_then(|t| types.java_types.resolve_descriptor(t))
        .map_or(jdbc_codes::VARCHAR, |d| d.recommended_jdbc_code)
}

/// Resolve one boot attribute list into runtime attributes.
///
/// Returns `None` when a dependency is not ready yet (only possible with
/// `require_finished_embeddables`, the fixed-point caller); missing
/// references are always fatal.
pub(crate) fn resolve_attributes(
    source: &str,
    attrs: &[AttributeMapping],
    model: &InFlightRuntimeModel,
    ctx: &RuntimeCreationContext,
    tasks: &mut Vec<NavigableTask>,
    require_finished_embeddables: bool,
) -> Result<Option<Vec<RuntimeAttribute>>, RuntimeModelError> {
    let mut resolved = Vec::with_capacity(attrs.len());

    for attr in attrs {
        match attr {
            AttributeMapping::Basic(basic) => {
                resolved.push(RuntimeAttribute::Basic(resolve_basic(basic, &ctx.types)));
            }
            AttributeMapping::Embedded(embedded) => {
                let Some(descriptor) = model.embeddable(&embedded.embeddable) else {
                    return Err(RuntimeModelError::UnknownReference {
                        kind: "embeddable",
                        name: embedded.embeddable.clone(),
                        referenced_from: source.to_string(),
                    });
                };
                if require_finished_embeddables && !descriptor.is_finished() {
                    return Ok(None);
                }
                resolved.push(RuntimeAttribute::Embedded(EmbeddedAttribute {
                    name: embedded.name.clone(),
                    embeddable: embedded.embeddable.clone(),
                }));
            }
            AttributeMapping::ToOne(to_one) => {
                if model.entity_by_any_name(&to_one.target_entity).is_none() {
                    return Err(RuntimeModelError::UnknownReference {
                        kind: "entity",
                        name: to_one.target_entity.clone(),
                        referenced_from: source.to_string(),
                    });
                }
                tasks.push(NavigableTask::ResolveForeignKey {
                    source: source.to_string(),
                    attribute: to_one.name.clone(),
                    target: to_one.target_entity.clone(),
                    join_column: to_one.join_column.clone(),
                });
                resolved.push(RuntimeAttribute::ToOne(ToOneAttribute {
                    name: to_one.name.clone(),
                    target_entity: to_one.target_entity.clone(),
                    join_column: to_one.join_column.clone(),
                    fetch: to_one.fetch,
                    optional: to_one.optional,
                }));
            }
            AttributeMapping::Plural(plural) => {
                if model.collection(&plural.role).is_none() {
                    return Err(RuntimeModelError::UnknownReference {
                        kind: "collection",
                        name: plural.role.clone(),
                        referenced_from: source.to_string(),
                    });
                }
                resolved.push(RuntimeAttribute::Plural(PluralAttribute {
                    name: plural.name.clone(),
                    role: plural.role.clone(),
                }));
            }
        }
    }

    Ok(Some(resolved))
}
