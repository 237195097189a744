use crate::model::attribute::AttributeMapping;

///
/// EmbeddedValueMapping
///
/// Boot-time description of an embeddable value type. Embeddables may nest
/// other embeddables; those references resolve during runtime-model
/// completion, not here.
///

#[derive(Clone, Debug)]
pub struct EmbeddedValueMapping {
    pub managed_name: String,
    pub attributes: Vec<AttributeMapping>,
}
