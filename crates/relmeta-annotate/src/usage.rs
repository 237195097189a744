use crate::{
    descriptor::AnnotationDescriptor,
    error::AccessError,
    value::{AnnotationValue, AttributeValue, TypeName},
};
use std::{collections::HashMap, sync::Arc};

///
/// AnnotationUsage
///
/// One application of an annotation to a target: the descriptor it
/// instantiates plus the attribute values written on it. Values not written
/// explicitly fall back to the descriptor's declared defaults on access.
///

#[derive(Clone, Debug)]
pub struct AnnotationUsage {
    descriptor: Arc<AnnotationDescriptor>,
    values: HashMap<String, AttributeValue>,
}

impl PartialEq for AnnotationUsage {
    fn eq(&self, other: &Self) -> bool {
        self.annotation_type() == other.annotation_type() && self.values == other.values
    }
}

impl AnnotationUsage {
    #[must_use]
    pub fn builder(descriptor: Arc<AnnotationDescriptor>) -> UsageBuilder {
        UsageBuilder {
            descriptor,
            values: HashMap::new(),
        }
    }

    #[must_use]
    pub fn descriptor(&self) -> &Arc<AnnotationDescriptor> {
        &self.descriptor
    }

    #[must_use]
    pub fn annotation_type(&self) -> &TypeName {
        self.descriptor.annotation_type()
    }

    /// Resolve an attribute to its explicit value or declared default.
    /// `None` means the attribute exists but has neither.
    pub fn find_value(&self, attribute: &str) -> Result<Option<&AnnotationValue>, AccessError> {
        let descriptor_attr = self.descriptor.attribute(attribute).ok_or_else(|| {
            AccessError::UnknownAttribute {
                annotation: self.annotation_type().clone(),
                attribute: attribute.to_string(),
            }
        })?;

        if let Some(held) = self.values.get(attribute) {
            return Ok(Some(&held.value));
        }

        Ok(descriptor_attr.default.as_ref())
    }

    /// Whether the attribute resolves to the declared default (best-effort).
    #[must_use]
    pub fn is_defaulted(&self, attribute: &str) -> bool {
        self.values.get(attribute).is_none_or(|v| v.defaulted)
    }

    pub fn string_value(&self, attribute: &str) -> Result<&str, AccessError> {
        self.typed_value(attribute, "string", AnnotationValue::as_str)
    }

    pub fn bool_value(&self, attribute: &str) -> Result<bool, AccessError> {
        self.typed_value(attribute, "boolean", AnnotationValue::as_bool)
    }

    pub fn int_value(&self, attribute: &str) -> Result<i64, AccessError> {
        self.typed_value(attribute, "integer", AnnotationValue::as_int)
    }

    pub fn enum_value(&self, attribute: &str) -> Result<&str, AccessError> {
        self.typed_value(attribute, "enum constant", AnnotationValue::as_enum_constant)
    }

    pub fn type_value(&self, attribute: &str) -> Result<&TypeName, AccessError> {
        self.typed_value(attribute, "type reference", AnnotationValue::as_type_ref)
    }

    /// Nested usages of a list-valued attribute; empty when unset.
    pub fn nested_usages(&self, attribute: &str) -> Result<Vec<Arc<Self>>, AccessError> {
        Ok(self
            .find_value(attribute)?
            .map(AnnotationValue::nested_usages)
            .unwrap_or_default())
    }

    fn typed_value<'a, T>(
        &'a self,
        attribute: &str,
        expected: &'static str,
        extract: impl FnOnce(&'a AnnotationValue) -> Option<T>,
    ) -> Result<T, AccessError> {
        let value = self
            .find_value(attribute)?
            .ok_or_else(|| AccessError::UnknownAttribute {
                annotation: self.annotation_type().clone(),
                attribute: attribute.to_string(),
            })?;

        extract(value).ok_or_else(|| AccessError::AttributeType {
            annotation: self.annotation_type().clone(),
            attribute: attribute.to_string(),
            expected,
        })
    }
}

///
/// UsageBuilder
///
/// Accumulates attribute values; rejects names the descriptor does not
/// declare, so a synthesized usage can never drift from its annotation type.
///

pub struct UsageBuilder {
    descriptor: Arc<AnnotationDescriptor>,
    values: HashMap<String, AttributeValue>,
}

impl UsageBuilder {
    pub fn value(
        mut self,
        attribute: impl Into<String>,
        value: AnnotationValue,
    ) -> Result<Self, AccessError> {
        let attribute = attribute.into();
        if self.descriptor.attribute(&attribute).is_none() {
            return Err(AccessError::UnknownAttribute {
                annotation: self.descriptor.annotation_type().clone(),
                attribute,
            });
        }
        self.values
            .insert(attribute, AttributeValue::explicit(value));
        Ok(self)
    }

    #[must_use]
    pub fn build(self) -> Arc<AnnotationUsage> {
        Arc::new(AnnotationUsage {
            descriptor: self.descriptor,
            values: self.values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::AnnotationDescriptor;

    fn widget() -> Arc<AnnotationDescriptor> {
        AnnotationDescriptor::builder("Widget")
            .attribute("name", Some(AnnotationValue::str("unnamed")))
            .attribute("count", Some(AnnotationValue::Int(0)))
            .build()
    }

    #[test]
    fn explicit_value_wins_over_default() {
        let usage = AnnotationUsage::builder(widget())
            .value("name", AnnotationValue::str("gear"))
            .unwrap()
            .build();

        assert_eq!(usage.string_value("name").unwrap(), "gear");
        assert_eq!(usage.int_value("count").unwrap(), 0);
        assert!(!usage.is_defaulted("name"));
        assert!(usage.is_defaulted("count"));
    }

    #[test]
    fn unknown_attribute_is_an_access_error() {
        let usage = AnnotationUsage::builder(widget()).build();
        assert!(matches!(
            usage.string_value("missing"),
            Err(AccessError::UnknownAttribute { .. })
        ));
        assert!(
            AnnotationUsage::builder(widget())
                .value("missing", AnnotationValue::Bool(true))
                .is_err()
        );
    }

    #[test]
    fn type_mismatch_is_an_access_error() {
        let usage = AnnotationUsage::builder(widget()).build();
        assert!(matches!(
            usage.bool_value("name"),
            Err(AccessError::AttributeType { .. })
        ));
    }
}
