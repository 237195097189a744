use crate::usage::AnnotationUsage;
use derive_more::Display;
use std::sync::Arc;

///
/// TypeName
///
/// Identity of an annotation type or managed type. Logical names are plain
/// strings; nothing here assumes a host-platform class actually exists.
///

#[derive(Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[display("{_0}")]
pub struct TypeName(String);

impl TypeName {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Final segment of a dotted or `::`-separated name.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.0
            .rsplit(['.', ':'])
            .next()
            .unwrap_or(self.0.as_str())
    }
}

impl From<&str> for TypeName {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TypeName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

///
/// AnnotationValue
///
/// Typed value of one annotation attribute. Plays the role an opaque host
/// object would play in a reflective system; extraction is explicit instead.
///

#[derive(Clone, Debug, PartialEq)]
pub enum AnnotationValue {
    Bool(bool),
    Int(i64),
    Str(String),
    EnumConst { enum_type: TypeName, constant: String },
    TypeRef(TypeName),
    Nested(Arc<AnnotationUsage>),
    List(Vec<AnnotationValue>),
}

impl AnnotationValue {
    #[must_use]
    pub fn str(value: impl Into<String>) -> Self {
        Self::Str(value.into())
    }

    #[must_use]
    pub fn enum_const(enum_type: impl Into<TypeName>, constant: impl Into<String>) -> Self {
        Self::EnumConst {
            enum_type: enum_type.into(),
            constant: constant.into(),
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_enum_constant(&self) -> Option<&str> {
        match self {
            Self::EnumConst { constant, .. } => Some(constant),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_type_ref(&self) -> Option<&TypeName> {
        match self {
            Self::TypeRef(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_nested(&self) -> Option<&Arc<AnnotationUsage>> {
        match self {
            Self::Nested(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(v) => Some(v),
            _ => None,
        }
    }

    /// Nested usages of a list-valued attribute, in declaration order.
    #[must_use]
    pub fn nested_usages(&self) -> Vec<Arc<AnnotationUsage>> {
        match self {
            Self::List(values) => values
                .iter()
                .filter_map(|v| v.as_nested().cloned())
                .collect(),
            Self::Nested(usage) => vec![usage.clone()],
            _ => Vec::new(),
        }
    }
}

///
/// AttributeValue
///
/// One attribute's value on one usage, plus whether it is the annotation's
/// declared default. The flag is best-effort: some raw sources cannot tell an
/// explicitly-written default apart from an unset attribute.
///

#[derive(Clone, Debug, PartialEq)]
pub struct AttributeValue {
    pub value: AnnotationValue,
    pub defaulted: bool,
}

impl AttributeValue {
    #[must_use]
    pub const fn explicit(value: AnnotationValue) -> Self {
        Self {
            value,
            defaulted: false,
        }
    }

    #[must_use]
    pub const fn defaulted(value: AnnotationValue) -> Self {
        Self {
            value,
            defaulted: true,
        }
    }
}
