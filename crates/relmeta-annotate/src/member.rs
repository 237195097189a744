use crate::{
    target::{AnnotationTarget, TargetKind, Usages},
    value::TypeName,
};

///
/// MemberKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MemberKind {
    Field,
    Method,
}

///
/// MemberDetails
///
/// A field or accessor method on a managed type. For methods, the persistent
/// attribute name is derived from the accessor name (`getName`/`isOpen` →
/// `name`/`open`); for fields the two coincide.
///

#[derive(Debug)]
pub struct MemberDetails {
    name: String,
    kind: MemberKind,
    member_type: Option<TypeName>,
    usages: Usages,
}

impl MemberDetails {
    #[must_use]
    pub fn field(name: impl Into<String>, member_type: Option<TypeName>, usages: Usages) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Field,
            member_type,
            usages,
        }
    }

    #[must_use]
    pub fn method(name: impl Into<String>, member_type: Option<TypeName>, usages: Usages) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Method,
            member_type,
            usages,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn kind(&self) -> MemberKind {
        self.kind
    }

    #[must_use]
    pub const fn member_type(&self) -> Option<&TypeName> {
        self.member_type.as_ref()
    }

    /// Persistent attribute name this member backs.
    #[must_use]
    pub fn attribute_name(&self) -> &str {
        match self.kind {
            MemberKind::Field => &self.name,
            MemberKind::Method => strip_accessor_prefix(&self.name),
        }
    }
}

impl AnnotationTarget for MemberDetails {
    fn target_kind(&self) -> TargetKind {
        match self.kind {
            MemberKind::Field => TargetKind::Field,
            MemberKind::Method => TargetKind::Method,
        }
    }

    fn target_name(&self) -> String {
        format!("{} {}", self.target_kind(), self.name)
    }

    fn usages(&self) -> &Usages {
        &self.usages
    }
}

// Accessor prefixes resolve case-insensitively on the boundary character
// only; `getURL` keeps its tail casing (`uRL` is wrong, `URL` stays).
fn strip_accessor_prefix(method_name: &str) -> &str {
    for prefix in ["get", "is"] {
        if let Some(tail) = method_name.strip_prefix(prefix)
            && tail.chars().next().is_some_and(char::is_uppercase)
        {
            return tail;
        }
    }
    method_name
}

/// Lowercase the leading character of a derived attribute name, leaving
/// all-caps tails intact.
#[must_use]
pub fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => {
            let rest: String = chars.collect();
            if rest.chars().next().is_some_and(char::is_uppercase) {
                // Consecutive capitals ("URL") stay as written.
                name.to_string()
            } else {
                format!("{}{rest}", first.to_lowercase())
            }
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_attribute_name_is_the_field_name() {
        let member = MemberDetails::field("title", None, Usages::delayed());
        assert_eq!(member.attribute_name(), "title");
    }

    #[test]
    fn method_attribute_name_strips_accessor_prefix() {
        let member = MemberDetails::method("getTitle", None, Usages::delayed());
        assert_eq!(member.attribute_name(), "Title");
        assert_eq!(decapitalize(member.attribute_name()), "title");

        let bool_member = MemberDetails::method("isOpen", None, Usages::delayed());
        assert_eq!(decapitalize(bool_member.attribute_name()), "open");
    }

    #[test]
    fn all_caps_tail_keeps_casing() {
        assert_eq!(decapitalize("URL"), "URL");
    }

    #[test]
    fn non_accessor_method_name_passes_through() {
        let member = MemberDetails::method("compute", None, Usages::delayed());
        assert_eq!(member.attribute_name(), "compute");
    }
}
