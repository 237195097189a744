use crate::{
    member::{MemberDetails, MemberKind},
    target::{AnnotationTarget, TargetKind, Usages},
    value::TypeName,
};
use std::sync::Arc;

///
/// ClassDetails
///
/// One managed type (entity, embeddable, mapped-superclass), whether backed
/// by a real host class or synthesized from an XML mapping document. The
/// logical name may differ from the type name for entity-name mappings, and
/// the type name is absent entirely for fully dynamic models.
///
/// Structure (members, super-type, interfaces) is immutable once registered;
/// a delayed-lifecycle usage set may still accumulate annotation usages.
///

#[derive(Debug)]
pub struct ClassDetails {
    name: String,
    class_name: Option<TypeName>,
    is_abstract: bool,
    super_class: Option<String>,
    interfaces: Vec<TypeName>,
    fields: Vec<Arc<MemberDetails>>,
    methods: Vec<Arc<MemberDetails>>,
    usages: Usages,
}

impl ClassDetails {
    #[must_use]
    pub fn builder(name: impl Into<String>) -> ClassDetailsBuilder {
        ClassDetailsBuilder {
            name: name.into(),
            class_name: None,
            is_abstract: false,
            super_class: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            usages: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn class_name(&self) -> Option<&TypeName> {
        self.class_name.as_ref()
    }

    #[must_use]
    pub const fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    #[must_use]
    pub fn super_class(&self) -> Option<&str> {
        self.super_class.as_deref()
    }

    #[must_use]
    pub fn interfaces(&self) -> &[TypeName] {
        &self.interfaces
    }

    #[must_use]
    pub fn fields(&self) -> &[Arc<MemberDetails>] {
        &self.fields
    }

    #[must_use]
    pub fn methods(&self) -> &[Arc<MemberDetails>] {
        &self.methods
    }

    #[must_use]
    pub fn find_field(&self, name: &str) -> Option<&Arc<MemberDetails>> {
        self.fields.iter().find(|f| f.name() == name)
    }

    #[must_use]
    pub fn find_method(&self, name: &str) -> Option<&Arc<MemberDetails>> {
        self.methods.iter().find(|m| m.name() == name)
    }

    /// Member backing a persistent attribute, searching fields first and
    /// accessor methods second.
    #[must_use]
    pub fn find_attribute_member(&self, attribute: &str) -> Option<&Arc<MemberDetails>> {
        self.fields
            .iter()
            .find(|f| f.attribute_name() == attribute)
            .or_else(|| {
                self.methods.iter().find(|m| {
                    crate::member::decapitalize(m.attribute_name()) == attribute
                })
            })
    }

    /// Members of one kind, in declaration order.
    #[must_use]
    pub fn members_of_kind(&self, kind: MemberKind) -> &[Arc<MemberDetails>] {
        match kind {
            MemberKind::Field => &self.fields,
            MemberKind::Method => &self.methods,
        }
    }
}

impl AnnotationTarget for ClassDetails {
    fn target_kind(&self) -> TargetKind {
        TargetKind::Class
    }

    fn target_name(&self) -> String {
        format!("class {}", self.name)
    }

    fn usages(&self) -> &Usages {
        &self.usages
    }
}

///
/// ClassDetailsBuilder
///

pub struct ClassDetailsBuilder {
    name: String,
    class_name: Option<TypeName>,
    is_abstract: bool,
    super_class: Option<String>,
    interfaces: Vec<TypeName>,
    fields: Vec<Arc<MemberDetails>>,
    methods: Vec<Arc<MemberDetails>>,
    usages: Option<Usages>,
}

impl ClassDetailsBuilder {
    #[must_use]
    pub fn class_name(mut self, class_name: impl Into<TypeName>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    #[must_use]
    pub const fn is_abstract(mut self, value: bool) -> Self {
        self.is_abstract = value;
        self
    }

    #[must_use]
    pub fn super_class(mut self, name: impl Into<String>) -> Self {
        self.super_class = Some(name.into());
        self
    }

    #[must_use]
    pub fn interface(mut self, name: impl Into<TypeName>) -> Self {
        self.interfaces.push(name.into());
        self
    }

    #[must_use]
    pub fn field(mut self, member: MemberDetails) -> Self {
        debug_assert_eq!(member.kind(), MemberKind::Field);
        self.fields.push(Arc::new(member));
        self
    }

    #[must_use]
    pub fn method(mut self, member: MemberDetails) -> Self {
        debug_assert_eq!(member.kind(), MemberKind::Method);
        self.methods.push(Arc::new(member));
        self
    }

    /// Set the usage lifecycle explicitly; defaults to delayed, the variant
    /// XML synthesis needs.
    #[must_use]
    pub fn usages(mut self, usages: Usages) -> Self {
        self.usages = Some(usages);
        self
    }

    #[must_use]
    pub fn build(self) -> Arc<ClassDetails> {
        Arc::new(ClassDetails {
            name: self.name,
            class_name: self.class_name,
            is_abstract: self.is_abstract,
            super_class: self.super_class,
            interfaces: self.interfaces,
            fields: self.fields,
            methods: self.methods,
            usages: self.usages.unwrap_or_else(Usages::delayed),
        })
    }
}
