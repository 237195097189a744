//! Type-system and dialect capabilities.
//!
//! These are the boundaries this core consumes rather than implements: a
//! dialect that names column types and lock hints, and registries mapping
//! model-level types to JDBC-level descriptors. A minimal ANSI dialect is
//! provided so boot and tests need no vendor code.

use crate::lock::LockMode;
use derive_more::Display;
use relmeta_annotate::value::TypeName;
use std::{collections::BTreeMap, sync::Arc};

///
/// JdbcTypeCode
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[display("{_0}")]
pub struct JdbcTypeCode(pub i32);

/// Standard type codes, numbered as the JDBC spec numbers them.
pub mod jdbc_codes {
    use super::JdbcTypeCode;

    pub const BIT: JdbcTypeCode = JdbcTypeCode(-7);
    pub const BIGINT: JdbcTypeCode = JdbcTypeCode(-5);
    pub const NVARCHAR: JdbcTypeCode = JdbcTypeCode(-9);
    pub const INTEGER: JdbcTypeCode = JdbcTypeCode(4);
    pub const SMALLINT: JdbcTypeCode = JdbcTypeCode(5);
    pub const FLOAT: JdbcTypeCode = JdbcTypeCode(6);
    pub const DOUBLE: JdbcTypeCode = JdbcTypeCode(8);
    pub const VARCHAR: JdbcTypeCode = JdbcTypeCode(12);
    pub const BOOLEAN: JdbcTypeCode = JdbcTypeCode(16);
    pub const DATE: JdbcTypeCode = JdbcTypeCode(91);
    pub const TIME: JdbcTypeCode = JdbcTypeCode(92);
    pub const TIMESTAMP: JdbcTypeCode = JdbcTypeCode(93);
    pub const BLOB: JdbcTypeCode = JdbcTypeCode(2004);
    pub const CLOB: JdbcTypeCode = JdbcTypeCode(2005);
    pub const NCLOB: JdbcTypeCode = JdbcTypeCode(2011);
}

///
/// JdbcTypeDescriptor
///

#[derive(Clone, Debug)]
pub struct JdbcTypeDescriptor {
    pub code: JdbcTypeCode,
    pub type_name: String,
}

///
/// JdbcTypeRegistry
///

#[derive(Debug, Default)]
pub struct JdbcTypeRegistry {
    descriptors: BTreeMap<JdbcTypeCode, Arc<JdbcTypeDescriptor>>,
}

impl JdbcTypeRegistry {
    #[must_use]
    pub fn get_descriptor(&self, code: JdbcTypeCode) -> Option<Arc<JdbcTypeDescriptor>> {
        self.descriptors.get(&code).cloned()
    }

    pub fn add_descriptor(&mut self, descriptor: JdbcTypeDescriptor) {
        self.descriptors
            .insert(descriptor.code, Arc::new(descriptor));
    }

    #[must_use]
    pub fn has_registered_descriptor(&self, code: JdbcTypeCode) -> bool {
        self.descriptors.contains_key(&code)
    }
}

///
/// JavaTypeDescriptor
/// Model-level value type and the JDBC code it recommends.
///

#[derive(Clone, Debug)]
pub struct JavaTypeDescriptor {
    pub type_name: TypeName,
    pub recommended_jdbc_code: JdbcTypeCode,
}

///
/// JavaTypeRegistry
///

#[derive(Debug, Default)]
pub struct JavaTypeRegistry {
    descriptors: BTreeMap<TypeName, Arc<JavaTypeDescriptor>>,
}

impl JavaTypeRegistry {
    #[must_use]
    pub fn resolve_descriptor(&self, type_name: &TypeName) -> Option<Arc<JavaTypeDescriptor>> {
        self.descriptors.get(type_name).cloned()
    }

    pub fn add_descriptor(&mut self, descriptor: JavaTypeDescriptor) {
        self.descriptors
            .insert(descriptor.type_name.clone(), Arc::new(descriptor));
    }
}

///
/// TypeConfiguration
///

#[derive(Debug, Default)]
pub struct TypeConfiguration {
    pub jdbc_types: JdbcTypeRegistry,
    pub java_types: JavaTypeRegistry,
}

impl TypeConfiguration {
    /// Baseline registrations plus dialect-preferred overrides.
    #[must_use]
    pub fn standard(dialect: &dyn Dialect) -> Self {
        let mut config = Self::default();

        for (code, name) in [
            (jdbc_codes::BOOLEAN, "boolean"),
            (jdbc_codes::INTEGER, "integer"),
            (jdbc_codes::BIGINT, "bigint"),
            (jdbc_codes::DOUBLE, "double"),
            (jdbc_codes::VARCHAR, "varchar"),
            (jdbc_codes::NVARCHAR, "nvarchar"),
            (jdbc_codes::DATE, "date"),
            (jdbc_codes::TIME, "time"),
            (jdbc_codes::TIMESTAMP, "timestamp"),
            (jdbc_codes::BLOB, "blob"),
            (jdbc_codes::CLOB, "clob"),
            (jdbc_codes::NCLOB, "nclob"),
        ] {
            config.jdbc_types.add_descriptor(JdbcTypeDescriptor {
                code,
                type_name: name.to_string(),
            });
        }

        for (type_name, code) in [
            ("String", jdbc_codes::VARCHAR),
            ("Boolean", jdbc_codes::BOOLEAN),
            ("Integer", jdbc_codes::INTEGER),
            ("Long", jdbc_codes::BIGINT),
            ("Double", jdbc_codes::DOUBLE),
            ("Instant", jdbc_codes::TIMESTAMP),
            ("LocalDate", jdbc_codes::DATE),
            ("LocalTime", jdbc_codes::TIME),
            ("Bytes", jdbc_codes::BLOB),
        ] {
            config.java_types.add_descriptor(JavaTypeDescriptor {
                type_name: type_name.into(),
                recommended_jdbc_code: code,
            });
        }

        dialect.contribute_types(&mut config.jdbc_types);
        config
    }
}

///
/// Dialect
///
/// Vendor capability consumed when SQL text and type fallbacks are built.
///

pub trait Dialect {
    fn name(&self) -> &str;

    /// Column type string for a JDBC code.
    fn column_type_name(&self, code: JdbcTypeCode) -> String;

    /// Declaration fragment for an identity column.
    fn identity_column_string(&self) -> &str;

    /// Trailing lock hint for a select under the given mode, if any.
    fn lock_hint(&self, mode: LockMode) -> Option<String>;

    /// Register or override dialect-preferred JDBC descriptors.
    fn contribute_types(&self, _registry: &mut JdbcTypeRegistry) {}
}

///
/// AnsiDialect
///

#[derive(Clone, Copy, Debug, Default)]
pub struct AnsiDialect;

impl Dialect for AnsiDialect {
    fn name(&self) -> &str {
        "ansi"
    }

    fn column_type_name(&self, code: JdbcTypeCode) -> String {
        let name = match code {
            jdbc_codes::BOOLEAN | jdbc_codes::BIT => "boolean",
            jdbc_codes::SMALLINT => "smallint",
            jdbc_codes::INTEGER => "integer",
            jdbc_codes::BIGINT => "bigint",
            jdbc_codes::FLOAT | jdbc_codes::DOUBLE => "double precision",
            jdbc_codes::NVARCHAR => "nvarchar(255)",
            jdbc_codes::DATE => "date",
            jdbc_codes::TIME => "time",
            jdbc_codes::TIMESTAMP => "timestamp",
            jdbc_codes::BLOB => "blob",
            jdbc_codes::CLOB => "clob",
            jdbc_codes::NCLOB => "nclob",
            _ => "varchar(255)",
        };
        name.to_string()
    }

    fn identity_column_string(&self) -> &str {
        "generated by default as identity"
    }

    fn lock_hint(&self, mode: LockMode) -> Option<String> {
        match mode {
            LockMode::Upgrade | LockMode::PessimisticForceIncrement | LockMode::Write => {
                Some("for update".to_string())
            }
            LockMode::UpgradeNowait => Some("for update nowait".to_string()),
            LockMode::UpgradeSkipLocked => Some("for update skip locked".to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_configuration_registers_fallbacks() {
        let config = TypeConfiguration::standard(&AnsiDialect);
        assert!(config.jdbc_types.has_registered_descriptor(jdbc_codes::VARCHAR));
        assert!(
            config
                .java_types
                .resolve_descriptor(&"String".into())
                .is_some()
        );
    }

    #[test]
    fn ansi_lock_hints_cover_pessimistic_modes() {
        let dialect = AnsiDialect;
        assert!(dialect.lock_hint(LockMode::Read).is_none());
        assert_eq!(
            dialect.lock_hint(LockMode::Upgrade).as_deref(),
            Some("for update")
        );
        assert_eq!(
            dialect.lock_hint(LockMode::UpgradeSkipLocked).as_deref(),
            Some("for update skip locked")
        );
    }
}
