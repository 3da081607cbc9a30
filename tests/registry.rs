#[cfg(test)]
mod tests {
    use scribe::{DialectRegistry, GenericSqlWriter, SqlWriter};

    #[derive(Default, Debug, Clone, Copy)]
    struct AuditWriter {}

    impl SqlWriter for AuditWriter {
        fn as_dyn(&self) -> &dyn SqlWriter {
            self
        }

        fn write_parameter(&self, out: &mut String, name: &str) {
            out.push(':');
            out.push_str(name);
        }
    }

    #[test]
    fn resolve() {
        let registry = DialectRegistry::default().register(&["audit", "AuditConnection"], AuditWriter {});
        assert_eq!(registry.resolve("AUDIT").dialect_name(), "AuditWriter");
        assert_eq!(registry.resolve("auditconnection").prefix_parameter("p1"), ":p1");
        assert_eq!(
            registry.resolve("audit://host/db?x=1").dialect_id(),
            AuditWriter {}.dialect_id()
        );
        assert_eq!(
            registry.resolve("unknown").dialect_id(),
            GenericSqlWriter::new().dialect_id()
        );
        assert!(format!("{registry:?}").contains("auditconnection"));
    }

    #[test]
    fn fallback() {
        let registry = DialectRegistry::new().with_fallback(AuditWriter {});
        assert_eq!(registry.resolve("anything").dialect_name(), "AuditWriter");
        assert_eq!(registry.fallback().dialect_name(), "AuditWriter");
    }
}
