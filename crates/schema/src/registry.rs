use crate::model::EnumDef;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// A registered enum together with the document it came from. The source
/// document decides which generated proto file a message must import.
#[derive(Debug, Clone)]
pub struct EnumDecl {
    pub def: EnumDef,
    pub document: String,
}

/// internal flat state
#[derive(Default)]
struct State {
    enums: HashMap<String, EnumDecl>,
}

/// Shared enum registry. Grows monotonically while enum documents load and
/// must be fully populated before any table referencing those enums is
/// resolved; the driver's two-phase run enforces that ordering.
#[derive(Clone, Default)]
pub struct TypeRegistry {
    inner: Arc<RwLock<State>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_enum(&self, def: EnumDef, document: &str) {
        let mut g = self.inner.write();
        g.enums.insert(
            def.name.clone(),
            EnumDecl {
                def,
                document: document.to_string(),
            },
        );
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.read().enums.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<EnumDecl> {
        self.inner.read().enums.get(name).cloned()
    }

    /// The ordinal-1 member, used as the class-stub default for enum columns.
    pub fn first_member(&self, name: &str) -> Option<String> {
        self.inner
            .read()
            .enums
            .get(name)
            .and_then(|decl| decl.def.members.first().cloned())
    }

    pub fn document_of(&self, name: &str) -> Option<String> {
        self.inner
            .read()
            .enums
            .get(name)
            .map(|decl| decl.document.clone())
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.read().enums.keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status() -> EnumDef {
        EnumDef {
            name: "Status".to_string(),
            members: vec!["DRAFT".into(), "PUBLISHED".into(), "ARCHIVED".into()],
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let registry = TypeRegistry::new();
        assert!(!registry.contains("Status"));

        registry.register_enum(status(), "enums");
        assert!(registry.contains("Status"));
        assert_eq!(registry.first_member("Status").unwrap(), "DRAFT");
        assert_eq!(registry.document_of("Status").unwrap(), "enums");
    }

    #[test]
    fn test_registry_grows_monotonically_across_clones() {
        let registry = TypeRegistry::new();
        let shared = registry.clone();
        registry.register_enum(status(), "enums");
        shared.register_enum(
            EnumDef {
                name: "Projectdifficulty".to_string(),
                members: vec!["EASY".into(), "HARD".into()],
            },
            "enums",
        );

        assert_eq!(registry.names(), vec!["Projectdifficulty", "Status"]);
        assert_eq!(shared.names(), registry.names());
    }
}
