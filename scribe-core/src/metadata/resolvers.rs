use crate::{
    EntityDef, MemberDef, QueryError, RelationKind, Result, TableRef, foreign_key_convention,
    pluralize,
};
use std::{fmt, sync::Arc};

/// Table name of an entity.
pub trait TableNameResolver: Send + Sync {
    fn resolve_table_name(&self, entity: &EntityDef) -> TableRef;
}

/// Column name of a member.
pub trait ColumnNameResolver: Send + Sync {
    fn resolve_column_name(&self, entity: &EntityDef, member: &MemberDef) -> String;
}

/// Key members of an entity, in key order.
pub trait KeyPropertyResolver: Send + Sync {
    fn resolve_key_properties(&self, entity: &'static EntityDef) -> Result<Vec<&'static MemberDef>>;
}

/// Foreign key member relating `source` and `target`, together with the side holding it.
pub trait ForeignKeyPropertyResolver: Send + Sync {
    fn resolve_foreign_key(
        &self,
        source: &'static EntityDef,
        target: &'static EntityDef,
    ) -> Result<(&'static MemberDef, RelationKind)>;
}

/// Explicit table name, otherwise the pluralized type name.
#[derive(Default, Debug, Clone, Copy)]
pub struct DefaultTableNameResolver;

impl TableNameResolver for DefaultTableNameResolver {
    fn resolve_table_name(&self, entity: &EntityDef) -> TableRef {
        TableRef {
            name: entity
                .table
                .map(Into::into)
                .unwrap_or_else(|| pluralize(entity.name)),
            schema: entity.schema.map(Into::into),
        }
    }
}

/// Explicit column name, otherwise the member name verbatim.
#[derive(Default, Debug, Clone, Copy)]
pub struct DefaultColumnNameResolver;

impl ColumnNameResolver for DefaultColumnNameResolver {
    fn resolve_column_name(&self, _entity: &EntityDef, member: &MemberDef) -> String {
        member.column.unwrap_or(member.name).into()
    }
}

/// Explicit declarations first (member flags and entity key list must agree), then a member named `id`.
#[derive(Default, Debug, Clone, Copy)]
pub struct DefaultKeyPropertyResolver;

impl KeyPropertyResolver for DefaultKeyPropertyResolver {
    fn resolve_key_properties(&self, entity: &'static EntityDef) -> Result<Vec<&'static MemberDef>> {
        let flagged: Vec<&'static MemberDef> = entity.members.iter().filter(|v| v.key).collect();
        if !entity.key.is_empty() {
            let same = flagged.is_empty()
                || (flagged.len() == entity.key.len()
                    && flagged.iter().all(|v| entity.key.contains(&v.name)));
            if !same {
                return Err(QueryError::AmbiguousKeyAnnotation {
                    entity: entity.name,
                    members: flagged.iter().map(|v| v.name).collect(),
                    listed: entity.key.to_vec(),
                }
                .into());
            }
            return entity
                .key
                .iter()
                .map(|name| {
                    entity.member(name).ok_or_else(|| {
                        QueryError::UnmappedMember {
                            entity: entity.name,
                            member: *name,
                        }
                        .into()
                    })
                })
                .collect();
        }
        if !flagged.is_empty() {
            return Ok(flagged);
        }
        entity
            .members
            .iter()
            .find(|v| v.name.eq_ignore_ascii_case("id"))
            .map(|v| vec![v])
            .ok_or_else(|| {
                QueryError::KeyResolution {
                    entity: entity.name,
                }
                .into()
            })
    }
}

/// Explicit `foreign_key` declarations first, then the `<Type>Id` naming convention.
#[derive(Default, Debug, Clone, Copy)]
pub struct DefaultForeignKeyPropertyResolver;

impl ForeignKeyPropertyResolver for DefaultForeignKeyPropertyResolver {
    fn resolve_foreign_key(
        &self,
        source: &'static EntityDef,
        target: &'static EntityDef,
    ) -> Result<(&'static MemberDef, RelationKind)> {
        let declared = |holder: &'static EntityDef, referenced: &EntityDef| {
            holder
                .members
                .iter()
                .find(|v| v.foreign_key == Some(referenced.name))
        };
        let conventional = |holder: &'static EntityDef, referenced: &EntityDef| {
            holder
                .members
                .iter()
                .find(|v| foreign_key_convention(referenced.name, v.name))
        };
        declared(source, target)
            .map(|v| (v, RelationKind::OneToOne))
            .or_else(|| declared(target, source).map(|v| (v, RelationKind::OneToMany)))
            .or_else(|| conventional(source, target).map(|v| (v, RelationKind::OneToOne)))
            .or_else(|| conventional(target, source).map(|v| (v, RelationKind::OneToMany)))
            .ok_or_else(|| {
                QueryError::ForeignKeyResolution {
                    entity: source.name,
                    related: target.name,
                }
                .into()
            })
    }
}

/// Name resolution strategies, fixed for the lifetime of a [`crate::MetadataResolver`].
#[derive(Clone)]
pub struct Resolvers {
    pub table: Arc<dyn TableNameResolver>,
    pub column: Arc<dyn ColumnNameResolver>,
    pub key: Arc<dyn KeyPropertyResolver>,
    pub foreign_key: Arc<dyn ForeignKeyPropertyResolver>,
}

impl Resolvers {
    pub fn with_table_name_resolver(mut self, resolver: impl TableNameResolver + 'static) -> Self {
        self.table = Arc::new(resolver);
        self
    }

    pub fn with_column_name_resolver(mut self, resolver: impl ColumnNameResolver + 'static) -> Self {
        self.column = Arc::new(resolver);
        self
    }

    pub fn with_key_property_resolver(mut self, resolver: impl KeyPropertyResolver + 'static) -> Self {
        self.key = Arc::new(resolver);
        self
    }

    pub fn with_foreign_key_property_resolver(
        mut self,
        resolver: impl ForeignKeyPropertyResolver + 'static,
    ) -> Self {
        self.foreign_key = Arc::new(resolver);
        self
    }
}

impl Default for Resolvers {
    fn default() -> Self {
        Self {
            table: Arc::new(DefaultTableNameResolver),
            column: Arc::new(DefaultColumnNameResolver),
            key: Arc::new(DefaultKeyPropertyResolver),
            foreign_key: Arc::new(DefaultForeignKeyPropertyResolver),
        }
    }
}

impl fmt::Debug for Resolvers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolvers").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GenerationStrategy;

    static PRODUCT_MEMBERS: [MemberDef; 3] = [
        MemberDef::new("Id"),
        MemberDef::new("Name").column("product_name"),
        MemberDef::new("CategoryId"),
    ];
    static PRODUCT: EntityDef = EntityDef::new("Product").members(&PRODUCT_MEMBERS);

    static CATEGORY_MEMBERS: [MemberDef; 2] = [MemberDef::new("Id"), MemberDef::new("Name")];
    static CATEGORY: EntityDef = EntityDef::new("Category")
        .schema("shop")
        .members(&CATEGORY_MEMBERS);

    static CONFLICT_MEMBERS: [MemberDef; 2] =
        [MemberDef::new("a").key(), MemberDef::new("b")];
    static CONFLICT: EntityDef = EntityDef::new("Conflict")
        .key(&["b"])
        .members(&CONFLICT_MEMBERS);

    static LISTED_MEMBERS: [MemberDef; 3] = [
        MemberDef::new("year").key(),
        MemberDef::new("number").key().generated(GenerationStrategy::None),
        MemberDef::new("id"),
    ];
    static LISTED: EntityDef = EntityDef::new("Invoice")
        .key(&["number", "year"])
        .members(&LISTED_MEMBERS);

    static NO_KEY_MEMBERS: [MemberDef; 1] = [MemberDef::new("value")];
    static NO_KEY: EntityDef = EntityDef::new("Setting").members(&NO_KEY_MEMBERS);

    #[test]
    fn table_names() {
        let resolver = DefaultTableNameResolver;
        assert_eq!(resolver.resolve_table_name(&PRODUCT), TableRef::new("Products"));
        assert_eq!(
            resolver.resolve_table_name(&CATEGORY),
            TableRef::new("Categories").with_schema("shop")
        );
    }

    #[test]
    fn column_names() {
        let resolver = DefaultColumnNameResolver;
        assert_eq!(resolver.resolve_column_name(&PRODUCT, &PRODUCT_MEMBERS[0]), "Id");
        assert_eq!(
            resolver.resolve_column_name(&PRODUCT, &PRODUCT_MEMBERS[1]),
            "product_name"
        );
    }

    #[test]
    fn keys() {
        let resolver = DefaultKeyPropertyResolver;
        let keys = resolver.resolve_key_properties(&PRODUCT).unwrap();
        assert_eq!(keys.iter().map(|v| v.name).collect::<Vec<_>>(), ["Id"]);
        let keys = resolver.resolve_key_properties(&LISTED).unwrap();
        assert_eq!(keys.iter().map(|v| v.name).collect::<Vec<_>>(), ["number", "year"]);

        let error = resolver.resolve_key_properties(&CONFLICT).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<QueryError>(),
            Some(QueryError::AmbiguousKeyAnnotation { entity: "Conflict", .. })
        ));
        let error = resolver.resolve_key_properties(&NO_KEY).unwrap_err();
        assert_eq!(
            error.downcast_ref::<QueryError>(),
            Some(&QueryError::KeyResolution { entity: "Setting" })
        );
    }

    #[test]
    fn foreign_keys() {
        let resolver = DefaultForeignKeyPropertyResolver;
        let (member, kind) = resolver.resolve_foreign_key(&PRODUCT, &CATEGORY).unwrap();
        assert_eq!((member.name, kind), ("CategoryId", RelationKind::OneToOne));
        let (member, kind) = resolver.resolve_foreign_key(&CATEGORY, &PRODUCT).unwrap();
        assert_eq!((member.name, kind), ("CategoryId", RelationKind::OneToMany));
        let error = resolver.resolve_foreign_key(&PRODUCT, &NO_KEY).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<QueryError>(),
            Some(QueryError::ForeignKeyResolution { .. })
        ));
    }
}
