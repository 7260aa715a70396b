use crate::db::schema::Entity;
use crate::error::SchemaError;
use std::collections::BTreeSet;

/// Non-empty set of entities to (re)initialize, iterated in canonical order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySelection {
    entities: BTreeSet<Entity>,
}

impl EntitySelection {
    pub fn new(entities: impl IntoIterator<Item = Entity>) -> Result<Self, SchemaError> {
        let entities: BTreeSet<Entity> = entities.into_iter().collect();
        if entities.is_empty() {
            return Err(SchemaError::EmptySelection);
        }
        Ok(Self { entities })
    }

    pub fn all() -> Self {
        Self {
            entities: Entity::ALL.into_iter().collect(),
        }
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl Default for EntitySelection {
    fn default() -> Self {
        Self::all()
    }
}
