use std::collections::HashMap;

use crate::core::{Creature, Drone, EntityId};

/// Partition of the identity space. Ids of an earlier partition are always smaller than ids
/// of a later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum EntityKind {
    Drone,
    Fish,
    Monster,
}

/// A record in the [`Registry`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum Entity {
    Drone(Drone),
    Fish(Creature),
    Monster(Creature),
}

impl Entity {
    #[must_use]
    pub fn id(&self) -> EntityId {
        match self {
            Self::Drone(drone) => drone.id(),
            Self::Fish(creature) | Self::Monster(creature) => creature.id(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Drone(_) => EntityKind::Drone,
            Self::Fish(_) => EntityKind::Fish,
            Self::Monster(_) => EntityKind::Monster,
        }
    }

    /// Wraps a creature into the variant matching its kind.
    #[must_use]
    pub fn from_creature(creature: Creature) -> Self {
        if creature.is_monster() {
            Self::Monster(creature)
        } else {
            Self::Fish(creature)
        }
    }

    fn as_creature(&self) -> Option<&Creature> {
        match self {
            Self::Fish(creature) | Self::Monster(creature) => Some(creature),
            Self::Drone(_) => None,
        }
    }

    fn as_creature_mut(&mut self) -> Option<&mut Creature> {
        match self {
            Self::Fish(creature) | Self::Monster(creature) => Some(creature),
            Self::Drone(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum RegistryError {
    #[display("entity {id} registered twice")]
    DuplicateId {
        #[error(not(source))]
        id: EntityId,
    },
    #[display("{kind} {id} breaks id ordering against {other_kind} {other_id}")]
    OutOfOrder {
        id: EntityId,
        kind: EntityKind,
        other_id: EntityId,
        other_kind: EntityKind,
    },
}

/// Id-ordered collection of every drone, fish and monster, with an id→index map.
///
/// Insertion validates that the identity space stays partitioned: all drone ids come before
/// all fish ids, which come before all monster ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    entities: Vec<Entity>,
    index: HashMap<EntityId, usize>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn insert(&mut self, entity: Entity) -> Result<(), RegistryError> {
        let id = entity.id();
        let kind = entity.kind();
        if self.index.contains_key(&id) {
            return Err(RegistryError::DuplicateId { id });
        }
        let misplaced = self.entities.iter().find(|other| {
            let other_kind = other.kind();
            (other_kind < kind && other.id() > id) || (other_kind > kind && other.id() < id)
        });
        if let Some(other) = misplaced {
            return Err(RegistryError::OutOfOrder {
                id,
                kind,
                other_id: other.id(),
                other_kind: other.kind(),
            });
        }

        let at = self.entities.partition_point(|e| e.id() < id);
        self.entities.insert(at, entity);
        self.index = self
            .entities
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id(), i))
            .collect();
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.index.get(&id).map(|&i| &self.entities[i])
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.index.get(&id).map(|&i| &mut self.entities[i])
    }

    #[must_use]
    pub fn drone(&self, id: EntityId) -> Option<&Drone> {
        match self.get(id)? {
            Entity::Drone(drone) => Some(drone),
            _ => None,
        }
    }

    pub fn drone_mut(&mut self, id: EntityId) -> Option<&mut Drone> {
        match self.get_mut(id)? {
            Entity::Drone(drone) => Some(drone),
            _ => None,
        }
    }

    /// Looks up a fish or monster.
    #[must_use]
    pub fn creature(&self, id: EntityId) -> Option<&Creature> {
        self.get(id)?.as_creature()
    }

    pub fn creature_mut(&mut self, id: EntityId) -> Option<&mut Creature> {
        self.get_mut(id)?.as_creature_mut()
    }

    /// All entities in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.iter()
    }

    pub fn creatures(&self) -> impl Iterator<Item = &Creature> + '_ {
        self.entities.iter().filter_map(Entity::as_creature)
    }

    pub fn creatures_mut(&mut self) -> impl Iterator<Item = &mut Creature> + '_ {
        self.entities.iter_mut().filter_map(Entity::as_creature_mut)
    }

    pub fn fish(&self) -> impl Iterator<Item = &Creature> + '_ {
        self.entities.iter().filter_map(|e| match e {
            Entity::Fish(creature) => Some(creature),
            _ => None,
        })
    }

    pub fn monsters(&self) -> impl Iterator<Item = &Creature> + '_ {
        self.entities.iter().filter_map(|e| match e {
            Entity::Monster(creature) => Some(creature),
            _ => None,
        })
    }
}
