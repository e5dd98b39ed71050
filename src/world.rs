use crate::entities::{Category, Entity};

/// Stable handle to an entity slot. A handle goes stale once its entity is pruned,
/// even if the slot is later reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntityId {
    index: u32,
    generation: u32,
}

struct Slot {
    generation: u32,
    entity: Option<Entity>,
}

pub struct World {
    pub width: f64,
    pub height: f64,
    slots: Vec<Slot>,
    free_list: Vec<u32>,
    count: usize,
}

impl World {
    pub fn new(width: f64, height: f64) -> Self {
        World {
            width,
            height,
            slots: Vec::new(),
            free_list: Vec::new(),
            count: 0,
        }
    }

    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        self.count += 1;
        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            slot.entity = Some(entity);
            return EntityId { index, generation: slot.generation };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot { generation: 0, entity: Some(entity) });
        EntityId { index, generation: 0 }
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.entity.as_ref())
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.entity.as_mut())
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.entity.as_ref().map(|e| (EntityId { index: i as u32, generation: slot.generation }, e))
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.slots.iter_mut().filter_map(|slot| slot.entity.as_mut())
    }

    pub fn alive_ids(&self, category: Category) -> Vec<EntityId> {
        self.iter()
            .filter(|(_, e)| e.is_alive() && e.category() == category)
            .map(|(id, _)| id)
            .collect()
    }

    pub fn count_alive(&self, category: Category) -> usize {
        self.iter().filter(|(_, e)| e.is_alive() && e.category() == category).count()
    }

    pub fn prune(&mut self) -> usize {
        let mut removed = 0;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.entity.as_ref().is_some_and(|e| !e.is_alive()) {
                slot.entity = None;
                slot.generation = slot.generation.wrapping_add(1);
                self.free_list.push(index as u32);
                removed += 1;
            }
        }
        self.count -= removed;
        removed
    }
}
