use foundation::handles::Handle;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub Handle);

impl EntityId {
    pub fn index(&self) -> u32 {
        self.0.index()
    }

    pub fn generation(&self) -> u32 {
        self.0.generation()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}v{}", self.index(), self.generation())
    }
}

/// Hands out generational ids and recycles retired slots.
#[derive(Debug, Default, Clone)]
pub struct EntityAllocator {
    /// Current generation per slot.
    generations: Vec<u32>,
    alive: Vec<bool>,
    free: Vec<u32>,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self) -> EntityId {
        if let Some(index) = self.free.pop() {
            let slot = index as usize;
            self.alive[slot] = true;
            return EntityId(Handle::new(index, self.generations[slot]));
        }
        let index = self.generations.len() as u32;
        self.generations.push(0);
        self.alive.push(true);
        EntityId(Handle::new(index, 0))
    }

    /// Returns `false` for an id that is stale or was never issued.
    pub fn retire(&mut self, id: EntityId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        let slot = id.index() as usize;
        self.alive[slot] = false;
        self.generations[slot] = id.0.next_generation().generation();
        self.free.push(id.index());
        true
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        let slot = id.index() as usize;
        self.alive.get(slot).copied().unwrap_or(false)
            && self.generations.get(slot) == Some(&id.generation())
    }

    pub fn live_count(&self) -> usize {
        self.alive.iter().filter(|a| **a).count()
    }
}

#[cfg(test)]
mod tests {
    use super::EntityAllocator;

    #[test]
    fn retired_slot_is_reused_with_new_generation() {
        let mut ids = EntityAllocator::new();
        let a = ids.alloc();
        let b = ids.alloc();
        assert_ne!(a, b);

        assert!(ids.retire(a));
        assert!(!ids.is_alive(a));
        assert!(!ids.retire(a));

        let c = ids.alloc();
        assert_eq!(c.index(), a.index());
        assert_eq!(c.generation(), a.generation() + 1);
        assert!(ids.is_alive(c));
        assert!(!ids.is_alive(a));
        assert_eq!(ids.live_count(), 2);
    }

    #[test]
    fn display_shows_slot_and_generation() {
        let mut ids = EntityAllocator::new();
        let a = ids.alloc();
        ids.retire(a);
        assert_eq!(ids.alloc().to_string(), "0v1");
    }
}
