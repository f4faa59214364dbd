/// Generational handle: `(index, generation)`.
///
/// A slot that is reused gets a new generation, so a stale handle never
/// compares equal to the handle of whatever replaced it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Handle(u32, u32);

impl Handle {
    pub fn new(index: u32, generation: u32) -> Self {
        Handle(index, generation)
    }

    pub fn index(&self) -> u32 {
        self.0
    }

    pub fn generation(&self) -> u32 {
        self.1
    }

    /// Same slot, next generation.
    pub fn next_generation(&self) -> Self {
        Handle(self.0, self.1.wrapping_add(1))
    }
}

#[cfg(test)]
mod tests {
    use super::Handle;

    #[test]
    fn next_generation_keeps_slot() {
        let h = Handle::new(3, 0);
        let next = h.next_generation();
        assert_eq!(next.index(), 3);
        assert_eq!(next.generation(), 1);
        assert_ne!(h, next);
    }
}
