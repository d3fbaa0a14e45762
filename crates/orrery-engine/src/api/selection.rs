/// The one piece of state the presentation layer observes: the name of the
/// most recently clicked planet, or nothing.
///
/// Every write bumps `generation`, including writes that leave the value
/// unchanged, so a polling UI can tell a repeated click from no click.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    current: Option<String>,
    generation: u32,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the selection. `None` clears it.
    pub fn set(&mut self, value: Option<String>) {
        self.current = value;
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn get(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let sel = Selection::new();
        assert_eq!(sel.get(), None);
        assert_eq!(sel.generation(), 0);
    }

    #[test]
    fn miss_clears_previous_value() {
        let mut sel = Selection::new();
        sel.set(Some("Mars".into()));
        assert_eq!(sel.get(), Some("Mars"));
        sel.set(None);
        assert_eq!(sel.get(), None);
        assert_eq!(sel.generation(), 2);
    }

    #[test]
    fn repeated_write_bumps_generation() {
        let mut sel = Selection::new();
        sel.set(Some("Earth".into()));
        sel.set(Some("Earth".into()));
        assert_eq!(sel.generation(), 2);
    }
}
