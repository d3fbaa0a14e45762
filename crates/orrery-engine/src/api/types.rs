use serde::{Deserialize, Serialize};

/// Unique identifier for an entity in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u32);

/// One row of the static color legend shown next to the viewport.
/// `color` is a CSS hex string (e.g. `"#6b93d6"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub name: String,
    pub color: String,
}

impl LegendEntry {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legend_entry_serializes_as_flat_object() {
        let entry = LegendEntry::new("Earth", "#6b93d6");
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r##"{"name":"Earth","color":"#6b93d6"}"##);
    }
}
