use serde_json::{Value, json};

use crate::model::AtlasLayout;

/// Serializes the layout as a JSON index: sheet dimensions plus one
/// `left/right/top/bottom` record per key, suitable for runtime lookup of
/// sub-images inside the sheet.
pub fn to_json_index(layout: &AtlasLayout) -> Value {
    let mut entries = serde_json::Map::new();
    for e in &layout.entries {
        entries.insert(
            e.key.clone(),
            json!({
                "left": e.rect.left,
                "right": e.rect.right,
                "top": e.rect.top,
                "bottom": e.rect.bottom,
            }),
        );
    }
    json!({
        "width": layout.width,
        "height": layout.height,
        "entries": entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AtlasEntry, Coordinates};

    #[test]
    fn index_lists_every_entry() {
        let layout = AtlasLayout {
            width: 32,
            height: 16,
            entries: vec![
                AtlasEntry {
                    key: "a".into(),
                    rect: Coordinates::new(0, 10, 0, 10),
                },
                AtlasEntry {
                    key: "b".into(),
                    rect: Coordinates::new(12, 22, 0, 10),
                },
            ],
        };
        let value = to_json_index(&layout);
        assert_eq!(value["width"], 32);
        assert_eq!(value["entries"]["b"]["left"], 12);
        assert_eq!(value["entries"]["a"]["bottom"], 10);
    }
}
