/// View projection of the collection
///
/// The UI never mutates tiles; it rebuilds them from the collection after
/// every change. Keeping the projection here lets it be tested without a
/// window.

use super::entry::{ImageId, Rotation};
use super::manager::ImageCollection;

#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    /// 1-based position shown on the tile
    pub position: usize,
    pub id: ImageId,
    pub name: String,
    pub rotation: Rotation,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollectionView {
    pub tiles: Vec<Tile>,
    /// Preview section is shown once anything has been added
    pub visible: bool,
    pub can_edit_selection: bool,
    pub select_all_label: &'static str,
    pub summary: String,
}

pub fn project(collection: &ImageCollection) -> CollectionView {
    let tiles = collection
        .entries()
        .iter()
        .enumerate()
        .map(|(index, entry)| Tile {
            position: index + 1,
            id: entry.id,
            name: entry.name.clone(),
            rotation: entry.rotation,
            selected: entry.selected,
        })
        .collect();

    let mut summary = format!(
        "{} / {} images",
        collection.len(),
        collection.limits().max_files
    );
    if collection.pending() > 0 {
        summary.push_str(&format!(" ({} loading)", collection.pending()));
    }
    if collection.has_selection() {
        summary.push_str(&format!(", {} selected", collection.selected_count()));
    }

    CollectionView {
        tiles,
        visible: !collection.is_empty() || collection.pending() > 0,
        can_edit_selection: collection.has_selection(),
        select_all_label: if collection.all_selected() {
            "Deselect All"
        } else {
            "Select All"
        },
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::entry::DecodedImage;
    use crate::collection::manager::Limits;
    use std::path::PathBuf;

    fn decoded(name: &str) -> DecodedImage {
        DecodedImage {
            source: PathBuf::from(name),
            name: name.to_string(),
            mime: "image/png".to_string(),
            size: 1,
            last_modified: None,
            data_url: "data:image/png;base64,AA==".to_string(),
            bytes: vec![0],
        }
    }

    #[test]
    fn test_empty_projection() {
        let view = project(&ImageCollection::new(Limits::default()));
        assert!(view.tiles.is_empty());
        assert!(!view.visible);
        assert!(!view.can_edit_selection);
        assert_eq!(view.summary, "0 / 100 images");
    }

    #[test]
    fn test_projection_follows_order() {
        let mut c = ImageCollection::new(Limits::default());
        c.complete(0, Ok(decoded("first.png"))).unwrap();
        c.complete(0, Ok(decoded("second.png"))).unwrap();
        let second = c.entries()[1].id;
        c.toggle_select(second);
        c.move_selected_up();

        let view = project(&c);
        let order: Vec<(usize, &str)> = view
            .tiles
            .iter()
            .map(|t| (t.position, t.name.as_str()))
            .collect();
        assert_eq!(order, vec![(1, "second.png"), (2, "first.png")]);
        assert!(view.tiles[0].selected);
        assert!(view.can_edit_selection);
        assert_eq!(view.select_all_label, "Select All");
        assert_eq!(view.summary, "2 / 100 images, 1 selected");

        c.toggle_select_all();
        assert_eq!(project(&c).select_all_label, "Deselect All");
    }
}
