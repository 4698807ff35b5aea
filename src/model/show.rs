//! The Show aggregate: ordered set items plus metadata and dirty tracking

use super::item::SetItem;

/// Overall vibe of a show, persisted alongside the label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Vibe {
    Intimate,
    Hype,
    #[default]
    Mixed,
}

impl Vibe {
    pub const ALL: [Vibe; 3] = [Vibe::Intimate, Vibe::Hype, Vibe::Mixed];

    pub fn as_wire(&self) -> &'static str {
        match self {
            Vibe::Intimate => "intimate",
            Vibe::Hype => "hype",
            Vibe::Mixed => "mixed",
        }
    }

    /// Unknown wire values fall back to Mixed
    pub fn from_wire(value: &str) -> Self {
        match value {
            "intimate" => Vibe::Intimate,
            "hype" => Vibe::Hype,
            _ => Vibe::Mixed,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Vibe::Intimate => "Intimate",
            Vibe::Hype => "Hype/Energetic",
            Vibe::Mixed => "Mixed",
        }
    }
}

/// The show being edited
///
/// The item sequence is the performance order; every mutation goes through
/// the methods below so the dirty flag always reflects unsaved changes.
/// The total duration is derived on demand and never stored.
#[derive(Debug, Clone)]
pub struct Show {
    slug: Option<String>,
    label: String,
    vibe: Vibe,
    items: Vec<SetItem>,
    dirty: bool,
}

impl Show {
    /// An empty show, ready for its first item
    pub fn new() -> Self {
        Self {
            slug: None,
            label: String::new(),
            vibe: Vibe::default(),
            items: Vec::new(),
            dirty: false,
        }
    }

    /// Reconstruct a show loaded from the backend; starts clean
    pub fn from_parts(
        slug: Option<String>,
        label: String,
        vibe: Vibe,
        items: Vec<SetItem>,
    ) -> Self {
        Self {
            slug,
            label,
            vibe,
            items,
            dirty: false,
        }
    }

    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn vibe(&self) -> Vibe {
        self.vibe
    }

    /// Read-only view of the ordered items
    pub fn items(&self) -> &[SetItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of row durations; recomputed on every call
    pub fn total_duration_seconds(&self) -> u32 {
        self.items.iter().map(|item| item.duration_seconds()).sum()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_label(&mut self, label: String) {
        if self.label != label {
            self.label = label;
            self.dirty = true;
        }
    }

    pub fn push_label_char(&mut self, c: char) {
        self.label.push(c);
        self.dirty = true;
    }

    pub fn pop_label_char(&mut self) {
        if self.label.pop().is_some() {
            self.dirty = true;
        }
    }

    pub fn set_vibe(&mut self, vibe: Vibe) {
        if self.vibe != vibe {
            self.vibe = vibe;
            self.dirty = true;
        }
    }

    /// Append an item at the end of the sequence
    ///
    /// Items are valid by construction, so this cannot fail.
    pub fn append(&mut self, item: SetItem) {
        self.items.push(item);
        self.dirty = true;
    }

    /// Remove the item at `index`, shifting later rows up
    pub fn remove_at(&mut self, index: usize) -> Option<SetItem> {
        if index >= self.items.len() {
            return None;
        }
        self.dirty = true;
        Some(self.items.remove(index))
    }

    /// Relocate the item at `from` so it ends up at index `to`
    ///
    /// Implemented as remove-then-insert. `to` past the end moves the item
    /// to the last position. Moving an item onto itself is a no-op and does
    /// not mark the show dirty.
    pub fn move_to(&mut self, from: usize, to: usize) {
        let len = self.items.len();
        if from >= len {
            return;
        }
        let to = to.min(len - 1);
        if from == to {
            return;
        }
        let item = self.items.remove(from);
        self.items.insert(to, item);
        self.dirty = true;
    }

    /// Adopt the server-assigned slug (if any) and clear the dirty flag
    /// after a successful save
    pub fn mark_saved(&mut self, slug: Option<String>) {
        if let Some(slug) = slug {
            self.slug = Some(slug);
        }
        self.dirty = false;
    }
}

impl Default for Show {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn break_item(duration_seconds: u32) -> SetItem {
        SetItem::Break { duration_seconds }
    }

    fn opener(name: &str, duration_seconds: u32) -> SetItem {
        SetItem::Opener {
            artist_id: "1".into(),
            artist_name: name.into(),
            duration_seconds,
        }
    }

    fn names(show: &Show) -> Vec<&str> {
        show.items().iter().map(|i| i.display_name()).collect()
    }

    #[test]
    fn test_new_show_is_clean_and_empty() {
        let show = Show::new();
        assert!(!show.is_dirty());
        assert!(show.is_empty());
        assert_eq!(show.total_duration_seconds(), 0);
        assert_eq!(show.slug(), None);
    }

    #[test]
    fn test_total_tracks_mutations() {
        let mut show = Show::new();
        show.append(opener("A", 600));
        show.append(break_item(300));
        show.append(opener("B", 240));
        assert_eq!(show.total_duration_seconds(), 1140);

        show.remove_at(1);
        assert_eq!(show.total_duration_seconds(), 840);

        show.move_to(0, 1);
        assert_eq!(show.total_duration_seconds(), 840);

        let sum: u32 = show.items().iter().map(|i| i.duration_seconds()).sum();
        assert_eq!(show.total_duration_seconds(), sum);
    }

    #[test]
    fn test_move_to_relocates_single_item() {
        let mut show = Show::new();
        for name in ["a", "b", "c", "d"] {
            show.append(opener(name, 60));
        }

        show.move_to(0, 2);
        assert_eq!(names(&show), vec!["b", "c", "a", "d"]);

        show.move_to(3, 0);
        assert_eq!(names(&show), vec!["d", "b", "c", "a"]);
    }

    #[test]
    fn test_move_to_self_is_noop() {
        let mut show = Show::from_parts(
            None,
            "Test".into(),
            Vibe::Mixed,
            vec![opener("a", 60), opener("b", 60)],
        );
        show.move_to(1, 1);
        assert_eq!(names(&show), vec!["a", "b"]);
        assert!(!show.is_dirty());
    }

    #[test]
    fn test_move_to_past_end_appends() {
        let mut show = Show::new();
        for name in ["a", "b", "c"] {
            show.append(opener(name, 60));
        }
        show.move_to(0, 99);
        assert_eq!(names(&show), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_move_to_out_of_range_source_is_noop() {
        let mut show = Show::from_parts(None, "T".into(), Vibe::Mixed, vec![opener("a", 60)]);
        show.move_to(5, 0);
        assert_eq!(names(&show), vec!["a"]);
        assert!(!show.is_dirty());
    }

    #[test]
    fn test_remove_at_out_of_range() {
        let mut show = Show::from_parts(None, "T".into(), Vibe::Mixed, vec![opener("a", 60)]);
        assert!(show.remove_at(3).is_none());
        assert!(!show.is_dirty());
        assert!(show.remove_at(0).is_some());
        assert!(show.is_dirty());
    }

    #[test]
    fn test_dirty_lifecycle() {
        let mut show = Show::from_parts(
            Some("launch-night".into()),
            "Launch Night".into(),
            Vibe::Hype,
            vec![break_item(300)],
        );
        assert!(!show.is_dirty());

        show.append(break_item(60));
        assert!(show.is_dirty());

        show.mark_saved(None);
        assert!(!show.is_dirty());
        assert_eq!(show.slug(), Some("launch-night"));

        show.move_to(0, 1);
        assert!(show.is_dirty());
        show.remove_at(0);
        show.set_label("Launch Night II".into());
        show.set_vibe(Vibe::Intimate);
        assert!(show.is_dirty());
    }

    #[test]
    fn test_mark_saved_adopts_server_slug() {
        let mut show = Show::new();
        show.set_label("Launch Night".into());
        show.append(break_item(300));
        assert_eq!(show.slug(), None);

        show.mark_saved(Some("launch-night-1".into()));
        assert_eq!(show.slug(), Some("launch-night-1"));
        assert!(!show.is_dirty());

        // A later save without a slug in the response keeps the old one
        show.append(break_item(60));
        show.mark_saved(None);
        assert_eq!(show.slug(), Some("launch-night-1"));
    }

    #[test]
    fn test_set_label_same_value_stays_clean() {
        let mut show = Show::from_parts(None, "Same".into(), Vibe::Mixed, vec![]);
        show.set_label("Same".into());
        assert!(!show.is_dirty());
        show.set_vibe(Vibe::Mixed);
        assert!(!show.is_dirty());
    }

    #[test]
    fn test_vibe_wire_values() {
        assert_eq!(Vibe::from_wire("intimate"), Vibe::Intimate);
        assert_eq!(Vibe::from_wire("hype"), Vibe::Hype);
        assert_eq!(Vibe::from_wire("mixed"), Vibe::Mixed);
        assert_eq!(Vibe::from_wire("moody"), Vibe::Mixed);
        for vibe in Vibe::ALL {
            assert_eq!(Vibe::from_wire(vibe.as_wire()), vibe);
        }
    }
}
