use std::collections::HashSet;

/// Ids of the records currently checked. Every operation returns a new set
/// so the owner replaces its value instead of mutating it in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: HashSet<u64>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&self, id: u64) -> Self {
        let mut ids = self.ids.clone();
        if !ids.remove(&id) {
            ids.insert(id);
        }
        Self { ids }
    }

    pub fn clear(&self) -> Self {
        Self::new()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_inserts_then_removes() {
        let empty = SelectionSet::new();
        let one = empty.toggle(1);

        assert!(one.contains(1));
        assert_eq!(one.len(), 1);

        let none = one.toggle(1);
        assert!(!none.contains(1));
        assert!(none.is_empty());
    }

    #[test]
    fn test_toggle_leaves_original_untouched() {
        let original = SelectionSet::new().toggle(1);
        let next = original.toggle(2);

        assert_eq!(original.len(), 1);
        assert!(!original.contains(2));
        assert!(next.contains(1));
        assert!(next.contains(2));
    }

    #[test]
    fn test_membership_follows_toggle_parity() {
        let sequence = [1, 2, 3, 1, 2, 1, 4, 4, 4, 5, 5];
        let mut selection = SelectionSet::new();
        for id in sequence {
            selection = selection.toggle(id);
        }

        for id in 1..=6 {
            let occurrences = sequence.iter().filter(|&&x| x == id).count();
            assert_eq!(
                selection.contains(id),
                occurrences % 2 == 1,
                "id {} toggled {} times",
                id,
                occurrences
            );
        }
    }

    #[test]
    fn test_clear() {
        let selection = SelectionSet::new().toggle(1).toggle(2);
        let cleared = selection.clear();

        assert!(cleared.is_empty());
        assert_eq!(selection.len(), 2);
    }
}
