use std::collections::HashSet;

/// Ids of the tasks whose children are currently shown.
/// Absence means collapsed. Lives only for the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionSet {
    ids: HashSet<String>,
}

impl ExpansionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Flip membership of `id`. Returns true if the task is now expanded.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn expand(&mut self, id: &str) {
        if !self.ids.contains(id) {
            self.ids.insert(id.to_string());
        }
    }

    pub fn collapse(&mut self, id: &str) {
        self.ids.remove(id);
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ExpansionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        ExpansionSet {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_collapsed() {
        let set = ExpansionSet::new();
        assert!(set.is_empty());
        assert!(!set.is_expanded("1"));
    }

    #[test]
    fn toggle_twice_restores() {
        let mut set = ExpansionSet::new();
        assert!(set.toggle("1"));
        assert!(set.is_expanded("1"));
        assert!(!set.toggle("1"));
        assert!(set.is_empty());
    }

    #[test]
    fn toggle_leaves_other_ids_alone() {
        let mut set: ExpansionSet = ["1", "1-1", "2"].into_iter().collect();
        set.toggle("1-3");
        set.toggle("1");
        assert!(!set.is_expanded("1"));
        assert!(set.is_expanded("1-1"));
        assert!(set.is_expanded("2"));
        assert!(set.is_expanded("1-3"));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn expand_and_collapse_are_idempotent() {
        let mut set = ExpansionSet::new();
        set.expand("a");
        set.expand("a");
        assert_eq!(set.len(), 1);
        set.collapse("a");
        set.collapse("a");
        assert!(set.is_empty());
    }
}
