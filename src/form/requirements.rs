/// Insertion-ordered set of free-text requirement tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementSet {
    items: Vec<String>,
}

impl RequirementSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when `requirement` is already present (exact match).
    pub fn add(&mut self, requirement: &str) -> bool {
        if self.contains(requirement) {
            return false;
        }
        self.items.push(requirement.to_string());
        true
    }

    /// Returns whether something was removed.
    pub fn remove(&mut self, requirement: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|r| r != requirement);
        self.items.len() != before
    }

    pub fn contains(&self, requirement: &str) -> bool {
        self.items.iter().any(|r| r == requirement)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.items.clone()
    }
}
