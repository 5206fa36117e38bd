use super::Element;
use std::collections::{HashMap, HashSet};

/// Counts of each distinct element in a model.
///
/// Every element present has a count of at least one. Iteration follows the
/// order in which elements were first added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    counts: HashMap<Element, usize>,
    order: Vec<Element>, // first-seen order of the keys in `counts`
}

impl Inventory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the count of `element` by one.
    pub fn add(&mut self, element: Element) -> &mut Self {
        let count = self.count(&element);
        if count == 0 {
            self.order.push(element.clone());
        }
        self.counts.insert(element, count + 1);
        self
    }

    /// Returns the count of `element`, or 0 if it was never added.
    #[must_use]
    pub fn count(&self, element: &Element) -> usize {
        self.counts.get(element).copied().unwrap_or(0)
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> + '_ {
        self.order.iter()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Element, usize)> + '_ {
        self.order.iter().map(|e| (e, self.count(e)))
    }

    #[must_use]
    pub fn total_count(&self) -> usize {
        self.counts.values().sum()
    }

    #[must_use]
    pub fn distinct_count(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[must_use]
    pub fn colors(&self) -> HashSet<&str> {
        self.order.iter().map(|e| e.color.as_str()).collect()
    }

    #[must_use]
    pub fn parts(&self) -> HashSet<&str> {
        self.order.iter().map(|e| e.part.as_str()).collect()
    }
}

impl Extend<Element> for Inventory {
    fn extend<I: IntoIterator<Item = Element>>(&mut self, iter: I) {
        for element in iter {
            self.add(element);
        }
    }
}

impl FromIterator<Element> for Inventory {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        let mut inventory = Self::new();
        inventory.extend(iter);
        inventory
    }
}
