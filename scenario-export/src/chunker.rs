use std::num::NonZeroUsize;

/// Elements handed to the renderer, split into groups once a scenario gets too long to fit into a
/// single generated block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementPayload<T> {
    Flat(Vec<T>),
    Grouped(Vec<Vec<T>>),
}

impl<T> ElementPayload<T> {
    pub fn is_grouped(&self) -> bool {
        matches!(self, ElementPayload::Grouped(_))
    }

    /// Total number of elements across all groups.
    pub fn len(&self) -> usize {
        match self {
            ElementPayload::Flat(elements) => elements.len(),
            ElementPayload::Grouped(groups) => groups.iter().map(Vec::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Elements in recorded order regardless of grouping.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        match self {
            ElementPayload::Flat(elements) => Box::new(elements.iter()),
            ElementPayload::Grouped(groups) => Box::new(groups.iter().flatten()),
        }
    }
}

pub fn chunk<T>(elements: Vec<T>, threshold: NonZeroUsize) -> ElementPayload<T> {
    let threshold = threshold.get();

    if elements.len() <= threshold {
        return ElementPayload::Flat(elements);
    }

    let mut groups = Vec::with_capacity((elements.len() + threshold - 1) / threshold);
    let mut elements = elements.into_iter().peekable();

    while elements.peek().is_some() {
        groups.push(elements.by_ref().take(threshold).collect());
    }

    ElementPayload::Grouped(groups)
}
