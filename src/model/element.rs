/// A color and part pair, the key parts are counted by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Element {
    pub color: String,
    pub part: String,
}

impl Element {
    #[must_use]
    pub fn new(color: impl Into<String>, part: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            part: part.into(),
        }
    }
}
