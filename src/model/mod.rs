pub mod element;
pub mod inventory;
pub mod mapping;

pub use element::Element;
pub use inventory::Inventory;
pub use mapping::{Mapping, PartRule};
