use serde::Serialize;

/// A row of the requirement worksheet (inventory planning input).
/// Cells stay as stored text; this service only relays them.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Requirement {
    pub product: String,
    pub width: String,
    pub thickness: String,
    pub weight: String,
}
