use uuid::Uuid;

/// Generate a fresh random element ID (UUID v4)
pub fn new_element_id() -> String {
    Uuid::new_v4().to_string()
}

/// ID source for newly created elements
///
/// Random mode is what the editor uses at runtime. Sequential mode hands out
/// `{seed}-{n}` and exists so tests and fixtures get stable IDs.
#[derive(Debug, Clone)]
pub enum IdGenerator {
    Random,
    Sequential { seed: String, count: u32 },
}

impl IdGenerator {
    pub fn random() -> Self {
        IdGenerator::Random
    }

    pub fn sequential(seed: impl Into<String>) -> Self {
        IdGenerator::Sequential {
            seed: seed.into(),
            count: 0,
        }
    }

    /// Generate next ID
    pub fn new_id(&mut self) -> String {
        match self {
            IdGenerator::Random => new_element_id(),
            IdGenerator::Sequential { seed, count } => {
                *count += 1;
                format!("{}-{}", seed, count)
            }
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::random()
    }
}
