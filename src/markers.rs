use clap::ValueEnum;

/// When a hovered plot position turns into a marker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum MarkerTrigger {
    /// Every frame the pointer is over the plot
    #[default]
    Hover,
    /// Only frames with a primary-button click over the plot
    Click,
}

impl MarkerTrigger {
    pub fn fires(self, hovered: bool, clicked: bool) -> bool {
        match self {
            MarkerTrigger::Hover => hovered,
            MarkerTrigger::Click => hovered && clicked,
        }
    }
}

/// Append-only list of sample indices
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerList {
    indices: Vec<u64>,
}

impl MarkerList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `index` if it addresses one of `len` samples. Out-of-range
    /// indices are dropped and the list is left untouched.
    pub fn try_insert(&mut self, index: i64, len: usize) -> bool {
        match u64::try_from(index) {
            Ok(index) if index < len as u64 => {
                self.indices.push(index);
                true
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.indices.iter().copied()
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.indices
    }
}
