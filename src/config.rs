use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Whether `pop` yields the smallest or the largest priority first.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HeapDirection {
    Min,
    Max,
}

impl HeapDirection {
    // Stored priorities are pre-multiplied by this so the heap itself
    // is always min-ordered.
    pub(crate) fn sign(self) -> i64 {
        match self {
            HeapDirection::Min => 1,
            HeapDirection::Max => -1,
        }
    }
}

impl FromStr for HeapDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "min" => Ok(HeapDirection::Min),
            "max" => Ok(HeapDirection::Max),
            _ => Err(Error::InvalidConfiguration(format!(
                "unknown heap direction ({})",
                s
            ))),
        }
    }
}

/// How equal priorities are resolved: insertion order or reverse.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TieBreakOrder {
    Fifo,
    Lifo,
}

impl TieBreakOrder {
    pub(crate) fn sign(self) -> i64 {
        match self {
            TieBreakOrder::Fifo => 1,
            TieBreakOrder::Lifo => -1,
        }
    }
}

impl FromStr for TieBreakOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fifo" => Ok(TieBreakOrder::Fifo),
            "lifo" => Ok(TieBreakOrder::Lifo),
            _ => Err(Error::InvalidConfiguration(format!(
                "unknown tie break order ({})",
                s
            ))),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueConfig {
    pub direction: HeapDirection,
    pub order: TieBreakOrder,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            direction: HeapDirection::Min,
            order: TieBreakOrder::Fifo,
        }
    }
}

impl QueueConfig {
    pub fn new(direction: HeapDirection, order: TieBreakOrder) -> Self {
        Self { direction, order }
    }

    /// Builds a config from textual options, rejecting unknown words
    /// before a queue is ever constructed from them.
    pub fn from_options(direction: &str, order: &str) -> Result<Self, Error> {
        Ok(Self {
            direction: direction.parse()?,
            order: order.parse()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{HeapDirection, QueueConfig, TieBreakOrder};
    use crate::error::Error;

    #[test]
    fn parses_known_options() {
        let config = QueueConfig::from_options("max", "lifo").unwrap();
        assert_eq!(config.direction, HeapDirection::Max);
        assert_eq!(config.order, TieBreakOrder::Lifo);
        assert_eq!(QueueConfig::from_options("min", "fifo").unwrap(), QueueConfig::default());
    }

    #[test]
    fn rejects_unknown_options() {
        let err = QueueConfig::from_options("median", "fifo").unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
        let err = QueueConfig::from_options("min", "random").unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn signs_encode_direction_and_order() {
        assert_eq!(HeapDirection::Min.sign(), 1);
        assert_eq!(HeapDirection::Max.sign(), -1);
        assert_eq!(TieBreakOrder::Fifo.sign(), 1);
        assert_eq!(TieBreakOrder::Lifo.sign(), -1);
    }
}
