//! Bijection between risk labels and dense class indices.

use serde::{Deserialize, Serialize};

use crate::features::RiskLevel;

/// Maps the labels observed at fit time to indices `0..n_classes`, sorted by
/// ordinal level. Only observed labels are encodable; the bijection is fixed
/// once fitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCodec {
    classes: Vec<RiskLevel>,
}

impl LabelCodec {
    /// Collect the distinct labels in `labels`, sorted ascending.
    pub fn fit<I: IntoIterator<Item = RiskLevel>>(labels: I) -> Self {
        let mut classes: Vec<RiskLevel> = labels.into_iter().collect();
        classes.sort_unstable();
        classes.dedup();
        Self { classes }
    }

    pub fn encode(&self, level: RiskLevel) -> Option<usize> {
        self.classes.binary_search(&level).ok()
    }

    pub fn decode(&self, index: usize) -> Option<RiskLevel> {
        self.classes.get(index).copied()
    }

    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    pub fn classes(&self) -> &[RiskLevel] {
        &self.classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_all_levels() {
        let codec = LabelCodec::fit(RiskLevel::ALL);
        assert_eq!(codec.n_classes(), 3);
        for level in RiskLevel::ALL {
            let idx = codec.encode(level).unwrap();
            assert_eq!(codec.decode(idx), Some(level));
        }
    }

    #[test]
    fn duplicates_collapse_and_order_is_ordinal() {
        let codec = LabelCodec::fit(vec![
            RiskLevel::Danger,
            RiskLevel::Safe,
            RiskLevel::Danger,
            RiskLevel::Safe,
        ]);
        assert_eq!(codec.classes(), &[RiskLevel::Safe, RiskLevel::Danger]);
        assert_eq!(codec.encode(RiskLevel::Warning), None);
    }

    #[test]
    fn decode_out_of_range_is_none() {
        let codec = LabelCodec::fit([RiskLevel::Safe]);
        assert_eq!(codec.decode(5), None);
    }
}
