//! Parallel planned item lists.

use super::error::SegmentError;

/// Highest baseline index. Index 0 is the primary baseline.
pub const MAX_BASELINE: usize = 10;

/// Baseline copies of an assignment's timephased items.
///
/// Each of the eleven slots holds a list planned at a different point in
/// time; unset slots are empty.
///
/// # Examples
///
/// ```
/// use calendar_timephased::timephased::{TimephasedBaseline, TimephasedCost};
///
/// let mut baselines: TimephasedBaseline<TimephasedCost> = TimephasedBaseline::new();
/// baselines.set(3, Vec::new()).unwrap();
/// assert!(baselines.get(3).unwrap().is_empty());
/// assert!(baselines.set(11, Vec::new()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimephasedBaseline<T> {
    lists: Vec<Vec<T>>,
}

impl<T> Default for TimephasedBaseline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimephasedBaseline<T> {
    /// Creates a container with every slot empty.
    pub fn new() -> Self {
        Self {
            lists: (0..=MAX_BASELINE).map(|_| Vec::new()).collect(),
        }
    }

    /// Replaces the items of baseline `index`.
    ///
    /// # Errors
    ///
    /// Returns `SegmentError::Precondition` when `index` exceeds
    /// [`MAX_BASELINE`].
    pub fn set(&mut self, index: usize, items: Vec<T>) -> Result<(), SegmentError> {
        let slot = self.slot_mut(index)?;
        *slot = items;
        Ok(())
    }

    /// Items of baseline `index`.
    ///
    /// # Errors
    ///
    /// Returns `SegmentError::Precondition` when `index` exceeds
    /// [`MAX_BASELINE`].
    pub fn get(&self, index: usize) -> Result<&[T], SegmentError> {
        self.lists
            .get(index)
            .map(Vec::as_slice)
            .ok_or_else(|| out_of_range(index))
    }

    /// Indices of the baselines holding at least one item.
    pub fn populated(&self) -> impl Iterator<Item = usize> + '_ {
        self.lists
            .iter()
            .enumerate()
            .filter(|(_, items)| !items.is_empty())
            .map(|(index, _)| index)
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut Vec<T>, SegmentError> {
        self.lists.get_mut(index).ok_or_else(|| out_of_range(index))
    }
}

fn out_of_range(index: usize) -> SegmentError {
    SegmentError::Precondition {
        reason: format!("baseline index {index} is outside 0..={MAX_BASELINE}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_start_empty() {
        let baselines: TimephasedBaseline<u8> = TimephasedBaseline::new();
        for index in 0..=MAX_BASELINE {
            assert!(baselines.get(index).unwrap().is_empty());
        }
        assert_eq!(baselines.populated().count(), 0);
    }

    #[test]
    fn test_set_and_populated() {
        let mut baselines = TimephasedBaseline::new();
        baselines.set(0, vec![1, 2]).unwrap();
        baselines.set(10, vec![3]).unwrap();
        assert_eq!(baselines.get(0).unwrap(), &[1, 2]);
        assert_eq!(baselines.populated().collect::<Vec<_>>(), vec![0, 10]);
    }

    #[test]
    fn test_index_out_of_range() {
        let mut baselines: TimephasedBaseline<u8> = TimephasedBaseline::new();
        assert!(matches!(
            baselines.get(MAX_BASELINE + 1),
            Err(SegmentError::Precondition { .. })
        ));
        assert!(baselines.set(42, vec![1]).is_err());
    }
}
