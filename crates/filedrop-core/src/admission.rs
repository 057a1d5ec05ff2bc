//! Max-count admission control for appending a batch to the file list.

use crate::types::WidgetError;

/// Outcome of an admission decision.
///
/// `admitted` is always a prefix length of the batch: the first
/// `admitted` items are kept in batch order and the rest are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admission {
    /// How many leading batch items may be appended.
    pub admitted: usize,
    /// Why some or all of the batch was refused, if it was.
    pub refusal: Option<WidgetError>,
}

/// Decide how much of a batch fits under the ceiling.
///
/// - List already at or above `max_files`: nothing is admitted and
///   [`WidgetError::NoCapacity`] is reported, even for an empty batch.
/// - Batch larger than the remaining room: the first `remaining` items are
///   admitted and [`WidgetError::CapacityExceeded`] is reported.
/// - Otherwise the whole batch is admitted silently.
///
/// A negative or zero ceiling behaves as "already full".
#[must_use]
pub fn admit(existing: usize, batch: usize, max_files: i64) -> Admission {
    let existing_signed = i64::try_from(existing).unwrap_or(i64::MAX);
    let remaining = max_files.saturating_sub(existing_signed);

    if remaining <= 0 {
        return Admission {
            admitted: 0,
            refusal: Some(WidgetError::NoCapacity { max: max_files }),
        };
    }

    let remaining = usize::try_from(remaining).unwrap_or(usize::MAX);
    if batch > remaining {
        Admission {
            admitted: remaining,
            refusal: Some(WidgetError::CapacityExceeded { max: max_files }),
        }
    } else {
        Admission {
            admitted: batch,
            refusal: None,
        }
    }
}
