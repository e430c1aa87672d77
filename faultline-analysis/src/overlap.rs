//! Line-range overlap between diff edits and method spans.
//!
//! The same edit list serves two modes: a boolean touch test for the
//! labeler and a quantitative added/deleted accumulator for churn mining.

use faultline_core::types::diff::{DiffEdit, LineSpan};

/// Added/deleted line counts of one commit's edits inside one span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverlapChurn {
    pub added: u32,
    pub deleted: u32,
}

/// Half-open intersection on the new side: the edit touches `[start, end)`
/// iff `end_new > start && begin_new < end`.
pub fn edit_touches_span(edit: &DiffEdit, span: LineSpan) -> bool {
    edit.end_new > span.start && edit.begin_new < span.end
}

/// True if any edit touches the span.
pub fn span_touched(edits: &[DiffEdit], span: LineSpan) -> bool {
    edits.iter().any(|e| edit_touches_span(e, span))
}

/// Accumulate added/deleted line overlap for every edit touching the span.
/// Returns `None` when no edit touches it, so callers can count touching
/// commits.
pub fn span_churn(edits: &[DiffEdit], span: LineSpan) -> Option<OverlapChurn> {
    let mut churn = OverlapChurn::default();
    let mut touched = false;

    for edit in edits {
        if !edit_touches_span(edit, span) {
            continue;
        }
        touched = true;
        churn.added += range_overlap(edit.begin_new, edit.end_new, span);
        churn.deleted += range_overlap(edit.begin_old, edit.end_old, span);
    }

    touched.then_some(churn)
}

/// `max(0, min(end, span.end) − max(begin, span.start))`.
fn range_overlap(begin: u32, end: u32, span: LineSpan) -> u32 {
    let lo = begin.max(span.start) as i64;
    let hi = end.min(span.end) as i64;
    (hi - lo).max(0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn touch_rule_on_span_boundaries() {
        let span = LineSpan::new(10, 20);
        assert!(span_touched(&[DiffEdit::new(0, 0, 15, 25)], span));
        assert!(!span_touched(&[DiffEdit::new(0, 0, 25, 30)], span));
        // Edit ending exactly at start does not touch.
        assert!(!span_touched(&[DiffEdit::new(0, 0, 5, 10)], span));
        // Edit beginning exactly at end does not touch.
        assert!(!span_touched(&[DiffEdit::new(0, 0, 20, 25)], span));
    }

    #[test]
    fn pure_deletion_inside_span_touches_with_zero_added() {
        // A deletion leaves an empty new-side range at the cut point.
        let span = LineSpan::new(10, 20);
        let edit = DiffEdit::new(12, 18, 15, 15);
        assert!(span_touched(&[edit], span));
        let churn = span_churn(&[edit], span).unwrap();
        assert_eq!(churn.added, 0);
        assert_eq!(churn.deleted, 6);
    }

    #[test]
    fn churn_clips_to_span() {
        let span = LineSpan::new(10, 20);
        // New-side [15, 25) overlaps the span by 5 lines.
        let churn = span_churn(&[DiffEdit::new(15, 18, 15, 25)], span).unwrap();
        assert_eq!(churn.added, 5);
        assert_eq!(churn.deleted, 3);
    }

    #[test]
    fn churn_accumulates_across_edits() {
        let span = LineSpan::new(0, 100);
        let edits = [DiffEdit::new(0, 2, 0, 5), DiffEdit::new(10, 12, 13, 14)];
        let churn = span_churn(&edits, span).unwrap();
        assert_eq!(churn.added, 6);
        assert_eq!(churn.deleted, 4);
    }

    #[test]
    fn untouched_span_has_no_churn() {
        let span = LineSpan::new(10, 20);
        assert_eq!(span_churn(&[DiffEdit::new(30, 35, 30, 35)], span), None);
        assert_eq!(span_churn(&[], span), None);
    }

    proptest! {
        #[test]
        fn added_never_exceeds_edit_or_span_length(
            begin_new in 0u32..1000,
            len in 0u32..200,
            start in 0u32..1000,
            span_len in 0u32..200,
        ) {
            let edit = DiffEdit::new(0, 0, begin_new, begin_new + len);
            let span = LineSpan::new(start, start + span_len);
            if let Some(churn) = span_churn(&[edit], span) {
                prop_assert!(churn.added <= len);
                prop_assert!(churn.added <= span_len);
            }
        }

        #[test]
        fn touch_is_symmetric_with_nonempty_new_overlap(
            begin_new in 0u32..1000,
            len in 1u32..200,
            start in 0u32..1000,
            span_len in 1u32..200,
        ) {
            let edit = DiffEdit::new(0, 0, begin_new, begin_new + len);
            let span = LineSpan::new(start, start + span_len);
            let overlaps = begin_new < start + span_len && begin_new + len > start;
            prop_assert_eq!(edit_touches_span(&edit, span), overlaps);
        }
    }
}
