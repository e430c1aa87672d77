//! Line-range primitives shared by the diff overlap engine.

/// One changed region of a file between a commit and its first parent.
///
/// Ranges are 0-based and half-open: `[begin_old, end_old)` addresses the
/// parent side, `[begin_new, end_new)` the commit side. A pure insertion has
/// an empty old range; a pure deletion an empty new range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffEdit {
    pub begin_old: u32,
    pub end_old: u32,
    pub begin_new: u32,
    pub end_new: u32,
}

impl DiffEdit {
    pub fn new(begin_old: u32, end_old: u32, begin_new: u32, end_new: u32) -> Self {
        Self {
            begin_old,
            end_old,
            begin_new,
            end_new,
        }
    }
}

/// The line span a method occupied in a release checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineSpan {
    /// First line of the method body.
    pub start: u32,
    /// Last line of the method body.
    pub end: u32,
}

impl LineSpan {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }
}
