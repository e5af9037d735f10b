/*! Spans over the ordered dataset.

A [Span] is a 1-based, inclusive range of lines. Spans are provided by the operator
and are clamped against the dataset length before use, see [Span::clamp].
!*/
use std::fmt;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    start: usize,
    end: Option<usize>,
}

impl Span {
    /// Create a new span. A `start` of 0 is treated as 1.
    /// An absent `end` means "up to the last line".
    pub fn new(start: usize, end: Option<usize>) -> Self {
        Self {
            start: start.max(1),
            end,
        }
    }

    /// Create a span from a signed start, as typed by an operator.
    /// Zero and negative starts mean the first line.
    pub fn from_signed(start: i64, end: Option<usize>) -> Self {
        let start = usize::try_from(start).unwrap_or(if start < 0 { 1 } else { usize::MAX });
        Self::new(start, end)
    }

    /// Span covering the whole dataset.
    pub fn all() -> Self {
        Self::new(1, None)
    }

    /// Get the span's start (1-based).
    pub fn start(&self) -> usize {
        self.start
    }

    /// Get the span's requested end (1-based, inclusive).
    pub fn end(&self) -> Option<usize> {
        self.end
    }

    /// Clamp the span to a dataset of `len` lines.
    ///
    /// Returns [None] if nothing remains.
    pub fn clamp(&self, len: usize) -> Option<Bounds> {
        let end = self.end.map_or(len, |end| end.min(len));
        if self.start > end {
            return None;
        }

        Some(Bounds {
            start: self.start,
            end,
        })
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::all()
    }
}

/// Effective span bounds, both set and within the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    start: usize,
    end: usize,
}

impl Bounds {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        (self.end + 1).saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// 0-based index range into the dataset.
    pub fn indices(&self) -> Range<usize> {
        (self.start - 1)..self.end
    }

    /// Span of the same size right after this one.
    pub fn next(&self) -> Span {
        Span::new(self.end + 1, Some(self.end + self.len()))
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_start_is_first_line() {
        let s = Span::new(0, Some(3));
        assert_eq!(s.start(), 1);
        assert_eq!(s.clamp(5), Some(Bounds::new(1, 3)));
    }

    #[test]
    fn negative_start_is_first_line() {
        assert_eq!(Span::from_signed(-3, None), Span::new(1, None));
        assert_eq!(Span::from_signed(0, Some(4)), Span::new(1, Some(4)));
        assert_eq!(Span::from_signed(7, Some(9)), Span::new(7, Some(9)));
    }

    #[test]
    fn end_clamps_to_len() {
        let s = Span::new(2, Some(100));
        let b = s.clamp(5).unwrap();
        assert_eq!(b, Bounds::new(2, 5));
        assert_eq!(b.indices(), 1..5);
    }

    #[test]
    fn open_end() {
        assert_eq!(Span::all().clamp(7), Some(Bounds::new(1, 7)));
    }

    #[test]
    fn start_past_len() {
        assert_eq!(Span::new(6, Some(10)).clamp(5), None);
        assert_eq!(Span::new(6, None).clamp(5), None);
        assert_eq!(Span::all().clamp(0), None);
    }

    #[test]
    fn inverted_span_is_empty() {
        assert_eq!(Span::new(4, Some(2)).clamp(5), None);

        let b = Bounds::new(5, 2);
        assert!(b.is_empty());
        assert_eq!(b.len(), 0);
    }

    #[test]
    fn next_span() {
        let b = Bounds::new(101, 200);
        assert_eq!(b.len(), 100);
        assert_eq!(b.next(), Span::new(201, Some(300)));

        let b = Bounds::new(2, 4);
        assert_eq!(b.next(), Span::new(5, Some(7)));
    }
}
