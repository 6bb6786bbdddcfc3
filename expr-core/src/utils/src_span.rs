use std::fmt::Display;

/// Byte range `start..end` into the source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SrcSpan {
    pub start: u32,
    pub end: u32,
}

impl SrcSpan {
	/// Zero-width span, used for end of input.
	pub fn point(at: u32) -> Self {
		Self { start: at, end: at }
	}

	/// Smallest span covering both `self` and `other`.
	pub fn merge(self, other: SrcSpan) -> Self {
		Self {
			start: self.start.min(other.start),
			end: self.end.max(other.end),
		}
	}

	pub fn len(&self) -> u32 {
		self.end.saturating_sub(self.start)
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// 0-based character column of `start` within `src`.
	pub fn column(&self, src: &str) -> usize {
		let start = (self.start as usize).min(src.len());

		match src.get(..start) {
			Some(prefix) => prefix.chars().count(),
			None => start,
		}
	}

	pub fn range(&self) -> std::ops::Range<usize> {
		(self.start as usize)..(self.end as usize)
	}
}

impl Display for SrcSpan {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}..{}", self.start, self.end)
	}
}
