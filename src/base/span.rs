//! Source text positions and ranges.
//!
//! Spans are byte ranges via the `text-size` crate. Mapping offsets to
//! line/column positions is the diagnostics renderer's job and lives
//! outside this crate.

pub use text_size::{TextRange, TextSize};

/// The empty range used for constructs synthesized by the compiler
/// (e.g. default-import directives) that have no source text.
pub fn synthetic_range() -> TextRange {
    TextRange::empty(TextSize::from(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_range_is_empty() {
        assert!(synthetic_range().is_empty());
    }
}
