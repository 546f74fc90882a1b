//! Display width of source lines with tab stops.

/// Measured width of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineWidth {
    /// Rendered width in columns.
    pub width: usize,
    /// Character index of the first character rendered past the limit, if
    /// the line is too wide.
    pub threshold: Option<usize>,
}

/// Measures `line`, tabs advancing to the next multiple of `tab_width`.
///
/// The threshold counts raw characters, so it can be used as a column in an
/// editor while the limit itself is judged in display columns.
#[must_use]
pub fn measure(line: &str, limit: usize, tab_width: usize) -> LineWidth {
    let tab_width = tab_width.max(1);
    let mut width = 0;
    let mut within = 0;
    for c in line.chars() {
        if width < limit {
            within += 1;
        }
        width += if c == '\t' {
            tab_width - width % tab_width
        } else {
            1
        };
    }
    LineWidth {
        width,
        threshold: (width > limit).then_some(within),
    }
}

/// Rendered width of `text`.
#[must_use]
pub fn text_width(text: &str, tab_width: usize) -> usize {
    measure(text, usize::MAX, tab_width).width
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tabs_advance_to_next_stop() {
        assert_eq!(text_width("\t", 4), 4);
        assert_eq!(text_width("ab\t", 4), 4);
        assert_eq!(text_width("abcd\t", 4), 8);
        assert_eq!(text_width("\t\tx", 4), 9);
    }

    #[test]
    fn test_within_limit_has_no_threshold() {
        let line = "x".repeat(120);
        assert_eq!(
            measure(&line, 120, 4),
            LineWidth {
                width: 120,
                threshold: None
            }
        );
    }

    #[test]
    fn test_threshold_is_character_index() {
        let line = "x".repeat(121);
        assert_eq!(measure(&line, 120, 4).threshold, Some(120));

        // Each tab renders 4 wide: 29 tabs reach 116, 4 more chars reach 120.
        let line = format!("{}{}", "\t".repeat(29), "x".repeat(5));
        let measured = measure(&line, 120, 4);
        assert_eq!(measured.width, 121);
        assert_eq!(measured.threshold, Some(33));
    }

    #[test]
    fn test_appending_never_shrinks_width() {
        let mut line = String::new();
        let mut last = 0;
        for c in "\tab\t c\t\t".chars() {
            line.push(c);
            let width = text_width(&line, 4);
            assert!(width >= last);
            last = width;
        }
    }
}
