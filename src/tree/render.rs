//! Textual renderings of an [`OrderedMap`].

use std::fmt;

use smallvec::SmallVec;

use super::arena::{Link, NodeId};
use super::ordered_map::OrderedMap;
use super::traversal::INLINE_DEPTH;

/// Columns added per level by [`Diagram`] unless overridden.
pub const DEFAULT_INDENT: usize = 15;

/// Widest padding a single diagram line may ask the formatter for.
const MAX_PADDING: usize = 65_535;

// =============================================================================
// Diagram
// =============================================================================

/// Sideways drawing of the tree shape, created by [`OrderedMap::diagram`].
///
/// The right subtree is printed above its parent and the left subtree below,
/// one node per line, so turning the output 90 degrees clockwise shows the
/// tree with its root on top. Each level is indented by a fixed number of
/// columns.
///
/// # Examples
///
/// ```rust
/// use lexicon::tree::OrderedMap;
///
/// let map: OrderedMap<&str, i32> = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
/// let drawing = map.diagram().with_indent(4).to_string();
/// assert_eq!(drawing, "    (\"c\":3 R)\n(\"b\":2 B)\n    (\"a\":1 R)\n");
/// ```
pub struct Diagram<'a, K, V> {
    map: &'a OrderedMap<K, V>,
    indent: usize,
}

impl<K, V> Diagram<'_, K, V> {
    /// Sets the number of columns each level is shifted by.
    ///
    /// Formatting fails with [`fmt::Error`] when a line would need more
    /// than 65 535 columns of padding.
    #[must_use]
    pub const fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for Diagram<'_, K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arena = &self.map.arena;
        if self.map.root.is_none() {
            return writeln!(formatter, "<empty tree>");
        }

        let mut stack: SmallVec<[(NodeId, usize); INLINE_DEPTH]> = SmallVec::new();
        let mut link: Link = self.map.root;
        let mut depth = 0;

        loop {
            while let Some(id) = link {
                stack.push((id, depth));
                link = arena[id].right;
                depth += 1;
            }
            let Some((id, node_depth)) = stack.pop() else {
                break;
            };

            let node = &arena[id];
            let width = node_depth
                .checked_mul(self.indent)
                .filter(|width| *width <= MAX_PADDING)
                .ok_or(fmt::Error)?;
            writeln!(
                formatter,
                "{:width$}(\"{}\":{} {})",
                "",
                node.key,
                node.value,
                node.color.tag(),
            )?;

            link = node.left;
            depth = node_depth + 1;
        }

        Ok(())
    }
}

impl<K, V> OrderedMap<K, V> {
    /// Returns a [`Diagram`] of the tree shape with [`DEFAULT_INDENT`] columns
    /// per level.
    #[must_use]
    pub const fn diagram(&self) -> Diagram<'_, K, V> {
        Diagram {
            map: self,
            indent: DEFAULT_INDENT,
        }
    }
}

// =============================================================================
// Display / Debug
// =============================================================================

/// Prints entries in key order with their color: `{a: 1 (B), b: 2 (R)}`.
impl<K: fmt::Display, V: fmt::Display> fmt::Display for OrderedMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value, color) in self.traverse() {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value} ({})", color.tag())?;
        }
        write!(formatter, "}}")
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_map()
            .entries(self.traverse().map(|(key, value, _)| (key, value)))
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn map_of(keys: &[&'static str]) -> OrderedMap<&'static str, i32> {
        keys.iter().map(|key| (*key, 1)).collect()
    }

    #[rstest]
    fn test_display_empty() {
        let map: OrderedMap<String, i32> = OrderedMap::new();
        assert_eq!(format!("{map}"), "{}");
    }

    #[rstest]
    fn test_display_sorted_with_colors() {
        let map = map_of(&["c", "a", "b"]);
        assert_eq!(format!("{map}"), "{a: 1 (R), b: 1 (B), c: 1 (R)}");
    }

    #[rstest]
    fn test_debug_is_a_map() {
        let map = map_of(&["b", "a"]);
        assert_eq!(format!("{map:?}"), r#"{"a": 1, "b": 1}"#);
    }

    #[rstest]
    fn test_diagram_empty() {
        let map: OrderedMap<String, i32> = OrderedMap::new();
        assert_eq!(map.diagram().to_string(), "<empty tree>\n");
    }

    #[rstest]
    fn test_diagram_single_node_has_no_indent() {
        let map = map_of(&["m"]);
        assert_eq!(map.diagram().to_string(), "(\"m\":1 B)\n");
    }

    #[rstest]
    fn test_diagram_default_indent() {
        let map = map_of(&["a", "b", "c", "d"]);
        let expected = [
            format!("{:30}(\"d\":1 R)", ""),
            format!("{:15}(\"c\":1 B)", ""),
            "(\"b\":1 B)".to_string(),
            format!("{:15}(\"a\":1 B)", ""),
        ]
        .join("\n")
            + "\n";
        assert_eq!(map.diagram().to_string(), expected);
    }

    #[rstest]
    #[case(usize::MAX)]
    #[case(usize::MAX / 2 + 1)]
    #[case(MAX_PADDING + 1)]
    fn test_diagram_oversized_indent_is_an_error(#[case] indent: usize) {
        use std::fmt::Write;

        let map = map_of(&["a", "b", "c"]);
        let mut drawing = String::new();
        let result = write!(drawing, "{}", map.diagram().with_indent(indent));
        assert!(result.is_err());
    }

    #[rstest]
    fn test_diagram_oversized_indent_single_node() {
        let map = map_of(&["m"]);
        let drawing = map.diagram().with_indent(usize::MAX).to_string();
        assert_eq!(drawing, "(\"m\":1 B)\n");
    }

    #[rstest]
    #[case(0)]
    #[case(2)]
    fn test_diagram_lists_every_node(#[case] indent: usize) {
        let map: OrderedMap<u32, u32> = (0..20).map(|key| (key, key)).collect();
        let drawing = map.diagram().with_indent(indent).to_string();
        assert_eq!(drawing.lines().count(), 20);
        // Reverse in-order: the largest key comes first.
        let first = drawing.lines().next().map(str::trim_start);
        assert!(first.is_some_and(|line| line.starts_with("(\"19\":19 ")));
    }
}
