//! Single-pass tree rebuild around resolved spans

use crate::markup::{Marker, MarkupNode};
use textanchor_core::OffsetRange;

/// A resolved span in flattened block coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlacedSpan<'a> {
    pub id: &'a str,
    pub category: &'a str,
    pub range: OffsetRange,
    /// The span began in an earlier block
    pub open_start: bool,
    /// The span continues into a later block
    pub open_end: bool,
}

/// Rebuild output
#[derive(Debug)]
pub(crate) struct Rebuilt<N> {
    pub root: N,
    /// Marker fragments emitted per span, parallel to the input spans
    pub fragments: Vec<usize>,
}

/// Concatenated text of every leaf in depth-first order
pub(crate) fn flatten<N: MarkupNode>(node: &N) -> String {
    let mut out = String::new();
    collect(node, &mut out);
    out
}

fn collect<N: MarkupNode>(node: &N, out: &mut String) {
    if let Some(text) = node.text() {
        out.push_str(text);
    } else {
        for child in node.children() {
            collect(child, out);
        }
    }
}

/// Wrap every span in marker elements, splitting leaves at span edges
///
/// Spans are nested in the order given: an earlier span encloses a later
/// one wherever they overlap, so callers sort by start offset first.
pub(crate) fn rebuild<N: MarkupNode>(
    root: &N,
    spans: &[PlacedSpan<'_>],
    tag: &str,
) -> Rebuilt<N> {
    let mut builder = Builder {
        spans,
        tag,
        offset: 0,
        fragments: vec![0; spans.len()],
    };
    let mut nodes = builder.visit(root);
    let root = if nodes.len() == 1 {
        nodes.remove(0)
    } else {
        // Only a text root can split; the caller rejects those
        root.with_children(nodes)
    };
    Rebuilt {
        root,
        fragments: builder.fragments,
    }
}

struct Builder<'s, 'a> {
    spans: &'s [PlacedSpan<'a>],
    tag: &'s str,
    offset: usize,
    fragments: Vec<usize>,
}

/// A maximal piece of a leaf covered by the same set of spans
struct Piece {
    range: OffsetRange,
    text: String,
    covering: Vec<usize>,
}

impl<'s, 'a> Builder<'s, 'a> {
    fn visit<N: MarkupNode>(&mut self, node: &N) -> Vec<N> {
        if let Some(text) = node.text() {
            return self.split_leaf(node, text);
        }
        let children: Vec<N> = node
            .children()
            .iter()
            .flat_map(|child| self.visit(child))
            .collect();
        vec![node.with_children(children)]
    }

    fn split_leaf<N: MarkupNode>(&mut self, node: &N, text: &str) -> Vec<N> {
        let chars: Vec<char> = text.chars().collect();
        let leaf = OffsetRange::new(self.offset, self.offset + chars.len());
        self.offset = leaf.end;

        let touching = self
            .spans
            .iter()
            .any(|s| s.range.start < leaf.end && s.range.end > leaf.start);
        if leaf.is_empty() || !touching {
            return vec![node.clone()];
        }

        let mut cuts = vec![leaf.start, leaf.end];
        for span in self.spans {
            for edge in [span.range.start, span.range.end] {
                if edge > leaf.start && edge < leaf.end {
                    cuts.push(edge);
                }
            }
        }
        cuts.sort_unstable();
        cuts.dedup();

        let pieces: Vec<Piece> = cuts
            .windows(2)
            .map(|w| {
                let range = OffsetRange::new(w[0], w[1]);
                let covering = (0..self.spans.len())
                    .filter(|&i| {
                        let span = self.spans[i].range;
                        span.start <= range.start && span.end >= range.end
                    })
                    .collect();
                let text = chars[range.start - leaf.start..range.end - leaf.start]
                    .iter()
                    .collect();
                Piece {
                    range,
                    text,
                    covering,
                }
            })
            .collect();

        self.group(&pieces, 0)
    }

    /// Group consecutive pieces by their span at `depth` and wrap each group
    fn group<N: MarkupNode>(&mut self, pieces: &[Piece], depth: usize) -> Vec<N> {
        let spans = self.spans;
        let tag = self.tag;
        let mut out = Vec::new();
        let mut i = 0;
        while i < pieces.len() {
            let key = pieces[i].covering.get(depth).copied();
            let mut j = i + 1;
            while j < pieces.len() && pieces[j].covering.get(depth).copied() == key {
                j += 1;
            }
            let run = &pieces[i..j];

            match key {
                None => out.extend(run.iter().map(|p| N::text_node(p.text.clone()))),
                Some(index) => {
                    let span = &spans[index];
                    let marker = Marker {
                        tag,
                        id: span.id,
                        category: span.category,
                        first: !span.open_start && run[0].range.start == span.range.start,
                        last: !span.open_end && run[run.len() - 1].range.end == span.range.end,
                    };
                    let children = self.group(run, depth + 1);
                    self.fragments[index] += 1;
                    out.push(N::marker_node(&marker, children));
                }
            }
            i = j;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::Node;

    fn span<'a>(id: &'a str, start: usize, end: usize) -> PlacedSpan<'a> {
        PlacedSpan {
            id,
            category: "note",
            range: OffsetRange::new(start, end),
            open_start: false,
            open_end: false,
        }
    }

    #[test]
    fn test_wraps_within_one_leaf() {
        let root = Node::element("p", vec![Node::text("hello big world")]);
        let rebuilt = rebuild(&root, &[span("a", 6, 9)], "mark");
        assert_eq!(
            rebuilt.root.to_html(),
            "<p>hello <mark data-span-id=\"a\" data-category=\"note\" data-span-first=\"true\" \
             data-span-last=\"true\">big</mark> world</p>"
        );
        assert_eq!(rebuilt.fragments, vec![1]);
    }

    #[test]
    fn test_span_across_elements_fragments() {
        let root = Node::element(
            "p",
            vec![
                Node::text("one "),
                Node::element("b", vec![Node::text("two")]),
                Node::text(" three"),
            ],
        );
        let rebuilt = rebuild(&root, &[span("a", 2, 9)], "mark");

        assert_eq!(rebuilt.fragments, vec![3]);
        assert_eq!(rebuilt.root.flatten_text(), root.flatten_text());
        let html = rebuilt.root.to_html();
        assert!(html.starts_with("<p>on<mark data-span-id=\"a\""));
        assert!(html.contains("<b><mark data-span-id=\"a\" data-category=\"note\">two</mark></b>"));
        assert!(html.contains("data-span-last=\"true\"> t</mark>hree"));
    }

    #[test]
    fn test_overlapping_spans_nest() {
        let root = Node::element("p", vec![Node::text("abcdefgh")]);
        let rebuilt = rebuild(&root, &[span("outer", 1, 5), span("inner", 3, 7)], "m");
        let html = rebuilt.root.to_html();

        assert_eq!(rebuilt.root.flatten_text(), "abcdefgh");
        assert_eq!(rebuilt.fragments, vec![1, 2]);
        assert!(html.starts_with("<p>a<m data-span-id=\"outer\""));
        assert!(html.contains(">bc<m data-span-id=\"inner\""));
        assert!(html.contains(">de</m></m><m data-span-id=\"inner\""));
        assert!(html.ends_with(">fg</m>h</p>"));
    }

    #[test]
    fn test_untouched_leaves_are_preserved() {
        let root = Node::element(
            "div",
            vec![
                Node::element("p", vec![Node::text("first")]),
                Node::element("p", vec![Node::text("second")]),
            ],
        );
        let rebuilt = rebuild(&root, &[span("x", 5, 11)], "mark");
        assert_eq!(rebuilt.root.children()[0], root.children()[0]);
        assert_eq!(rebuilt.fragments, vec![1]);
    }
}
