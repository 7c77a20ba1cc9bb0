//! Label decoration parsing.
//!
//! Raw node content carries a small inline markup:
//!
//! | Markup | Meaning |
//! |--------|---------|
//! | `main_sub` | `sub` is drawn as a subscript; further `_` in it become spaces |
//! | `+X+` | overline |
//! | `-X-` | underline |
//! | `=X=` | strike-through |
//! | `***X***` | bold italic |
//! | `**X**` | bold |
//! | `*X*` | italic |
//! | `<X>` | trace (empty category), colored separately |
//!
//! The subscript is split off first, then one decoration wrapper is removed,
//! then one emphasis wrapper.
//!
//! ```
//! # use sylva_core::label::{Emphasis, Label};
//! let label = Label::parse("***dog***_N");
//! assert_eq!(label.main(), "dog");
//! assert_eq!(label.subscript(), Some("N"));
//! assert_eq!(label.emphasis(), Some(Emphasis::BoldItalic));
//! ```

/// Line decoration drawn with the main text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decoration {
    Overline,
    Underline,
    LineThrough,
}

impl Decoration {
    /// Returns the SVG `text-decoration` value.
    pub fn svg_value(self) -> &'static str {
        match self {
            Self::Overline => "overline",
            Self::Underline => "underline",
            Self::LineThrough => "line-through",
        }
    }
}

/// Font emphasis of the main text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emphasis {
    Bold,
    Italic,
    BoldItalic,
}

impl Emphasis {
    pub fn is_bold(self) -> bool {
        matches!(self, Self::Bold | Self::BoldItalic)
    }

    pub fn is_italic(self) -> bool {
        matches!(self, Self::Italic | Self::BoldItalic)
    }
}

/// A node label with its inline markup resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    main: String,
    subscript: Option<String>,
    decoration: Option<Decoration>,
    emphasis: Option<Emphasis>,
    is_trace: bool,
}

const DECORATIONS: [(&str, Decoration); 3] = [
    ("+", Decoration::Overline),
    ("-", Decoration::Underline),
    ("=", Decoration::LineThrough),
];

// Longest marker first: `***` must win over `**` and `*`.
const EMPHASES: [(&str, Emphasis); 3] = [
    ("***", Emphasis::BoldItalic),
    ("**", Emphasis::Bold),
    ("*", Emphasis::Italic),
];

impl Label {
    /// Parses raw node content.
    ///
    /// Parsing is total: text that does not match a wrapper is kept verbatim.
    pub fn parse(content: &str) -> Self {
        let (main, subscript) = match content.split_once('_') {
            Some((main, sub)) => {
                let sub = sub.replace('_', " ");
                let sub = sub.trim();
                (main.trim(), (!sub.is_empty()).then(|| sub.to_string()))
            }
            None => (content.trim(), None),
        };

        let (main, decoration) = DECORATIONS
            .iter()
            .find_map(|&(marker, decoration)| {
                unwrap_marker(main, marker).map(|inner| (inner, Some(decoration)))
            })
            .unwrap_or((main, None));

        let (main, emphasis) = EMPHASES
            .iter()
            .find_map(|&(marker, emphasis)| {
                unwrap_marker(main, marker).map(|inner| (inner, Some(emphasis)))
            })
            .unwrap_or((main, None));

        let is_trace = main.starts_with('<') && main.ends_with('>');

        Self {
            main: main.to_string(),
            subscript,
            decoration,
            emphasis,
            is_trace,
        }
    }

    /// Returns the main text with every wrapper removed.
    pub fn main(&self) -> &str {
        &self.main
    }

    /// Returns the subscript text, if any.
    pub fn subscript(&self) -> Option<&str> {
        self.subscript.as_deref()
    }

    pub fn decoration(&self) -> Option<Decoration> {
        self.decoration
    }

    pub fn emphasis(&self) -> Option<Emphasis> {
        self.emphasis
    }

    /// Returns `true` for labels wrapped in angle brackets, such as `<NP>`.
    pub fn is_trace(&self) -> bool {
        self.is_trace
    }

    /// Counts the whitespace-separated tokens of raw content.
    pub fn token_count(content: &str) -> usize {
        content.split_whitespace().count()
    }
}

/// Strips `marker` from both ends of `text` when something remains inside.
fn unwrap_marker<'a>(text: &'a str, marker: &str) -> Option<&'a str> {
    text.strip_prefix(marker)?
        .strip_suffix(marker)
        .filter(|inner| !inner.is_empty())
}
