//! Structural highlighting of markup text.
//!
//! Highlighting is a best-effort lexical scan rather than a parse. Three
//! independent regex passes find comments, tags and the attributes inside
//! each tag. Regions from different passes may overlap, for example a tag
//! written inside a comment body. Overlaps are resolved by the apply order of
//! [`StyleKind`]: regions are painted `Tag`, then `Attribute`, then
//! `Comment`, and the last one applied wins. [`layer`] performs that
//! resolution so render sinks only ever see non-overlapping segments.
//!
//! Offsets are byte offsets into the UTF-8 source and always fall on
//! character boundaries. Use [`StyleRegion::char_span`] for sinks that index
//! by character.

use std::{ops::Range, sync::LazyLock};

use regex::Regex;
use serde::Serialize;
use tracing::{debug, instrument};

static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern is valid"));

// Spans lines so that tags broken over several lines are still found.
static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)</?\w+.*?>").expect("tag pattern is valid"));

static ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\w+:?\w*=".*?""#).expect("attribute pattern is valid"));

/// The highlight category of a region.
///
/// Variants are declared, and ordered, in apply order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleKind {
    /// An opening, closing or self-closing tag, brackets included.
    Tag,
    /// A `name="value"` pair inside a tag.
    Attribute,
    /// A `<!-- ... -->` comment.
    Comment,
}

/// A half-open `[start, end)` byte range of the source tagged with a style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StyleRegion {
    /// Byte offset of the first styled character.
    pub start: usize,
    /// Byte offset one past the last styled character.
    pub end: usize,
    /// The highlight category.
    pub kind: StyleKind,
}

impl StyleRegion {
    const fn new(kind: StyleKind, range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
            kind,
        }
    }

    /// The region as a byte range.
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Returns `true` if `other` lies entirely within this region.
    #[must_use]
    pub const fn contains(&self, other: &Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Converts the byte range into a character range over `text`.
    #[must_use]
    pub fn char_span(&self, text: &str) -> Range<usize> {
        let chars_before = |offset: usize| text.get(..offset).map_or(0, |s| s.chars().count());
        chars_before(self.start)..chars_before(self.end)
    }
}

/// Scans `text` and returns its style regions in apply order.
///
/// All `Tag` regions come first, then all `Attribute` regions, then all
/// `Comment` regions, each group in source order. Painting them in sequence
/// with "last applied wins" yields the intended layering. The result is a
/// pure function of `text`.
#[instrument(level = "debug", skip_all, fields(len = text.len()))]
#[must_use]
pub fn highlight(text: &str) -> Vec<StyleRegion> {
    let comments = COMMENT
        .find_iter(text)
        .map(|m| StyleRegion::new(StyleKind::Comment, m.range()));

    let mut tags = Vec::new();
    let mut attributes = Vec::new();
    for tag in TAG.find_iter(text) {
        tags.push(StyleRegion::new(StyleKind::Tag, tag.range()));
        attributes.extend(ATTRIBUTE.find_iter(tag.as_str()).map(|attribute| {
            StyleRegion::new(
                StyleKind::Attribute,
                tag.start() + attribute.start()..tag.start() + attribute.end(),
            )
        }));
    }

    let mut regions = tags;
    regions.append(&mut attributes);
    regions.extend(comments);

    debug!(regions = regions.len(), "highlighted markup");
    regions
}

/// A contiguous run of the source with a single resolved style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// The byte range of the run.
    pub range: Range<usize>,
    /// The winning style, or `None` for plain text.
    pub kind: Option<StyleKind>,
}

impl Segment {
    /// The slice of `text` covered by this segment.
    #[must_use]
    pub fn text<'a>(&self, text: &'a str) -> &'a str {
        text.get(self.range.clone()).unwrap_or_default()
    }
}

/// Flattens possibly overlapping regions into non-overlapping segments that
/// cover all of `text`.
///
/// Regions are applied in [`StyleKind`] order regardless of their order in
/// `regions`; within one kind, later regions are applied after earlier ones.
/// Where regions overlap, the last applied style wins. Regions extending
/// past the end of `text` are clipped, and a boundary falling inside a
/// multi-byte character is widened to cover the whole character, so every
/// segment starts and ends on a character boundary.
#[must_use]
pub fn layer(text: &str, regions: &[StyleRegion]) -> Vec<Segment> {
    let mut ordered = regions.to_vec();
    ordered.sort_by_key(|region| region.kind);

    let mut styles: Vec<Option<StyleKind>> = vec![None; text.len()];
    for region in &ordered {
        let start = floor_char_boundary(text, region.start);
        let end = ceil_char_boundary(text, region.end);
        if start < end {
            styles[start..end].fill(Some(region.kind));
        }
    }

    let mut segments: Vec<Segment> = Vec::new();
    for (offset, kind) in styles.into_iter().enumerate() {
        match segments.last_mut() {
            Some(last) if last.kind == kind => last.range.end = offset + 1,
            _ => segments.push(Segment {
                range: offset..offset + 1,
                kind,
            }),
        }
    }
    segments
}

fn floor_char_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

fn ceil_char_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset += 1;
    }
    offset
}
