//! Thin typed view over a parsed HTML page.
//!
//! The scrapers only need a handful of lookups: all elements with a tag, the
//! first element whose attribute contains a token, optional attributes and
//! trimmed text. Lookups walk the tree directly instead of going through CSS
//! selectors, so none of them can fail.

use scraper::{ElementRef, Html};

/// How the text fragments of an element are glued together after trimming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMode {
    /// `"1", "234"` becomes `"1234"`.
    Joined,
    /// `"Party", "A"` becomes `"Party A"`.
    Spaced,
}

pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    pub fn find_all(&self, tag: &str) -> Vec<Element<'_>> {
        Element::new(self.html.root_element()).descendants_named(tag, true)
    }

    /// First `tag` element whose `attr` value, split on whitespace, contains `token`.
    pub fn find_first_with_token(&self, tag: &str, attr: &str, token: &str) -> Option<Element<'_>> {
        self.find_all(tag)
            .into_iter()
            .find(|element| element.attr_tokens(attr).any(|t| t == token))
    }
}

#[derive(Clone, Copy)]
pub struct Element<'a> {
    inner: ElementRef<'a>,
}

impl<'a> Element<'a> {
    fn new(inner: ElementRef<'a>) -> Self {
        Self { inner }
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.inner.value().attr(name)
    }

    /// Whitespace-separated tokens of an attribute; empty when it is absent.
    pub fn attr_tokens(&self, name: &str) -> impl Iterator<Item = &'a str> {
        self.attr(name).unwrap_or_default().split_ascii_whitespace()
    }

    /// Descendant elements with the given tag, in document order.
    pub fn find_all(&self, tag: &str) -> Vec<Element<'a>> {
        self.descendants_named(tag, false)
    }

    pub fn find_first(&self, tag: &str) -> Option<Element<'a>> {
        self.inner
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .find(|e| e.value().name() == tag)
            .map(Element::new)
    }

    pub fn text(&self, mode: TextMode) -> String {
        let fragments = self
            .inner
            .text()
            .map(str::trim)
            .filter(|fragment| !fragment.is_empty());

        match mode {
            TextMode::Joined => fragments.collect(),
            TextMode::Spaced => fragments.collect::<Vec<_>>().join(" "),
        }
    }

    fn descendants_named(&self, tag: &str, include_self: bool) -> Vec<Element<'a>> {
        let skip = if include_self { 0 } else { 1 };
        self.inner
            .descendants()
            .skip(skip)
            .filter_map(ElementRef::wrap)
            .filter(|e| e.value().name() == tag)
            .map(Element::new)
            .collect()
    }
}
