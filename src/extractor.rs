use crate::models::TagSet;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("title selector should be valid"));
static META_DESC_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("meta[name='description']").expect("meta description selector should be valid")
});
static META_ROBOTS_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("meta[name='robots']").expect("meta robots selector should be valid")
});
static CANONICAL_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("link[rel='canonical']").expect("canonical selector should be valid")
});
static META_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("meta").expect("meta selector should be valid"));

const OPEN_GRAPH_PREFIX: &str = "og:";
const TWITTER_PREFIX: &str = "twitter:";

/// A `<meta>` tag sorted into exactly one namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaTag<'a> {
    /// `<meta property="og:*">`
    OpenGraph { key: &'a str, content: &'a str },
    /// `<meta name="twitter:*">`
    TwitterCard { key: &'a str, content: &'a str },
    /// Anything else carrying a `name` or `property`.
    Other { key: &'a str, content: &'a str },
}

impl<'a> MetaTag<'a> {
    /// Decides the namespace of a `<meta>` tag from its attributes.
    ///
    /// Empty attribute values count as absent. Returns `None` when there is
    /// no content or no usable key. An `og:` property wins over a `twitter:`
    /// name on the same element, and among the remaining tags `name` is
    /// preferred over `property`.
    pub fn classify(
        name: Option<&'a str>,
        property: Option<&'a str>,
        content: Option<&'a str>,
    ) -> Option<Self> {
        let name = name.filter(|s| !s.is_empty());
        let property = property.filter(|s| !s.is_empty());
        let content = content.filter(|s| !s.is_empty())?;

        if let Some(key) = property.filter(|p| p.starts_with(OPEN_GRAPH_PREFIX)) {
            return Some(MetaTag::OpenGraph { key, content });
        }
        if let Some(key) = name.filter(|n| n.starts_with(TWITTER_PREFIX)) {
            return Some(MetaTag::TwitterCard { key, content });
        }
        name.or(property).map(|key| MetaTag::Other { key, content })
    }
}

/// Parses an HTML document into a [`TagSet`].
///
/// Never fails: malformed markup is recovered by the HTML parser and missing
/// elements simply leave their fields empty.
pub fn extract(html: &str) -> TagSet {
    let document = Html::parse_document(html);

    let mut tags = TagSet {
        title: extract_title(&document),
        description: first_attr(&document, &META_DESC_SELECTOR, "content"),
        canonical: first_attr(&document, &CANONICAL_SELECTOR, "href"),
        robots: first_attr(&document, &META_ROBOTS_SELECTOR, "content"),
        ..Default::default()
    };

    // Single pass so every tag lands in exactly one map; later duplicates overwrite.
    for element in document.select(&META_SELECTOR) {
        let attrs = element.value();
        let classified =
            MetaTag::classify(attrs.attr("name"), attrs.attr("property"), attrs.attr("content"));

        match classified {
            Some(MetaTag::OpenGraph { key, content }) => {
                tags.open_graph.insert(key.to_string(), content.to_string());
            }
            Some(MetaTag::TwitterCard { key, content }) => {
                tags.twitter_card.insert(key.to_string(), content.to_string());
            }
            Some(MetaTag::Other { key, content }) => {
                tags.meta_tags.insert(key.to_string(), content.to_string());
            }
            None => {}
        }
    }

    tags
}

/// First document `<title>`; SVG `<title>` elements only label graphics.
fn extract_title(document: &Html) -> Option<String> {
    document
        .select(&TITLE_SELECTOR)
        .find(|el| !inside_svg(el))
        .map(|el| el.text().collect::<String>())
        .filter(|title| !title.is_empty())
}

fn inside_svg(element: &ElementRef) -> bool {
    element.ancestors().any(|node| {
        node.value()
            .as_element()
            .is_some_and(|parent| parent.name() == "svg")
    })
}

/// Attribute of the first element matching `selector`, if it is non-empty.
fn first_attr(document: &Html, selector: &Selector, attr: &str) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .filter(|value| !value.is_empty())
        .map(|value| value.to_string())
}
