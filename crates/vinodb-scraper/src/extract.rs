//! Field extraction over parsed catalog markup.
//!
//! Every selector, class name, and label the catalog layout depends on lives
//! in this module. The listing and detail stages ask for a [`CatalogField`]
//! and never touch selectors directly, so a layout change on the site is a
//! change here and nowhere else.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid selector")
}

static PRODUCT: LazyLock<Selector> = LazyLock::new(|| selector(r#"div[class="product"]"#));
static NAME_LINK: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"div[class="data"] div[class="name"] h2 a"#));
static LISTED_PRICE: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"span[class="product-list-price"]"#));
static PRICE_FRACTION: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"span[class="product-price-fraction"]"#));
static PRICE_DECIMAL: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"span[class="product-price-decimal"]"#));
static PRODUCER: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"div[class="value"] a > span[itemprop="name"]"#));
static DIV: LazyLock<Selector> = LazyLock::new(|| selector("div"));

/// Which part of a labelled value cell to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValuePart {
    /// Text of the first `<a>` child.
    FirstLinkText,
    /// Text of every `<a>` child, joined with `", "`.
    AllLinkTexts,
    /// The cell's own first non-blank text node.
    OwnText,
}

/// How to locate one field inside a document or container element.
#[derive(Debug, Clone, Copy)]
pub enum FieldSpec<'a> {
    /// Trimmed text of the first element matching the selector.
    FirstText(&'a Selector),
    /// Attribute value of the first element matching the selector.
    Attribute(&'a Selector, &'static str),
    /// A `<div>` whose own text contains `label`, followed by sibling
    /// `<div>`s whose class is exactly `value_class`.
    LabeledValue {
        label: &'static str,
        value_class: &'static str,
        part: ValuePart,
    },
}

/// Fields the catalog pipeline reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogField {
    Name,
    DetailLink,
    ListedPrice,
    PriceFraction,
    PriceDecimal,
    Producer,
    Variety,
    Blend,
    WineType,
}

impl CatalogField {
    #[must_use]
    pub fn spec(self) -> FieldSpec<'static> {
        match self {
            CatalogField::Name => FieldSpec::FirstText(&NAME_LINK),
            CatalogField::DetailLink => FieldSpec::Attribute(&NAME_LINK, "href"),
            CatalogField::ListedPrice => FieldSpec::FirstText(&LISTED_PRICE),
            CatalogField::PriceFraction => FieldSpec::FirstText(&PRICE_FRACTION),
            CatalogField::PriceDecimal => FieldSpec::FirstText(&PRICE_DECIMAL),
            CatalogField::Producer => FieldSpec::FirstText(&PRODUCER),
            CatalogField::Variety => FieldSpec::LabeledValue {
                label: "VARIEDAD",
                value_class: "value",
                part: ValuePart::AllLinkTexts,
            },
            CatalogField::Blend => FieldSpec::LabeledValue {
                label: "CORTE",
                value_class: "value",
                part: ValuePart::OwnText,
            },
            CatalogField::WineType => FieldSpec::LabeledValue {
                label: "TIPO",
                value_class: "value",
                part: ValuePart::FirstLinkText,
            },
        }
    }

    /// Column-style name used in error messages and logs.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CatalogField::Name => "name",
            CatalogField::DetailLink => "link",
            CatalogField::ListedPrice => "listed price",
            CatalogField::PriceFraction => "price fraction",
            CatalogField::PriceDecimal => "price decimal",
            CatalogField::Producer => "producer",
            CatalogField::Variety => "variety",
            CatalogField::Blend => "blend",
            CatalogField::WineType => "type",
        }
    }
}

/// Product container elements on a listing page, in document order.
pub fn product_containers(document: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    document.select(&PRODUCT)
}

/// Reads `field` from `root`. Shorthand for `extract_field(root, &field.spec())`.
#[must_use]
pub fn extract(root: ElementRef<'_>, field: CatalogField) -> Option<String> {
    extract_field(root, &field.spec())
}

/// Reads one field from `root` and its descendants.
///
/// Returns `None` when nothing matches or the matched text is blank.
#[must_use]
pub fn extract_field(root: ElementRef<'_>, spec: &FieldSpec<'_>) -> Option<String> {
    match *spec {
        FieldSpec::FirstText(sel) => root
            .select(sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_owned())
            .filter(|text| !text.is_empty()),
        FieldSpec::Attribute(sel, attr) => root
            .select(sel)
            .next()
            .and_then(|el| el.value().attr(attr))
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_owned),
        FieldSpec::LabeledValue {
            label,
            value_class,
            part,
        } => labeled_value(root, label, value_class, part),
    }
}

fn labeled_value(
    root: ElementRef<'_>,
    label: &str,
    value_class: &str,
    part: ValuePart,
) -> Option<String> {
    let mut cells = root
        .select(&DIV)
        .filter(|div| own_text(*div).contains(label))
        .flat_map(|div| {
            div.next_siblings()
                .filter_map(ElementRef::wrap)
                .filter(move |sib| {
                    sib.value().name() == "div" && sib.value().attr("class") == Some(value_class)
                })
        });

    match part {
        ValuePart::FirstLinkText => cells.flat_map(|cell| link_texts(cell)).next(),
        ValuePart::AllLinkTexts => {
            let texts: Vec<String> = cells.flat_map(|cell| link_texts(cell)).collect();
            (!texts.is_empty()).then(|| texts.join(", "))
        }
        ValuePart::OwnText => cells.find_map(|cell| {
            cell.children()
                .filter_map(|node| node.value().as_text())
                .map(|text| text.trim())
                .find(|text| !text.is_empty())
                .map(str::to_owned)
        }),
    }
}

/// Concatenation of the element's direct text children.
fn own_text(element: ElementRef<'_>) -> String {
    element
        .children()
        .filter_map(|node| node.value().as_text())
        .map(|text| &**text)
        .collect()
}

/// Non-blank texts of the element's direct `<a>` children.
fn link_texts(cell: ElementRef<'_>) -> impl Iterator<Item = String> + '_ {
    cell.children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "a")
        .map(|a| a.text().collect::<String>().trim().to_owned())
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
