//! Domain records produced by a scrape run.

use crate::price::{discount_percent, trim_price_suffix};

/// Placeholder for an optional field the page did not render.
pub const NOT_AVAILABLE: &str = "N/A";

/// Report column headers, in [`WineRecord`] field order.
pub const REPORT_COLUMNS: [&str; 8] = [
    "Nombre del Producto",
    "Productor",
    "Variedad",
    "Corte",
    "Tipo",
    "Precio Original",
    "Precio Descontado",
    "Descuento (%)",
];

/// One catalog entry found on a listing page, before detail enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStub {
    pub name: String,
    /// Absolute URL of the product's detail page.
    pub detail_url: String,
    /// Raw listed ("original") price text, e.g. `$12.345,00`.
    pub listed_price: Option<String>,
    /// Discounted price rebuilt from its integer and decimal nodes.
    /// `None` unless both nodes were rendered.
    pub current_price: Option<String>,
}

impl ItemStub {
    /// Discount derived from the two listing prices; independent of the
    /// detail page.
    #[must_use]
    pub fn discount_percent(&self) -> Option<f64> {
        discount_percent(self.listed_price.as_deref(), self.current_price.as_deref())
    }
}

/// Attributes only present on an item's detail page.
///
/// Every field independently falls back to [`NOT_AVAILABLE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailAttributes {
    pub producer: String,
    /// Comma-joined list of one or more varietals.
    pub variety: String,
    pub blend: String,
    pub wine_type: String,
}

impl Default for DetailAttributes {
    fn default() -> Self {
        Self {
            producer: NOT_AVAILABLE.to_owned(),
            variety: NOT_AVAILABLE.to_owned(),
            blend: NOT_AVAILABLE.to_owned(),
            wine_type: NOT_AVAILABLE.to_owned(),
        }
    }
}

/// Output row: an [`ItemStub`] joined with its [`DetailAttributes`].
#[derive(Debug, Clone, PartialEq)]
pub struct WineRecord {
    name: String,
    producer: String,
    variety: String,
    blend: String,
    wine_type: String,
    listed_price: Option<String>,
    current_price: Option<String>,
    discount_percent: Option<f64>,
}

impl WineRecord {
    #[must_use]
    pub fn from_parts(stub: ItemStub, attrs: DetailAttributes) -> Self {
        let discount_percent = stub.discount_percent();
        Self {
            name: stub.name,
            producer: attrs.producer,
            variety: attrs.variety,
            blend: attrs.blend,
            wine_type: attrs.wine_type,
            listed_price: stub.listed_price,
            current_price: stub.current_price,
            discount_percent,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn producer(&self) -> &str {
        &self.producer
    }

    #[must_use]
    pub fn variety(&self) -> &str {
        &self.variety
    }

    #[must_use]
    pub fn blend(&self) -> &str {
        &self.blend
    }

    #[must_use]
    pub fn wine_type(&self) -> &str {
        &self.wine_type
    }

    #[must_use]
    pub fn current_price(&self) -> Option<&str> {
        self.current_price.as_deref()
    }

    #[must_use]
    pub fn discount_percent(&self) -> Option<f64> {
        self.discount_percent
    }

    /// Listed price without its cents suffix, or [`NOT_AVAILABLE`].
    #[must_use]
    pub fn listed_price_display(&self) -> String {
        price_display(self.listed_price.as_deref())
    }

    /// Discounted price without its cents suffix, or [`NOT_AVAILABLE`].
    #[must_use]
    pub fn current_price_display(&self) -> String {
        price_display(self.current_price.as_deref())
    }

    /// Whole-number percentage such as `25%`; empty when the discount is
    /// unset. Never [`NOT_AVAILABLE`].
    #[must_use]
    pub fn discount_display(&self) -> String {
        self.discount_percent
            .map(|pct| format!("{pct:.0}%"))
            .unwrap_or_default()
    }

    /// Cell values in [`REPORT_COLUMNS`] order.
    #[must_use]
    pub fn to_row(&self) -> [String; 8] {
        [
            self.name.clone(),
            self.producer.clone(),
            self.variety.clone(),
            self.blend.clone(),
            self.wine_type.clone(),
            self.listed_price_display(),
            self.current_price_display(),
            self.discount_display(),
        ]
    }
}

fn price_display(raw: Option<&str>) -> String {
    raw.map_or_else(|| NOT_AVAILABLE.to_owned(), |p| trim_price_suffix(p).to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stub(listed: Option<&str>, current: Option<&str>) -> ItemStub {
        ItemStub {
            name: "Catena Malbec".to_owned(),
            detail_url: "https://shop.example/vinos/catena-malbec".to_owned(),
            listed_price: listed.map(str::to_owned),
            current_price: current.map(str::to_owned),
        }
    }

    #[test]
    fn default_attributes_are_all_not_available() {
        let attrs = DetailAttributes::default();
        assert_eq!(attrs.producer, NOT_AVAILABLE);
        assert_eq!(attrs.variety, NOT_AVAILABLE);
        assert_eq!(attrs.blend, NOT_AVAILABLE);
        assert_eq!(attrs.wine_type, NOT_AVAILABLE);
    }

    #[test]
    fn record_with_both_prices_renders_discount() {
        let record = WineRecord::from_parts(
            stub(Some("$20.000,00"), Some("$15.000,00")),
            DetailAttributes::default(),
        );
        assert_eq!(record.listed_price_display(), "$20.000");
        assert_eq!(record.current_price_display(), "$15.000");
        assert_eq!(record.discount_display(), "25%");
    }

    #[test]
    fn record_without_current_price_has_empty_discount() {
        let record =
            WineRecord::from_parts(stub(Some("$20.000,00"), None), DetailAttributes::default());
        assert!(record.current_price().is_none());
        assert!(record.discount_percent().is_none());
        assert_eq!(record.current_price_display(), NOT_AVAILABLE);
        assert_eq!(record.discount_display(), "");
    }

    #[test]
    fn row_follows_report_column_order() {
        let attrs = DetailAttributes {
            producer: "Catena Zapata".to_owned(),
            variety: "Malbec, Cabernet Franc".to_owned(),
            blend: "70% Malbec".to_owned(),
            wine_type: "Tinto".to_owned(),
        };
        let row = WineRecord::from_parts(stub(None, None), attrs).to_row();
        assert_eq!(row.len(), REPORT_COLUMNS.len());
        assert_eq!(row[0], "Catena Malbec");
        assert_eq!(row[1], "Catena Zapata");
        assert_eq!(row[2], "Malbec, Cabernet Franc");
        assert_eq!(row[3], "70% Malbec");
        assert_eq!(row[4], "Tinto");
        assert_eq!(row[5], NOT_AVAILABLE);
        assert_eq!(row[6], NOT_AVAILABLE);
        assert_eq!(row[7], "");
    }

    #[test]
    fn discount_rounds_to_whole_percent() {
        let record = WineRecord::from_parts(
            stub(Some("$3.000,00"), Some("$2.000,00")),
            DetailAttributes::default(),
        );
        assert_eq!(record.discount_display(), "33%");
    }
}
