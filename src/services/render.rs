use std::fmt::Display;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{CatalogSnapshot, Product, RatingMap, WishlistSet};

/// Currency suffix appended to every price
pub const CURRENCY_SUFFIX: &str = "TL";

/// Number of star slots on every tile
pub const STAR_SLOTS: u8 = 5;

/// A price split the way the tile displays it: `1.234` and `56`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceText {
    pub integer: String,
    pub fraction: String,
}

impl PriceText {
    /// The amount without currency, e.g. `1.234,56`
    pub fn amount(&self) -> String {
        format!("{},{}", self.integer, self.fraction)
    }
}

impl Display for PriceText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{} {}", self.integer, self.fraction, CURRENCY_SUFFIX)
    }
}

/// Formats an amount with dot-grouped thousands and exactly two decimals
///
/// Rounds half away from zero.
pub fn format_price(amount: Decimal) -> PriceText {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    rounded = rounded.abs();
    rounded.rescale(2);

    let text = rounded.to_string();
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3 + 1);
    if negative {
        grouped.push('-');
    }
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    PriceText {
        integer: grouped,
        fraction: format!("{:0<2}", fraction),
    }
}

/// Whole-number discount of `price` against a higher `original`
///
/// `None` when `original` is zero, when `price` is above it, or when the
/// amounts are too large to divide exactly.
pub fn discount_percent(price: Decimal, original: Decimal) -> Option<u32> {
    let remaining = price.checked_div(original)?;
    Decimal::ONE
        .checked_sub(remaining)?
        .checked_mul(Decimal::ONE_HUNDRED)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceView {
    Standard(PriceText),
    Discounted {
        original: PriceText,
        current: PriceText,
        percent: u32,
    },
}

impl PriceView {
    /// Badge text such as `%20`, only for discounted prices
    pub fn badge(&self) -> Option<String> {
        match self {
            PriceView::Standard(_) => None,
            PriceView::Discounted { percent, .. } => Some(format!("%{}", percent)),
        }
    }

    /// The price the visitor pays
    pub fn current(&self) -> &PriceText {
        match self {
            PriceView::Standard(price) => price,
            PriceView::Discounted { current, .. } => current,
        }
    }
}

/// Everything a host needs to draw one product tile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileView {
    pub id: String,
    pub link: String,
    pub image: String,
    pub name: String,
    pub brand: String,
    pub price: PriceView,
    pub filled_stars: u8,
    pub wishlisted: bool,
}

impl TileView {
    /// Heading text, brand first
    pub fn heading(&self) -> String {
        format!("{} - {}", self.brand, self.name)
    }

    /// Fill state of each star slot, left to right
    pub fn star_slots(&self) -> [bool; STAR_SLOTS as usize] {
        std::array::from_fn(|i| (i as u8) < self.filled_stars)
    }
}

pub fn render_price(product: &Product) -> PriceView {
    let current = format_price(product.price);
    let discount = product
        .original_price
        .filter(|_| product.is_discounted())
        .and_then(|original| discount_percent(product.price, original).map(|p| (original, p)));

    match discount {
        Some((original, percent)) => PriceView::Discounted {
            original: format_price(original),
            current,
            percent,
        },
        None => PriceView::Standard(current),
    }
}

/// Builds the view for one product given the visitor's state
pub fn render_tile(product: &Product, wishlist: &WishlistSet, ratings: &RatingMap) -> TileView {
    TileView {
        id: product.id.clone(),
        link: product.url.clone().unwrap_or_else(|| "#".to_string()),
        image: product.image_url.clone().unwrap_or_default(),
        name: product.name.clone().unwrap_or_default(),
        brand: product.brand.clone().unwrap_or_default(),
        price: render_price(product),
        filled_stars: ratings.get(&product.id).map_or(0, |r| r.value()),
        wishlisted: wishlist.contains(&product.id),
    }
}

/// Builds every tile in catalog order
pub fn render_tiles(
    snapshot: &CatalogSnapshot,
    wishlist: &WishlistSet,
    ratings: &RatingMap,
) -> Vec<TileView> {
    snapshot
        .products()
        .iter()
        .map(|product| render_tile(product, wishlist, ratings))
        .collect()
}
