//! Price drop detection

use crate::shared::types::Storefront;
use super::StorefrontPrices;

/// Lowest known price, treating `None` as positive infinity
pub fn lowest_price(prices: &[Option<f64>]) -> f64 {
    prices
        .iter()
        .map(|p| p.unwrap_or(f64::INFINITY))
        .fold(f64::INFINITY, f64::min)
}

/// Storefront whose current price undercuts every other current price and
/// every previously recorded price.
///
/// Storefronts are checked in priority order (Steam, Nuuvem, GreenManGaming)
/// and only the first match is reported, so a cycle yields at most one drop.
pub fn find_price_drop(previous: &StorefrontPrices, current: &StorefrontPrices) -> Option<Storefront> {
    Storefront::ALL
        .into_iter()
        .find(|storefront| is_lowest(*storefront, previous, current))
}

fn is_lowest(storefront: Storefront, previous: &StorefrontPrices, current: &StorefrontPrices) -> bool {
    // An unknown price, now or before, can never be declared lower
    let (Some(price), Some(_)) = (current.get(storefront), previous.get(storefront)) else {
        return false;
    };

    let other_current: Vec<Option<f64>> = Storefront::ALL
        .into_iter()
        .filter(|other| *other != storefront)
        .map(|other| current.get(other))
        .collect();
    let all_previous = [
        Some(previous.steam),
        previous.nuuvem,
        previous.green_man_gaming,
    ];

    price < lowest_price(&other_current) && price < lowest_price(&all_previous)
}
