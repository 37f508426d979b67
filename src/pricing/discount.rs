/// Price after applying a percentage discount.
///
/// A zero discount returns `base_price` untouched. Otherwise the result is
/// rounded half-up to a whole display unit using integer arithmetic only.
/// Percentages above 100 are treated as 100.
pub fn final_price(base_price: u64, discount_percentage: u8) -> u64 {
    if discount_percentage == 0 {
        return base_price;
    }

    let pct = u128::from(discount_percentage.min(100));
    let discounted = (u128::from(base_price) * (100 - pct) + 50) / 100;
    // Never above base_price, so it fits back into u64
    u64::try_from(discounted).unwrap_or(base_price)
}

/// Display amount to minor units (all catalog currencies have two decimals).
/// `None` when the result does not fit in a `u64`.
pub fn to_minor_units(display_amount: u64) -> Option<u64> {
    display_amount.checked_mul(100)
}
