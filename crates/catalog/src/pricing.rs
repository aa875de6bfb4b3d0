//! Sale price derivation.

use rust_decimal::Decimal;

use tamarind_core::DiscountPercent;

/// Derive the post-discount sale price from a base price.
///
/// `sale = price - price * discount / 100`, at `Decimal`'s native
/// precision. This is the only place a sale price is computed: product
/// creation and product update call it, and cart lines copy the result
/// rather than recomputing it.
#[must_use]
pub fn sale_price(price: Decimal, discount: DiscountPercent) -> Decimal {
    price - price * discount.fraction_off()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn percent(value: i64) -> DiscountPercent {
        DiscountPercent::new(Decimal::from(value)).unwrap()
    }

    #[test]
    fn test_ten_percent_off() {
        assert_eq!(
            sale_price(Decimal::from(1000), percent(10)),
            Decimal::from(900)
        );
    }

    #[test]
    fn test_zero_discount_is_identity() {
        assert_eq!(
            sale_price(Decimal::from(250), DiscountPercent::ZERO),
            Decimal::from(250)
        );
    }

    #[test]
    fn test_full_discount_is_free() {
        assert_eq!(
            sale_price(Decimal::from(42), percent(100)),
            Decimal::from(0)
        );
    }

    #[test]
    fn test_fractional_price_is_exact() {
        let price = Decimal::new(19_99, 2); // 19.99
        assert_eq!(sale_price(price, percent(5)), Decimal::new(18_9905, 4));
    }
}
