//! Plain-text explanation of a pricing result.

use crate::types::{PricedBond, PricingClass};

const RELATIONSHIP_NOTE: &str = "Key relationship: bond prices and yields move in opposite \
directions. When interest rates rise, bond prices fall, and vice versa.";

/// Describes why the bond trades at a premium, discount or par.
#[must_use]
pub fn explain(bond: &PricedBond) -> String {
    let coupon = percent(bond.coupon_rate);
    let market = percent(bond.market_yield);

    let reason = match bond.classification() {
        PricingClass::Premium => format!(
            "This bond is trading at a premium (above par value). The coupon rate ({coupon}) \
             is higher than the market yield ({market}), so investors pay more for the larger \
             interest payments."
        ),
        PricingClass::Discount => format!(
            "This bond is trading at a discount (below par value). The coupon rate ({coupon}) \
             is lower than the market yield ({market}), so the bond sells below face value to \
             match current market rates."
        ),
        PricingClass::Par => format!(
            "This bond is trading at par value. The coupon rate ({coupon}) equals the market \
             yield ({market}), so the price equals the face value."
        ),
    };

    format!("{reason}\n\n{RELATIONSHIP_NOTE}")
}

fn percent(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::price_bond;
    use crate::types::{BondTerms, BondType};

    #[test]
    fn test_premium_explanation() {
        let bond = price_bond(&BondTerms::new(1000.0, 0.05, 10.0, 0.045), BondType::Custom).unwrap();
        let text = explain(&bond);
        assert!(text.contains("premium"));
        assert!(text.contains("5.00%"));
        assert!(text.contains("4.50%"));
        assert!(text.ends_with("vice versa."));
    }

    #[test]
    fn test_discount_and_par_explanation() {
        let discount =
            price_bond(&BondTerms::new(1000.0, 0.04, 10.0, 0.05), BondType::Custom).unwrap();
        assert!(explain(&discount).contains("discount"));

        let mut par = discount.clone();
        par.price = par.face_value;
        assert!(explain(&par).contains("trading at par value"));
    }
}
