// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Amount in words — formal Arabic numerals as written on bank checks.
//
// Expansion is recursive by magnitude (millions, thousands, hundreds, tens,
// teens, ones).  Each magnitude has singular, dual, and plural forms; counts
// of 3 to 10 take the plural, larger counts revert to the singular word.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Appended by issuance after the expanded amount.
pub const CURRENCY_SUFFIX: &str = "جنيه سوداني";

/// Joins a magnitude to the expansion of its remainder.
const CONJUNCTION: &str = "و";

const ZERO: &str = "صفر";

const ONES: [&str; 10] = [
    "", "واحد", "اثنان", "ثلاثة", "أربعة", "خمسة", "ستة", "سبعة", "ثمانية", "تسعة",
];

const TEENS: [&str; 10] = [
    "عشرة",
    "أحد عشر",
    "اثنا عشر",
    "ثلاثة عشر",
    "أربعة عشر",
    "خمسة عشر",
    "ستة عشر",
    "سبعة عشر",
    "ثمانية عشر",
    "تسعة عشر",
];

const TENS: [&str; 10] = [
    "", "", "عشرون", "ثلاثون", "أربعون", "خمسون", "ستون", "سبعون", "ثمانون", "تسعون",
];

const HUNDREDS: [&str; 10] = [
    "", "مائة", "مائتان", "ثلاثمائة", "أربعمائة", "خمسمائة", "ستمائة", "سبعمائة", "ثمانمائة",
    "تسعمائة",
];

/// Singular, dual, and plural forms of a magnitude word.
struct Magnitude {
    value: u64,
    singular: &'static str,
    dual: &'static str,
    plural: &'static str,
}

const MILLION: Magnitude = Magnitude {
    value: 1_000_000,
    singular: "مليون",
    dual: "مليونان",
    plural: "ملايين",
};

const THOUSAND: Magnitude = Magnitude {
    value: 1_000,
    singular: "ألف",
    dual: "ألفان",
    plural: "آلاف",
};

/// Expand a whole number into formal Arabic words.
///
/// ```
/// use echeque_core::numerals::to_words;
///
/// assert_eq!(to_words(0), "صفر");
/// assert_eq!(to_words(1500), "ألف وخمسمائة");
/// ```
pub fn to_words(n: u64) -> String {
    if n == 0 {
        return ZERO.to_owned();
    }
    let mut out = String::new();
    expand(n, &mut out);
    out
}

/// Expand the whole part of `amount`.
///
/// Fractional subunits are truncated, not rounded and not spelled out:
/// `99.99` reads as ninety-nine.  Returns `None` for negative amounts or
/// whole parts beyond `u64`.
pub fn amount_to_words(amount: Decimal) -> Option<String> {
    amount.floor().to_u64().map(to_words)
}

/// Words followed by the currency name, e.g. `ألف جنيه سوداني`.
pub fn with_currency(words: &str, currency: &str) -> String {
    format!("{words} {currency}")
}

fn expand(n: u64, out: &mut String) {
    if n >= MILLION.value {
        expand_magnitude(n, &MILLION, out);
    } else if n >= THOUSAND.value {
        expand_magnitude(n, &THOUSAND, out);
    } else if n >= 100 {
        out.push_str(HUNDREDS[(n / 100) as usize]);
        let rest = n % 100;
        if rest > 0 {
            out.push(' ');
            out.push_str(CONJUNCTION);
            expand(rest, out);
        }
    } else if n >= 20 {
        out.push_str(TENS[(n / 10) as usize]);
        let units = n % 10;
        if units > 0 {
            out.push(' ');
            out.push_str(CONJUNCTION);
            out.push_str(ONES[units as usize]);
        }
    } else if n >= 10 {
        out.push_str(TEENS[(n - 10) as usize]);
    } else {
        out.push_str(ONES[n as usize]);
    }
}

fn expand_magnitude(n: u64, magnitude: &Magnitude, out: &mut String) {
    let count = n / magnitude.value;
    match count {
        1 => out.push_str(magnitude.singular),
        2 => out.push_str(magnitude.dual),
        3..=10 => {
            expand(count, out);
            out.push(' ');
            out.push_str(magnitude.plural);
        }
        _ => {
            expand(count, out);
            out.push(' ');
            out.push_str(magnitude.singular);
        }
    }

    let rest = n % magnitude.value;
    if rest > 0 {
        out.push(' ');
        out.push_str(CONJUNCTION);
        expand(rest, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero() {
        assert_eq!(to_words(0), "صفر");
    }

    #[test]
    fn ones_and_teens() {
        assert_eq!(to_words(1), "واحد");
        assert_eq!(to_words(9), "تسعة");
        assert_eq!(to_words(10), "عشرة");
        assert_eq!(to_words(15), TEENS[5]);
        assert_eq!(to_words(19), "تسعة عشر");
    }

    #[test]
    fn tens_join_units_with_conjunction() {
        assert_eq!(to_words(20), "عشرون");
        assert_eq!(to_words(21), "عشرون وواحد");
        assert_eq!(to_words(99), "تسعون وتسعة");
    }

    #[test]
    fn hundreds_use_table_and_dual() {
        assert_eq!(to_words(100), HUNDREDS[1]);
        assert_eq!(to_words(200), "مائتان");
        assert_eq!(to_words(305), "ثلاثمائة وخمسة");
        assert_eq!(to_words(999), "تسعمائة وتسعون وتسعة");
    }

    #[test]
    fn thousands_singular_dual_plural() {
        assert_eq!(to_words(1000), "ألف");
        assert_eq!(to_words(1500), "ألف وخمسمائة");
        assert_eq!(to_words(2000), "ألفان");
        assert_eq!(to_words(3000), "ثلاثة آلاف");
        assert_eq!(to_words(10_000), "عشرة آلاف");
        assert_eq!(to_words(11_000), "أحد عشر ألف");
        assert_eq!(to_words(500_000), "خمسمائة ألف");
    }

    #[test]
    fn millions() {
        assert_eq!(to_words(1_000_000), "مليون");
        assert_eq!(to_words(2_500_000), "مليونان وخمسمائة ألف");
        assert_eq!(to_words(7_000_000), "سبعة ملايين");
        assert_eq!(to_words(25_000_000), "عشرون وخمسة مليون");
        assert_eq!(to_words(1_001_000), "مليون وألف");
        assert_eq!(to_words(1_000_000_000), "ألف مليون");
        assert_eq!(to_words(2_000_000_000), "ألفان مليون");
        assert_eq!(to_words(1_500_000_001), "ألف وخمسمائة مليون وواحد");
    }

    #[test]
    fn no_stray_whitespace() {
        for n in [1_000, 3_000, 1_000_000, 1_000_000_000, 3_000_000_000, 12_000_000_000] {
            let words = to_words(n);
            assert_eq!(words.trim(), words, "{n}");
            assert!(!words.contains("  "), "{n}: {words:?}");
        }
    }

    #[test]
    fn amount_fraction_is_truncated() {
        let amount: Decimal = "1500.99".parse().unwrap();
        assert_eq!(amount_to_words(amount).unwrap(), "ألف وخمسمائة");
    }

    #[test]
    fn negative_amount_has_no_words() {
        let amount: Decimal = "-1".parse().unwrap();
        assert_eq!(amount_to_words(amount), None);
    }

    #[test]
    fn currency_is_appended_with_single_space() {
        assert_eq!(
            with_currency(&to_words(1000), CURRENCY_SUFFIX),
            "ألف جنيه سوداني"
        );
    }
}
