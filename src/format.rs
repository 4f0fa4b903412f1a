use rust_decimal::{Decimal, RoundingStrategy};

/// Zero-pad an identifier to `width` digits (`7` → `000007` for width 6).
pub fn format_id(id: u32, width: usize) -> String {
    format!("{id:0width$}")
}

#[derive(Clone, Debug, PartialEq)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub thousands_separator: char,
    pub decimal_separator: char,
    pub decimals: u32,
}

impl CurrencyFormat {
    pub fn brl() -> Self {
        Self {
            symbol: "R$".to_string(),
            thousands_separator: '.',
            decimal_separator: ',',
            decimals: 2,
        }
    }

    /// `1234.5` → `R$ 1.234,50`, `-3` → `-R$ 3,00`. Rounds half away from zero.
    pub fn format(&self, amount: Decimal) -> String {
        let rounded =
            amount.round_dp_with_strategy(self.decimals, RoundingStrategy::MidpointAwayFromZero);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();

        let plain = rounded.abs().to_string();
        let (whole, frac) = plain.split_once('.').unwrap_or((plain.as_str(), ""));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(self.thousands_separator);
            }
            grouped.push(ch);
        }

        let mut out = String::new();
        if negative {
            out.push('-');
        }
        out.push_str(&self.symbol);
        out.push(' ');
        out.push_str(&grouped);
        if self.decimals > 0 {
            out.push(self.decimal_separator);
            out.push_str(frac);
            // scale after rounding can be below `decimals` (e.g. 5.5, 3200)
            for _ in frac.len()..self.decimals as usize {
                out.push('0');
            }
        }
        out
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::brl()
    }
}
