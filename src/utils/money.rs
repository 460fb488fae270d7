//! Formato de importes en euros
//!
//! Los importes viajan como números planos; para mostrarlos se usa el formato
//! el-GR: separador de miles `.`, decimales `,` y dos cifras (`1.234,56 €`).

use rust_decimal::{Decimal, RoundingStrategy};

pub const CURRENCY_SYMBOL: &str = "€";
const DECIMAL_SEPARATOR: char = ',';
const GROUPING_SEPARATOR: char = '.';

/// Redondeo a céntimos, mitad hacia arriba
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formatear un importe como moneda local
pub fn format_currency(amount: Decimal) -> String {
    format!("{} {}", format_amount(amount), CURRENCY_SYMBOL)
}

/// Formatear un importe sin símbolo, con agrupación de miles
pub fn format_amount(amount: Decimal) -> String {
    let rounded = round_money(amount);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let plain = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut out = String::with_capacity(plain.len() + plain.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    out.push_str(&group_digits(int_part));
    out.push(DECIMAL_SEPARATOR);
    out.push_str(frac_part);
    out
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            grouped.push(GROUPING_SEPARATOR);
        }
        grouped.push(ch);
    }
    grouped
}
