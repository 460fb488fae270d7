//! Utilidades de fechas
//!
//! Conteo de días entre fechas de calendario, rangos de agregación y
//! etiquetas de mes para las series temporales.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

const MILLIS_PER_DAY: i64 = 86_400_000;

const GREEK_MONTHS: [&str; 12] = [
    "Ιαν", "Φεβ", "Μαρ", "Απρ", "Μαΐ", "Ιουν", "Ιουλ", "Αυγ", "Σεπ", "Οκτ", "Νοε", "Δεκ",
];

/// Días entre dos instantes, redondeando hacia arriba cualquier fracción
pub fn days_between_ceil(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    let millis = (end - start).num_milliseconds();
    if millis <= 0 {
        return 0;
    }
    (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}

/// Rango de agregación [start, end], ambos incluidos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Últimos `months` meses hasta `today` (rango por defecto de la vista financiera)
    pub fn last_months(today: NaiveDate, months: u32) -> Self {
        let start = today
            .checked_sub_months(Months::new(months))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end: today }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }
}

/// Primer día del mes de la fecha dada
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Etiqueta corta de mes, p. ej. `Μαρ 2024`
pub fn month_label(month: NaiveDate) -> String {
    let idx = month.month0() as usize;
    format!("{} {}", GREEK_MONTHS[idx], month.year())
}

/// Interpreta `YYYY-MM-DD` o `YYYY-MM-DDTHH:MM:SS...` como fecha de calendario
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let date_part = value.trim().split('T').next()?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Serde para fechas del backend: se envía `YYYY-MM-DD`, se acepta también
/// una fecha con hora.
pub mod flexible_date {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_calendar_date(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid calendar date '{}'", raw)))
    }
}

/// Variante opcional de [`flexible_date`]; cadena vacía equivale a ausente
pub mod flexible_date_option {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => serializer.serialize_str(&date.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => super::parse_calendar_date(&raw)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid calendar date '{}'", raw))),
        }
    }
}
