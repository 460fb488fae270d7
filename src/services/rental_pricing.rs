//! Motor de precios de alquiler
//!
//! `total = ceil(días) × tarifa diaria`, redondeado a 2 decimales. El total
//! calculado es sólo un valor por defecto: en cuanto el operador lo edita
//! pasa a `Manual` y ningún cambio de fechas o tarifa lo sobrescribe.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::rental::Rental;
use crate::utils::dates::days_between_ceil;
use crate::utils::money::round_money;

/// Tarifa diaria por defecto (EUR)
pub const DEFAULT_DAILY_RATE: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

/// Días facturables entre dos fechas; cualquier fracción cuenta como día completo
pub fn rental_days(start: NaiveDate, end: NaiveDate) -> i64 {
    match (start.and_hms_opt(0, 0, 0), end.and_hms_opt(0, 0, 0)) {
        (Some(start), Some(end)) => days_between_ceil(start, end),
        _ => 0,
    }
}

/// Calcular el coste de un alquiler.
///
/// Devuelve 0 si falta alguna fecha o si `end <= start`: el llamador debe
/// interpretarlo como "no listo para enviar", no como alquiler gratuito.
pub fn calculate_rental_cost(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    daily_rate: Decimal,
) -> Decimal {
    let (Some(start), Some(end)) = (start, end) else {
        return Decimal::ZERO;
    };
    if end <= start {
        return Decimal::ZERO;
    }
    let days = rental_days(start, end);
    if days <= 0 {
        return Decimal::ZERO;
    }
    round_money(Decimal::from(days) * daily_rate)
}

/// Tarifa efectiva: valores ausentes o no positivos vuelven a la tarifa por defecto
pub fn effective_daily_rate(rate: Option<Decimal>, default_rate: Decimal) -> Decimal {
    rate.filter(|r| *r > Decimal::ZERO).unwrap_or(default_rate)
}

/// Interpretar la tarifa tecleada por el operador (acepta coma decimal)
pub fn parse_daily_rate(raw: &str, default_rate: Decimal) -> Decimal {
    let normalized = raw.trim().replace(',', ".");
    effective_daily_rate(normalized.parse::<Decimal>().ok(), default_rate)
}

/// Origen de un valor derivado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceSource {
    /// Se recalcula con cada cambio de sus entradas
    #[default]
    Auto,
    /// Editado por el operador; nunca se recalcula
    Manual,
}

/// Campo de precio derivado con su etiqueta `Auto`/`Manual`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DerivedPrice {
    value: Option<Decimal>,
    source: PriceSource,
}

impl DerivedPrice {
    pub fn auto(value: Option<Decimal>) -> Self {
        Self {
            value,
            source: PriceSource::Auto,
        }
    }

    pub fn manual(value: Option<Decimal>) -> Self {
        Self {
            value,
            source: PriceSource::Manual,
        }
    }

    pub fn value(&self) -> Option<Decimal> {
        self.value
    }

    pub fn source(&self) -> PriceSource {
        self.source
    }

    pub fn is_manual(&self) -> bool {
        self.source == PriceSource::Manual
    }

    /// Aplicar un valor recalculado; se ignora si el campo es `Manual`
    pub fn recompute(&mut self, computed: Option<Decimal>) -> bool {
        if self.is_manual() {
            return false;
        }
        self.value = computed;
        true
    }

    /// Edición directa del operador
    pub fn set_manual(&mut self, value: Option<Decimal>) {
        self.value = value;
        self.source = PriceSource::Manual;
    }

    /// Volver a `Auto` con el valor calculado actual
    pub fn reset(&mut self, computed: Option<Decimal>) {
        self.source = PriceSource::Auto;
        self.value = computed;
    }
}

/// Estado de precio de un formulario de alquiler
#[derive(Debug, Clone, PartialEq)]
pub struct RentalPricing {
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    daily_rate: Decimal,
    default_rate: Decimal,
    total: DerivedPrice,
}

impl RentalPricing {
    pub fn new(default_rate: Decimal) -> Self {
        let default_rate = effective_daily_rate(Some(default_rate), DEFAULT_DAILY_RATE);
        Self {
            start_date: None,
            end_date: None,
            daily_rate: default_rate,
            default_rate,
            total: DerivedPrice::default(),
        }
    }

    /// Estado para editar un alquiler existente.
    ///
    /// El total guardado en el backend se trata como `Manual`, de modo que
    /// reenviar el formulario sin tocarlo no altera el alquiler.
    pub fn for_rental(rental: &Rental, default_rate: Decimal) -> Self {
        let mut pricing = Self::new(default_rate);
        pricing.start_date = Some(rental.start_date);
        pricing.end_date = Some(rental.end_date);
        pricing.total = match rental.total_price {
            Some(total) => DerivedPrice::manual(Some(total)),
            None => DerivedPrice::auto(pricing.computed_total()),
        };
        pricing
    }

    fn computed_total(&self) -> Option<Decimal> {
        match (self.start_date, self.end_date) {
            (Some(_), Some(_)) => Some(calculate_rental_cost(
                self.start_date,
                self.end_date,
                self.daily_rate,
            )),
            _ => None,
        }
    }

    fn refresh(&mut self) {
        let computed = self.computed_total();
        self.total.recompute(computed);
    }

    pub fn set_start_date(&mut self, date: Option<NaiveDate>) {
        self.start_date = date;
        self.refresh();
    }

    pub fn set_end_date(&mut self, date: Option<NaiveDate>) {
        self.end_date = date;
        self.refresh();
    }

    /// Cambiar la tarifa; valores no positivos vuelven a la tarifa por defecto
    pub fn set_daily_rate(&mut self, rate: Option<Decimal>) {
        self.daily_rate = effective_daily_rate(rate, self.default_rate);
        self.refresh();
    }

    /// El operador escribe el total a mano
    pub fn override_total(&mut self, total: Option<Decimal>) {
        self.total.set_manual(total);
    }

    pub fn reset_total(&mut self) {
        let computed = self.computed_total();
        self.total.reset(computed);
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn daily_rate(&self) -> Decimal {
        self.daily_rate
    }

    pub fn total(&self) -> Option<Decimal> {
        self.total.value()
    }

    pub fn total_source(&self) -> PriceSource {
        self.total.source()
    }

    /// Total a enviar: un total vacío se envía como 0
    pub fn submission_total(&self) -> Decimal {
        self.total().unwrap_or(Decimal::ZERO)
    }

    /// Días facturables, sólo si el rango es válido
    pub fn days(&self) -> Option<i64> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if end > start => Some(rental_days(start, end)),
            _ => None,
        }
    }

    /// Ambas fechas presentes y `end > start`
    pub fn is_ready(&self) -> bool {
        self.days().is_some()
    }
}
