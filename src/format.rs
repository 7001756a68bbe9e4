use crate::compare::{select_key, Identified};
use crate::network::{Substation, VoltageLevel};
use pretty_dtoa::{dtoa, FmtFloatConfig};

const FLOAT_CONFIG: FmtFloatConfig = FmtFloatConfig::default()
    .add_point_zero(false)
    .max_significant_digits(6);

/// Formats a voltage in kV, e.g. `400 kV` or `63.5 kV`.
pub fn format_kv(v: f64) -> String {
    format!("{} kV", dtoa(v, FLOAT_CONFIG))
}

/// Label of an explorer row: the selected field of the element.
pub fn format_label<T: Identified + ?Sized>(element: &T, use_name: bool) -> String {
    select_key(element, use_name).to_string()
}

/// Secondary text of a substation header: the country, if known.
pub fn substation_info(substation: &Substation) -> String {
    match substation.country_name.as_deref() {
        Some(country) if !country.is_empty() => format!(" \u{2014} {}", country),
        _ => String::new(),
    }
}

/// Secondary text of a voltage level row.
pub fn voltage_level_info(voltage_level: &VoltageLevel) -> String {
    format_kv(voltage_level.nominal_voltage)
}
