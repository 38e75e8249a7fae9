//! Typical power draw of common household appliances.

/// Predefined appliances and their typical running power (kW).
pub const APPLIANCES: &[(&str, f64)] = &[
    ("Electric stove", 2.0),
    ("Refrigerator", 0.15),
    ("Washing machine", 1.0),
    ("Air conditioner", 1.0),
    ("Microwave oven", 1.0),
    ("Television", 0.08),
    ("Dishwasher", 1.3),
    ("Clothes dryer", 3.0),
    ("Electric water heater", 4.0),
    ("Vacuum cleaner", 1.0),
    ("Electric iron", 1.5),
    ("Hair dryer", 2.0),
    ("Electric kettle", 2.0),
    ("Toaster", 1.0),
    ("Coffee maker", 0.9),
    ("Desktop computer", 0.25),
    ("Fan", 0.06),
    ("Electric heater", 2.0),
    ("Mixer/blender", 0.18),
    ("Deep fryer", 1.6),
    ("Electric blanket", 0.2),
    ("Game console", 0.15),
    ("Kitchen hood", 0.24),
    ("Laptop", 0.05),
    ("Phone charger", 0.01),
];

/// Power assumed for an appliance that is neither in the catalog nor given
/// an explicit rating.
pub const DEFAULT_POWER_KW: f64 = 1.0;

/// Returns the catalog power for `name`, ignoring ASCII case and surrounding
/// whitespace.
pub fn typical_power_kw(name: &str) -> Option<f64> {
    let name = name.trim();
    APPLIANCES
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, kw)| kw)
}
