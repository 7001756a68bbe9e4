use anyhow::{format_err, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Network is the snapshot of substations a study exposes once its
/// network becomes available. It is never mutated: a new network
/// replaces the whole snapshot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Network {
    /// Substations in provider order.
    substations: Vec<Substation>,
}

/// Substation is a group of voltage levels located at one site.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Substation {
    /// Unique substation identifier.
    #[serde(default)]
    pub id: String,

    /// Human readable name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Country the substation is located in, shown next to the label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_name: Option<String>,

    #[serde(default)]
    pub voltage_levels: Vec<VoltageLevel>,
}

/// VoltageLevel is a set of equipment inside a substation sharing
/// the same nominal voltage.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoltageLevel {
    /// Identifier, unique within the owning substation.
    #[serde(default)]
    pub id: String,

    /// Human readable name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Nominal voltage (kV).
    #[serde(default)]
    pub nominal_voltage: f64,
}

impl Substation {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_country(mut self, country_name: impl Into<String>) -> Self {
        self.country_name = Some(country_name.into());
        self
    }

    pub fn with_voltage_level(mut self, voltage_level: VoltageLevel) -> Self {
        self.voltage_levels.push(voltage_level);
        self
    }
}

impl VoltageLevel {
    pub fn new(id: impl Into<String>, nominal_voltage: f64) -> Self {
        Self {
            id: id.into(),
            name: None,
            nominal_voltage,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl Network {
    /// Validates and wraps a substation collection.
    ///
    /// The whole collection is rejected if any substation or voltage level
    /// has an empty id, if two substations share an id or if two voltage
    /// levels of the same substation share an id. Row keys rely on these.
    pub fn new(substations: Vec<Substation>) -> Result<Self> {
        let mut substation_ids = HashSet::with_capacity(substations.len());
        for (i, s) in substations.iter().enumerate() {
            if s.id.is_empty() {
                return Err(format_err!("substation at position {} has no id", i));
            }
            if !substation_ids.insert(s.id.as_str()) {
                return Err(format_err!("duplicate substation id: {}", s.id));
            }

            let mut vl_ids = HashSet::with_capacity(s.voltage_levels.len());
            for (j, vl) in s.voltage_levels.iter().enumerate() {
                if vl.id.is_empty() {
                    return Err(format_err!(
                        "voltage level at position {} of substation {} has no id",
                        j,
                        s.id
                    ));
                }
                if !vl_ids.insert(vl.id.as_str()) {
                    return Err(format_err!(
                        "duplicate voltage level id {} in substation {}",
                        vl.id,
                        s.id
                    ));
                }
            }
        }
        Ok(Self { substations })
    }

    /// Decodes a JSON array of substations and validates it.
    pub fn from_json(json: &str) -> Result<Self> {
        let substations: Vec<Substation> = serde_json::from_str(json)?;
        Self::new(substations)
    }

    pub fn substations(&self) -> &[Substation] {
        &self.substations
    }

    pub fn is_empty(&self) -> bool {
        self.substations.is_empty()
    }

    /// Total number of voltage levels across all substations.
    pub fn voltage_level_count(&self) -> usize {
        self.substations
            .iter()
            .map(|s| s.voltage_levels.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_from_json() -> Result<()> {
        let network = Network::from_json(
            r#"[
                {"id": "S1", "name": "Paris", "countryName": "France",
                 "voltageLevels": [{"id": "VL1", "name": "Paris 400", "nominalVoltage": 400}]},
                {"id": "S2", "voltageLevels": []}
            ]"#,
        )?;

        assert_eq!(network.substations().len(), 2);
        assert_eq!(network.voltage_level_count(), 1);

        let s1 = &network.substations()[0];
        assert_eq!(s1.id, "S1");
        assert_eq!(s1.name.as_deref(), Some("Paris"));
        assert_eq!(s1.country_name.as_deref(), Some("France"));
        assert_eq!(s1.voltage_levels[0].nominal_voltage, 400.0);

        let s2 = &network.substations()[1];
        assert_eq!(s2.id, "S2");
        assert_eq!(s2.name, None);
        Ok(())
    }

    #[test]
    fn test_missing_substation_id() {
        let err = Network::from_json(r#"[{"id": "S1"}, {"name": "nameless"}]"#).unwrap_err();
        assert_eq!(err.to_string(), "substation at position 1 has no id");
    }

    #[test]
    fn test_missing_voltage_level_id() {
        let err = Network::new(vec![Substation::new("S1")
            .with_voltage_level(VoltageLevel::new("VL1", 225.0))
            .with_voltage_level(VoltageLevel::new("", 63.0))])
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "voltage level at position 1 of substation S1 has no id"
        );
    }

    #[test]
    fn test_duplicate_ids() {
        let err = Network::new(vec![Substation::new("S1"), Substation::new("S1")]).unwrap_err();
        assert_eq!(err.to_string(), "duplicate substation id: S1");

        let err = Network::new(vec![Substation::new("S1")
            .with_voltage_level(VoltageLevel::new("VL", 400.0))
            .with_voltage_level(VoltageLevel::new("VL", 225.0))])
        .unwrap_err();
        assert_eq!(err.to_string(), "duplicate voltage level id VL in substation S1");
    }

    #[test]
    fn test_same_voltage_level_id_in_two_substations() -> Result<()> {
        let network = Network::new(vec![
            Substation::new("S1").with_voltage_level(VoltageLevel::new("VL", 400.0)),
            Substation::new("S2").with_voltage_level(VoltageLevel::new("VL", 400.0)),
        ])?;
        assert_eq!(network.voltage_level_count(), 2);
        Ok(())
    }

    #[test]
    fn test_empty_network() -> Result<()> {
        let network = Network::from_json("[]")?;
        assert!(network.is_empty());
        Ok(())
    }
}
