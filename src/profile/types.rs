use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single athlete's raw measurement record.
///
/// Serialized field names (and their casing) are part of the persisted file
/// format: `MEC, TSER, TSIR, CMJ, mRSIp, mRSId, ghN, ghRFD, hN, hRFD, MTP,
/// Age`, each a JSON number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "MEC")]
    pub mec: f64,
    #[serde(rename = "TSER")]
    pub tser: f64,
    #[serde(rename = "TSIR")]
    pub tsir: f64,
    #[serde(rename = "CMJ")]
    pub cmj: f64,
    #[serde(rename = "mRSIp")]
    pub mrsi_p: f64,
    #[serde(rename = "mRSId")]
    pub mrsi_d: f64,
    #[serde(rename = "ghN")]
    pub gh_n: f64,
    #[serde(rename = "ghRFD")]
    pub gh_rfd: f64,
    #[serde(rename = "hN")]
    pub h_n: f64,
    #[serde(rename = "hRFD")]
    pub h_rfd: f64,
    #[serde(rename = "MTP")]
    pub mtp: f64,
    #[serde(rename = "Age")]
    pub age: u32,
    /// Keys beyond the twelve measurements. Preserved so that a load
    /// followed by a save does not silently drop them.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One of the twelve measurement fields, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Mec,
    Tser,
    Tsir,
    Cmj,
    MrsiP,
    MrsiD,
    GhN,
    GhRfd,
    HN,
    HRfd,
    Mtp,
    Age,
}

impl Field {
    pub const ALL: [Field; 12] = [
        Field::Mec,
        Field::Tser,
        Field::Tsir,
        Field::Cmj,
        Field::MrsiP,
        Field::MrsiD,
        Field::GhN,
        Field::GhRfd,
        Field::HN,
        Field::HRfd,
        Field::Mtp,
        Field::Age,
    ];

    /// The persisted JSON key for this field.
    pub fn key(self) -> &'static str {
        match self {
            Field::Mec => "MEC",
            Field::Tser => "TSER",
            Field::Tsir => "TSIR",
            Field::Cmj => "CMJ",
            Field::MrsiP => "mRSIp",
            Field::MrsiD => "mRSId",
            Field::GhN => "ghN",
            Field::GhRfd => "ghRFD",
            Field::HN => "hN",
            Field::HRfd => "hRFD",
            Field::Mtp => "MTP",
            Field::Age => "Age",
        }
    }

    /// Human-readable caption shown next to the input field.
    pub fn caption(self) -> &'static str {
        match self {
            Field::Mec => "Mechanical Score (0 to 1)",
            Field::Tser => "TrueStrength ER",
            Field::Tsir => "TrueStrength IR",
            Field::Cmj => "Counter Movement Jump",
            Field::MrsiP => "Modified Reactive Strength Index - Positive",
            Field::MrsiD => "Modified Reactive Strength Index - Drop",
            Field::GhN => "Glenohumeral Neutral",
            Field::GhRfd => "Glenohumeral Rate of Force Development",
            Field::HN => "Hip Neutral",
            Field::HRfd => "Hip Rate of Force Development",
            Field::Mtp => "Maximal Torque Production",
            Field::Age => "Age of the individual",
        }
    }

    /// Age is the only integer-valued field.
    pub fn is_integer(self) -> bool {
        matches!(self, Field::Age)
    }
}

impl Profile {
    /// Format a field's value the way the form displays it.
    pub fn display_value(&self, field: Field) -> String {
        if field == Field::Age {
            return self.age.to_string();
        }
        format!("{}", self.value(field))
    }

    /// The field's value as a float (Age widened from its integer type).
    pub fn value(&self, field: Field) -> f64 {
        match field {
            Field::Mec => self.mec,
            Field::Tser => self.tser,
            Field::Tsir => self.tsir,
            Field::Cmj => self.cmj,
            Field::MrsiP => self.mrsi_p,
            Field::MrsiD => self.mrsi_d,
            Field::GhN => self.gh_n,
            Field::GhRfd => self.gh_rfd,
            Field::HN => self.h_n,
            Field::HRfd => self.h_rfd,
            Field::Mtp => self.mtp,
            Field::Age => f64::from(self.age),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Profile {
        Profile {
            mec: 0.5,
            tser: 50.0,
            tsir: 50.0,
            cmj: 30.0,
            mrsi_p: 1.0,
            mrsi_d: 1.0,
            gh_n: 100.0,
            gh_rfd: 200.0,
            h_n: 150.0,
            h_rfd: 250.0,
            mtp: 40.0,
            age: 25,
            extra: Map::new(),
        }
    }

    #[test]
    fn test_serialized_keys_match_contract() {
        let json = serde_json::to_value(sample()).unwrap();
        let obj = json.as_object().unwrap();
        for field in Field::ALL {
            assert!(obj.contains_key(field.key()), "missing key {}", field.key());
        }
        assert_eq!(obj.len(), 12);
    }

    #[test]
    fn test_age_serializes_as_integer() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["Age"], serde_json::json!(25));
    }

    #[test]
    fn test_extra_keys_flatten() {
        let mut profile = sample();
        profile
            .extra
            .insert("Notes".to_string(), Value::String("preseason".to_string()));
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["Notes"], "preseason");

        let back: Profile = serde_json::from_value(json).unwrap();
        assert_eq!(back, profile);
    }

    #[test]
    fn test_display_value_age_is_integer() {
        let profile = sample();
        assert_eq!(profile.display_value(Field::Age), "25");
        assert_eq!(profile.display_value(Field::Mec), "0.5");
    }
}
