use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Catalog fields whose correct value changes over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DynamicField {
    President,
    VicePresident,
    SpeakerOfHouse,
    ChiefJustice,
    NumberOfJustices,
    PresidentParty,
    Senator,
    Representative,
    Governor,
    StateCapital,
}

impl DynamicField {
    pub const ALL: [DynamicField; 10] = [
        DynamicField::President,
        DynamicField::VicePresident,
        DynamicField::SpeakerOfHouse,
        DynamicField::ChiefJustice,
        DynamicField::NumberOfJustices,
        DynamicField::PresidentParty,
        DynamicField::Senator,
        DynamicField::Representative,
        DynamicField::Governor,
        DynamicField::StateCapital,
    ];

    /// Stable key used in catalog sources and persisted settings.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            DynamicField::President => "president",
            DynamicField::VicePresident => "vicePresident",
            DynamicField::SpeakerOfHouse => "speakerOfHouse",
            DynamicField::ChiefJustice => "chiefJustice",
            DynamicField::NumberOfJustices => "numberOfJustices",
            DynamicField::PresidentParty => "presidentParty",
            DynamicField::Senator => "senator",
            DynamicField::Representative => "representative",
            DynamicField::Governor => "governor",
            DynamicField::StateCapital => "stateCapital",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    /// Human-readable label for settings forms.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            DynamicField::President => "President of the United States",
            DynamicField::VicePresident => "Vice President of the United States",
            DynamicField::SpeakerOfHouse => "Speaker of the House",
            DynamicField::ChiefJustice => "Chief Justice of the United States",
            DynamicField::NumberOfJustices => "Number of Supreme Court Justices",
            DynamicField::PresidentParty => "Political Party of the President",
            DynamicField::Senator => "Your State's U.S. Senator(s)",
            DynamicField::Representative => "Your U.S. Representative",
            DynamicField::Governor => "Your State's Governor",
            DynamicField::StateCapital => "Your State's Capital",
        }
    }

    fn default_value(self) -> &'static str {
        match self {
            DynamicField::President => "Donald Trump",
            DynamicField::VicePresident => "JD Vance",
            DynamicField::SpeakerOfHouse => "Mike Johnson",
            DynamicField::ChiefJustice => "John Roberts",
            DynamicField::NumberOfJustices => "nine (9)",
            DynamicField::PresidentParty => "Republican",
            DynamicField::Senator => "Charles \"Chuck\" Schumer, Kirsten Gillibrand",
            DynamicField::Representative => "Jerrold Nadler",
            DynamicField::Governor => "Kathy Hochul",
            DynamicField::StateCapital => "Albany, NY",
        }
    }
}

impl fmt::Display for DynamicField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Current values for every dynamic field.
///
/// Always holds an entry per field; a value may be set to the empty string,
/// in which case resolution falls back to the catalog's static answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicAnswers {
    values: BTreeMap<DynamicField, String>,
}

impl DynamicAnswers {
    /// Start from the defaults and override the given fields.
    #[must_use]
    pub fn from_partial(overrides: impl IntoIterator<Item = (DynamicField, String)>) -> Self {
        let mut answers = Self::default();
        answers.update(overrides);
        answers
    }

    #[must_use]
    pub fn get(&self, field: DynamicField) -> &str {
        self.values.get(&field).map_or("", String::as_str)
    }

    pub fn set(&mut self, field: DynamicField, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Merge the given values, leaving other fields untouched.
    pub fn update(&mut self, values: impl IntoIterator<Item = (DynamicField, String)>) {
        for (field, value) in values {
            self.set(field, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (DynamicField, &str)> {
        self.values.iter().map(|(field, value)| (*field, value.as_str()))
    }
}

impl Default for DynamicAnswers {
    fn default() -> Self {
        Self {
            values: DynamicField::ALL
                .into_iter()
                .map(|field| (field, field.default_value().to_string()))
                .collect(),
        }
    }
}
