//! Message catalog for report and availability strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;
use crate::ids::TableCode;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    It,
    #[default]
    En,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::It => "it",
            Locale::En => "en",
        }
    }

    /// Looks up the template for `key`.
    pub fn template(self, key: MessageKey) -> &'static str {
        match (self, key) {
            (Locale::En, MessageKey::TableMissing) => "Table {table}: Missing {missing} CFU",
            (Locale::It, MessageKey::TableMissing) => "Tabella {table}: Mancano {missing} CFU",
            (Locale::En, MessageKey::SumMissing) => {
                "Sum of tables {tables} insufficient: missing {missing} CFU"
            }
            (Locale::It, MessageKey::SumMissing) => {
                "Somma delle tabelle {tables} insufficiente: mancano {missing} CFU"
            }
            (Locale::En, MessageKey::MandatoryIncomplete) => "Mandatory: Plan incomplete",
            (Locale::It, MessageKey::MandatoryIncomplete) => "Obbligatori: Piano incompleto",
            (Locale::En, MessageKey::TotalStatus) => "Total: {current}/{min} CFU",
            (Locale::It, MessageKey::TotalStatus) => "Totale: {current}/{min} CFU",
            (Locale::En, MessageKey::AvailableFrom) => "Available from {date}",
            (Locale::It, MessageKey::AvailableFrom) => "Disponibile dal {date}",
            (Locale::En, MessageKey::NextActivationEven) => {
                "Next activation: Even Years (e.g. {example})"
            }
            (Locale::It, MessageKey::NextActivationEven) => {
                "Prossima attivazione: Anni Pari (es. {example})"
            }
            (Locale::En, MessageKey::NextActivationOdd) => {
                "Next activation: Odd Years (e.g. {example})"
            }
            (Locale::It, MessageKey::NextActivationOdd) => {
                "Prossima attivazione: Anni Dispari (es. {example})"
            }
        }
    }

    /// Renders `key` substituting every `{name}` placeholder found in `params`.
    ///
    /// Placeholders without a matching parameter are left as they are.
    pub fn render(self, key: MessageKey, params: &[(&str, &str)]) -> String {
        params
            .iter()
            .fold(self.template(key).to_string(), |text, (name, value)| {
                text.replace(&format!("{{{name}}}"), value)
            })
    }

    /// Display label of a table.
    pub fn table_label(self, table: &TableCode) -> &str {
        match (self, table) {
            (Locale::En, TableCode::Mandatory) => "Mandatory",
            (Locale::En, TableCode::FreeElective) => "Optional",
            (Locale::En, TableCode::Overflow) => "Out of Plan",
            (Locale::It, TableCode::Mandatory) => "Obbligatori",
            (Locale::It, TableCode::FreeElective) => "Facoltativi",
            (Locale::It, TableCode::Overflow) => "Fuori Piano",
            (_, TableCode::Core(code)) => code,
        }
    }

    /// Joins table codes for the sum message, e.g. `B and C`.
    pub fn join_tables(self, tables: &[TableCode]) -> String {
        let conjunction = match self {
            Locale::It => " e ",
            Locale::En => " and ",
        };
        match tables {
            [] => String::new(),
            [only] => only.as_str().to_string(),
            [head @ .., last] => {
                let head: Vec<&str> = head.iter().map(TableCode::as_str).collect();
                format!("{}{conjunction}{}", head.join(", "), last.as_str())
            }
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "it" | "ita" | "italian" => Ok(Locale::It),
            "en" | "eng" | "english" => Ok(Locale::En),
            _ => Err(ModelError::UnknownLocale(s.to_string())),
        }
    }
}

/// Keys of the translatable strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    /// Params: `table`, `missing`.
    TableMissing,
    /// Params: `tables`, `missing`.
    SumMissing,
    MandatoryIncomplete,
    /// Params: `current`, `min`.
    TotalStatus,
    /// Params: `date`.
    AvailableFrom,
    /// Params: `example`.
    NextActivationEven,
    /// Params: `example`.
    NextActivationOdd,
}
