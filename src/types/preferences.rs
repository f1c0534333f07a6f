use serde::{Deserialize, Serialize};

/// UI theme preference, persisted alongside the client configuration.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme.
    #[default]
    Light,

    /// Dark theme.
    Dark,
}

/// Interface language preference.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English.
    #[default]
    En,

    /// Russian.
    Ru,

    /// Kazakh.
    Kz,
}
