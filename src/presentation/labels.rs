//! Localized status labels

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::state::TimeEntryStatus;

/// Languages the status labels are available in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
}

/// Human readable label for a status. `None` means no run yet and renders the
/// "not started" placeholder.
pub fn status_label(status: Option<TimeEntryStatus>, locale: Locale) -> &'static str {
    let status = status.unwrap_or(TimeEntryStatus::NotStarted);

    match locale {
        Locale::En => match status {
            TimeEntryStatus::NotStarted => "Not started",
            TimeEntryStatus::InProgress => "In progress",
            TimeEntryStatus::Completed => "Completed",
            TimeEntryStatus::Interrupted => "Interrupted",
            TimeEntryStatus::Abandoned => "Abandoned",
            TimeEntryStatus::Extended => "Extended",
        },
        Locale::Es => match status {
            TimeEntryStatus::NotStarted => "Sin empezar",
            TimeEntryStatus::InProgress => "En curso",
            TimeEntryStatus::Completed => "Completado",
            TimeEntryStatus::Interrupted => "Interrumpido",
            TimeEntryStatus::Abandoned => "Abandonado",
            TimeEntryStatus::Extended => "Extendido",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_status_uses_placeholder() {
        assert_eq!(status_label(None, Locale::En), "Not started");
        assert_eq!(status_label(None, Locale::Es), "Sin empezar");
    }

    #[test]
    fn labels_follow_locale() {
        assert_eq!(status_label(Some(TimeEntryStatus::InProgress), Locale::En), "In progress");
        assert_eq!(status_label(Some(TimeEntryStatus::Abandoned), Locale::Es), "Abandonado");
    }
}
