//! # Localization
//!
//! English/Spanish UI catalog.
//!
//! UI elements are addressed by a stable [`ElementId`] that maps to a
//! translation key. Labels are resolved once per render via [`Labels::resolve`];
//! nothing is looked up by matching on displayed text.

use crate::LabTrackError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// LANGUAGE
// =============================================================================

/// Supported UI languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
}

impl Language {
    /// Wire / config code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
        }
    }

    /// The other language.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Language::En => Language::Es,
            Language::Es => Language::En,
        }
    }

    fn catalog(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Language::En => EN,
            Language::Es => ES,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = LabTrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "es" => Ok(Language::Es),
            _ => Err(LabTrackError::UnknownLanguage(s.to_string())),
        }
    }
}

// =============================================================================
// LOOKUP
// =============================================================================

/// Translate `key`, falling back to the key itself.
#[must_use]
pub fn translate<'a>(language: Language, key: &'a str) -> &'a str {
    lookup(language, key).unwrap_or(key)
}

/// Translate `key`, or `None` if the catalog has no entry.
#[must_use]
pub fn lookup(language: Language, key: &str) -> Option<&'static str> {
    language
        .catalog()
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
}

/// Localized month name for `month` in 1..=12; empty for anything else.
#[must_use]
pub fn month_name(language: Language, month: u32) -> &'static str {
    let names = match language {
        Language::En => &MONTHS_EN,
        Language::Es => &MONTHS_ES,
    };
    (month as usize)
        .checked_sub(1)
        .and_then(|i| names.get(i))
        .copied()
        .unwrap_or("")
}

/// Localized two/three-letter weekday headers, Sunday first.
#[must_use]
pub fn weekday_headers(language: Language) -> &'static [&'static str; 7] {
    match language {
        Language::En => &["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
        Language::Es => &["Dom", "Lun", "Mar", "Mié", "Jue", "Vie", "Sáb"],
    }
}

// =============================================================================
// ELEMENT IDS
// =============================================================================

/// Stable identifiers for every translatable UI element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementId {
    MenuHome,
    MenuUploadDocument,
    MenuTemperatureTracking,
    MenuNewChat,
    MenuClearChat,
    MenuExportChat,
    MenuLogout,
    PageTitle,
    MonthlyViewButton,
    YearlyViewButton,
    ExportCsvButton,
    ReferenceRangesTitle,
    MonthlyComplianceTitle,
    OverallComplianceTitle,
    YearlyComplianceTitle,
    MonthlyBreakdownTitle,
    MonthColumn,
    ComplianceColumn,
    EntryFormTitle,
    RefrigeratorLabel,
    FreezerLabel,
    Ln2Label,
    RoomLabel,
    HumidityLabel,
    CorrectiveActionLabel,
    SubmitButton,
    CancelButton,
}

impl ElementId {
    pub const ALL: [ElementId; 27] = [
        ElementId::MenuHome,
        ElementId::MenuUploadDocument,
        ElementId::MenuTemperatureTracking,
        ElementId::MenuNewChat,
        ElementId::MenuClearChat,
        ElementId::MenuExportChat,
        ElementId::MenuLogout,
        ElementId::PageTitle,
        ElementId::MonthlyViewButton,
        ElementId::YearlyViewButton,
        ElementId::ExportCsvButton,
        ElementId::ReferenceRangesTitle,
        ElementId::MonthlyComplianceTitle,
        ElementId::OverallComplianceTitle,
        ElementId::YearlyComplianceTitle,
        ElementId::MonthlyBreakdownTitle,
        ElementId::MonthColumn,
        ElementId::ComplianceColumn,
        ElementId::EntryFormTitle,
        ElementId::RefrigeratorLabel,
        ElementId::FreezerLabel,
        ElementId::Ln2Label,
        ElementId::RoomLabel,
        ElementId::HumidityLabel,
        ElementId::CorrectiveActionLabel,
        ElementId::SubmitButton,
        ElementId::CancelButton,
    ];

    /// Translation key for this element.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            ElementId::MenuHome => "home",
            ElementId::MenuUploadDocument => "upload_document",
            ElementId::MenuTemperatureTracking => "temperature_tracking",
            ElementId::MenuNewChat => "new_chat",
            ElementId::MenuClearChat => "clear_chat",
            ElementId::MenuExportChat => "export_chat",
            ElementId::MenuLogout => "logout",
            ElementId::PageTitle => "lab_temperature_tracking",
            ElementId::MonthlyViewButton => "monthly_view",
            ElementId::YearlyViewButton => "yearly_summary",
            ElementId::ExportCsvButton => "export_csv",
            ElementId::ReferenceRangesTitle => "reference_ranges",
            ElementId::MonthlyComplianceTitle => "monthly_compliance",
            ElementId::OverallComplianceTitle => "overall_compliance",
            ElementId::YearlyComplianceTitle => "yearly_compliance_summary",
            ElementId::MonthlyBreakdownTitle => "monthly_breakdown",
            ElementId::MonthColumn => "month",
            ElementId::ComplianceColumn => "compliance_percentage",
            ElementId::EntryFormTitle => "temperature_recording",
            ElementId::RefrigeratorLabel => "refrigerator_temp",
            ElementId::FreezerLabel => "freezer_temp",
            ElementId::Ln2Label => "ln2_level_pct",
            ElementId::RoomLabel => "room_temp_c",
            ElementId::HumidityLabel => "humidity_pct",
            ElementId::CorrectiveActionLabel => "corrective_action",
            ElementId::SubmitButton => "save",
            ElementId::CancelButton => "cancel",
        }
    }
}

/// Every element label resolved for one language.
#[derive(Debug, Clone)]
pub struct Labels {
    language: Language,
    resolved: BTreeMap<ElementId, &'static str>,
}

impl Labels {
    /// Resolve all element labels for `language`.
    #[must_use]
    pub fn resolve(language: Language) -> Self {
        let resolved = ElementId::ALL
            .into_iter()
            .map(|id| (id, translate(language, id.key())))
            .collect();
        Self { language, resolved }
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    /// Label for an element.
    #[must_use]
    pub fn get(&self, id: ElementId) -> &'static str {
        self.resolved.get(&id).copied().unwrap_or_else(|| id.key())
    }

    /// Translate an arbitrary message key in this language.
    #[must_use]
    pub fn text<'a>(&self, key: &'a str) -> &'a str {
        translate(self.language, key)
    }
}

// =============================================================================
// CATALOG
// =============================================================================

const MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTHS_ES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

const EN: &[(&str, &str)] = &[
    // Common UI elements
    ("home", "Home"),
    ("upload_document", "Upload Document"),
    ("temperature_tracking", "Temperature Tracking"),
    ("new_chat", "New Chat"),
    ("clear_chat", "Clear Chat"),
    ("export_chat", "Export Chat"),
    ("logout", "Logout"),
    ("save", "Save"),
    ("cancel", "Cancel"),
    ("submit", "Submit"),
    ("export_csv", "Export CSV"),
    // Temperature tracking page
    ("lab_temperature_tracking", "Laboratory Temperature Tracking"),
    ("monthly_view", "Monthly View"),
    ("yearly_summary", "Yearly Summary"),
    ("reference_ranges", "Reference Ranges"),
    ("refrigerator", "Refrigerator"),
    ("freezer", "Freezer"),
    ("ln2", "LN2"),
    ("ln2_level", "Liquid Nitrogen Level"),
    ("room", "Room"),
    ("room_temp", "Room Temperature"),
    ("humidity", "Humidity"),
    ("monthly_compliance", "Monthly Compliance"),
    ("yearly_compliance_summary", "Yearly Compliance Summary"),
    ("monthly_breakdown", "Monthly Breakdown"),
    ("compliance_percentage", "Compliance %"),
    ("no_data_available", "No data available for this month"),
    ("overall_compliance", "Overall Compliance"),
    ("month", "Month"),
    ("of", "of"),
    ("days", "days"),
    ("no_data", "No data"),
    // Temperature form
    ("temperature_recording", "Temperature Recording"),
    ("refrigerator_temp", "Refrigerator Temperature (°C)"),
    ("freezer_temp", "Freezer Temperature (°C)"),
    ("ln2_level_pct", "Liquid Nitrogen Level (%)"),
    ("room_temp_c", "Room Temperature (°C)"),
    ("humidity_pct", "Humidity (%)"),
    ("corrective_action", "Corrective Action Taken"),
    ("range", "Range"),
    ("target", "Target"),
    ("above", "Above"),
    // Compliance messages
    ("compliant", "Compliant"),
    ("non_compliant", "Non-Compliant"),
    (
        "corrective_action_required",
        "Corrective action is required for out-of-range values",
    ),
    ("missing_reading", "All readings are required"),
    ("error_saving", "Error saving data"),
    ("success_saving", "Data saved successfully"),
    // CSV export
    ("exporting_data", "Exporting data..."),
    (
        "export_error",
        "An error occurred while exporting the data. Please try again.",
    ),
    ("export_saved", "Export saved to"),
    // Chat
    ("no_messages_to_export", "No messages to export"),
    (
        "chat_error",
        "Sorry, there was an error processing your request.",
    ),
    // Upload
    ("upload_success", "Document uploaded successfully!"),
    ("upload_failed", "Upload failed"),
    ("error_uploading", "Error uploading document"),
    (
        "content_too_short",
        "Content must be at least 50 characters",
    ),
    // Settings
    ("language_changed", "Language set to English"),
];

const ES: &[(&str, &str)] = &[
    // Common UI elements
    ("home", "Inicio"),
    ("upload_document", "Subir Documento"),
    ("temperature_tracking", "Registro de Temperatura"),
    ("new_chat", "Nuevo Chat"),
    ("clear_chat", "Borrar Chat"),
    ("export_chat", "Exportar Chat"),
    ("logout", "Cerrar Sesión"),
    ("save", "Guardar"),
    ("cancel", "Cancelar"),
    ("submit", "Enviar"),
    ("export_csv", "Exportar CSV"),
    // Temperature tracking page
    (
        "lab_temperature_tracking",
        "Registro de Temperatura de Laboratorio",
    ),
    ("monthly_view", "Vista Mensual"),
    ("yearly_summary", "Resumen Anual"),
    ("reference_ranges", "Rangos de Referencia"),
    ("refrigerator", "Refrigerador"),
    ("freezer", "Congelador"),
    ("ln2", "LN2"),
    ("ln2_level", "Nivel de Nitrógeno Líquido"),
    ("room", "Sala"),
    ("room_temp", "Temperatura Ambiente"),
    ("humidity", "Humedad"),
    ("monthly_compliance", "Cumplimiento Mensual"),
    ("yearly_compliance_summary", "Resumen de Cumplimiento Anual"),
    ("monthly_breakdown", "Desglose Mensual"),
    ("compliance_percentage", "% de Cumplimiento"),
    ("no_data_available", "No hay datos disponibles para este mes"),
    ("overall_compliance", "Cumplimiento General"),
    ("month", "Mes"),
    ("of", "de"),
    ("days", "días"),
    ("no_data", "Sin datos"),
    // Temperature form
    ("temperature_recording", "Registro de Temperatura"),
    ("refrigerator_temp", "Temperatura del Refrigerador (°C)"),
    ("freezer_temp", "Temperatura del Congelador (°C)"),
    ("ln2_level_pct", "Nivel de Nitrógeno Líquido (%)"),
    ("room_temp_c", "Temperatura Ambiente (°C)"),
    ("humidity_pct", "Humedad (%)"),
    ("corrective_action", "Acción Correctiva Tomada"),
    ("range", "Rango"),
    ("target", "Objetivo"),
    ("above", "Por encima de"),
    // Compliance messages
    ("compliant", "Conforme"),
    ("non_compliant", "No Conforme"),
    (
        "corrective_action_required",
        "Se requiere acción correctiva para valores fuera de rango",
    ),
    ("missing_reading", "Todas las lecturas son obligatorias"),
    ("error_saving", "Error al guardar datos"),
    ("success_saving", "Datos guardados exitosamente"),
    // CSV export
    ("exporting_data", "Exportando datos..."),
    (
        "export_error",
        "Ocurrió un error al exportar los datos. Por favor intente de nuevo.",
    ),
    ("export_saved", "Exportación guardada en"),
    // Chat
    ("no_messages_to_export", "No hay mensajes para exportar"),
    (
        "chat_error",
        "Lo sentimos, hubo un error al procesar su solicitud.",
    ),
    // Upload
    ("upload_success", "¡Documento subido exitosamente!"),
    ("upload_failed", "Error al subir"),
    ("error_uploading", "Error al subir el documento"),
    (
        "content_too_short",
        "El contenido debe tener al menos 50 caracteres",
    ),
    // Settings
    ("language_changed", "Idioma cambiado a español"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn catalogs_have_identical_keys() {
        let en: BTreeSet<_> = EN.iter().map(|(k, _)| *k).collect();
        let es: BTreeSet<_> = ES.iter().map(|(k, _)| *k).collect();
        assert_eq!(en, es);
        assert_eq!(en.len(), EN.len(), "duplicate key in EN catalog");
        assert_eq!(es.len(), ES.len(), "duplicate key in ES catalog");
    }

    #[test]
    fn every_element_has_a_translation() {
        for id in ElementId::ALL {
            assert!(lookup(Language::En, id.key()).is_some(), "{:?}", id);
            assert!(lookup(Language::Es, id.key()).is_some(), "{:?}", id);
        }
    }

    #[test]
    fn unknown_key_falls_back_to_key() {
        assert_eq!(translate(Language::Es, "not_a_key"), "not_a_key");
    }

    #[test]
    fn labels_resolve_per_language() {
        let en = Labels::resolve(Language::En);
        let es = Labels::resolve(Language::Es);
        assert_eq!(en.get(ElementId::MonthlyViewButton), "Monthly View");
        assert_eq!(es.get(ElementId::MonthlyViewButton), "Vista Mensual");
        assert_eq!(es.text("no_data_available"), "No hay datos disponibles para este mes");
    }

    #[test]
    fn language_codes() {
        assert_eq!("ES".parse::<Language>(), Ok(Language::Es));
        assert!("fr".parse::<Language>().is_err());
        assert_eq!(Language::En.toggled(), Language::Es);
        assert_eq!(serde_json::to_string(&Language::Es).expect("json"), "\"es\"");
    }

    #[test]
    fn month_names() {
        assert_eq!(month_name(Language::En, 3), "March");
        assert_eq!(month_name(Language::Es, 12), "Diciembre");
        assert_eq!(month_name(Language::En, 0), "");
        assert_eq!(month_name(Language::En, 13), "");
    }
}
