//! Class catalog: class code → name, category, warehouse.
//!
//! A built-in dictionary covers the known warehouse classes. An external JSON
//! file (`{"9098": {"name": "...", "category": "...", "warehouse": "..."}}`)
//! can be layered on top; its entries replace built-in ones per code.

use std::collections::BTreeMap;
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{ClassInfo, NewScheduleEntry};
use crate::errors::CoreError;
use crate::period::Period;

const BUILTIN: &[(&str, &str, &str, &str)] = &[
    ("9098", "Tampas", "Relé", "Galpão 02"),
    ("9601", "Carcaças", "Relé", "Galpão 02"),
    ("9603", "Embolos", "Relé", "Galpão 02"),
    ("9608", "Isolantes", "Relé", "Galpão 02"),
    ("9609", "Pinos Relay", "Relé", "Galpão 02"),
    ("9612", "Parafusos de contato", "Relé", "Galpão 02"),
    ("9613", "Chapas de contato", "Relé", "Galpão 02"),
    ("9615", "Mancais flangeados", "Relé", "Galpão 02"),
    ("9616", "Tubos de latão", "Relé", "Galpão 02"),
    ("9617", "Mancais", "Relé", "Galpão 02"),
    ("9618", "Molas", "Relé", "Galpão 02"),
    ("9619", "Parafusos", "Relé", "Galpão 02"),
    ("9621", "Porcas", "Relé", "Galpão 02"),
    ("9643", "Parafuso de cobre", "Relé", "Galpão 02"),
    ("9501", "Embolagens", "Relé", "Galpão 02"),
    ("9145", "Motores", "Relé", "Galpão 02 - 05"),
    ("9250", "Fio de cobre", "Relé", "Galpão 02 - 03"),
    ("9220", "Fio Máquina", "Conformação", "Galpão 02"),
    ("9226", "Arame trefilado na ZM", "Conformação", "Galpão 02"),
    ("9203", "Chapas de Aço", "Estamparia", "Galpão 04"),
    ("9527", "Reatores", "ALMOX. GERAL", "Galpão 03"),
    ("9529", "Luvas Diversas / EPI", "ALMOX. GERAL", "Galpão 03"),
    ("9530", "Sapatos e Botas de Segurança", "ALMOX. GERAL", "Galpão 03"),
    ("9533", "Peças Reposição / Empilhadeira", "ALMOX. GERAL", "Galpão 03"),
];

/// A catalog row with its code, as listed to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CatalogEntry {
    pub code: String,
    #[serde(flatten)]
    pub info: ClassInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassCatalog {
    classes: BTreeMap<String, ClassInfo>,
}

impl ClassCatalog {
    /// The built-in dictionary.
    #[must_use]
    pub fn builtin() -> Self {
        let classes = BUILTIN
            .iter()
            .map(|(code, name, category, warehouse)| {
                ((*code).to_string(), ClassInfo::new(name, category, warehouse))
            })
            .collect();
        Self { classes }
    }

    /// Built-in dictionary with the overlay at `path` merged on top.
    ///
    /// A missing file leaves the built-ins alone. A file that cannot be read
    /// or parsed is logged and ignored.
    #[must_use]
    pub fn load(path: Option<&Path>) -> Self {
        let mut catalog = Self::builtin();
        let Some(path) = path else {
            return catalog;
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "class overlay not found; using built-in catalog");
            return catalog;
        }
        match std::fs::read_to_string(path)
            .map_err(|e| CoreError::Other(e.into()))
            .and_then(|text| Self::parse_overlay(&text))
        {
            Ok(overlay) => {
                tracing::debug!(path = %path.display(), classes = overlay.len(), "merged class overlay");
                catalog.merge(overlay);
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "ignoring unreadable class overlay");
            }
        }
        catalog
    }

    /// Parse an overlay document.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the text is not a code → class map.
    pub fn parse_overlay(text: &str) -> Result<BTreeMap<String, ClassInfo>, CoreError> {
        serde_json::from_str(text)
            .map_err(|e| CoreError::Validation(format!("invalid class overlay: {e}")))
    }

    /// Merge entries over the current ones; the overlay wins per code.
    pub fn merge(&mut self, overlay: BTreeMap<String, ClassInfo>) {
        for (code, info) in overlay {
            self.classes.insert(code.trim().to_string(), info);
        }
    }

    #[must_use]
    pub fn get(&self, code: &str) -> Option<&ClassInfo> {
        self.classes.get(code.trim())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Entries sorted by code, optionally restricted to a category
    /// (case-insensitive).
    #[must_use]
    pub fn entries(&self, category: Option<&str>) -> Vec<CatalogEntry> {
        self.classes
            .iter()
            .filter(|(_, info)| {
                category.is_none_or(|wanted| {
                    info.category
                        .as_deref()
                        .is_some_and(|c| c.eq_ignore_ascii_case(wanted.trim()))
                })
            })
            .map(|(code, info)| CatalogEntry {
                code: code.clone(),
                info: info.clone(),
            })
            .collect()
    }

    /// Schedule entry inputs for every (filtered) class in `period`.
    #[must_use]
    pub fn schedule_inputs(
        &self,
        period: Period,
        category: Option<&str>,
        monthly_target: u32,
    ) -> Vec<NewScheduleEntry> {
        self.entries(category)
            .into_iter()
            .map(|entry| NewScheduleEntry {
                class_code: entry.code,
                class_name: entry.info.name,
                category: entry.info.category.unwrap_or_default(),
                warehouse: entry.info.warehouse.unwrap_or_default(),
                period,
                monthly_target,
            })
            .collect()
    }
}
