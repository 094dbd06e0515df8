//! Static category configuration for the survey schema.
//!
//! The label lists are fixed configuration, not derived from data: the
//! source questionnaire stores one logical category under several
//! concretely-named columns, and these labels are the substrings that
//! identify them. The defaults carry the Bogotá visitor survey's Spanish
//! labels verbatim.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentinel label reported when a cohort has no data for a category kind.
pub const NOT_APPLICABLE: &str = "N/A";

// ── CategoryKind ──────────────────────────────────────────────────────────────

/// A dimension along which categorical presence is tallied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Transport,
    Activity,
    Place,
}

impl CategoryKind {
    pub const ALL: [CategoryKind; 3] = [
        CategoryKind::Transport,
        CategoryKind::Activity,
        CategoryKind::Place,
    ];
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CategoryKind::Transport => "transport",
            CategoryKind::Activity => "activity",
            CategoryKind::Place => "place",
        };
        f.write_str(name)
    }
}

// ── CategoryConfig ────────────────────────────────────────────────────────────

/// The full static schema configuration for one survey layout.
///
/// Label order matters: top-attribute selection breaks ties by position in
/// these lists, so reordering them changes tie-break results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Header holding the respondent's age.
    pub age_field: String,
    /// Header holding the respondent's total spending.
    pub spending_field: String,
    /// Transport mode labels, matched as header substrings.
    pub transport: Vec<String>,
    /// Activity type labels, matched as header substrings.
    pub activity: Vec<String>,
    /// Visited place labels, matched as header substrings.
    pub place: Vec<String>,
    /// Spending sub-category fields, addressed by exact header name.
    pub spending_categories: Vec<String>,
}

impl CategoryConfig {
    /// The labels for one category kind, in declared (tie-break) order.
    pub fn labels(&self, kind: CategoryKind) -> &[String] {
        match kind {
            CategoryKind::Transport => &self.transport,
            CategoryKind::Activity => &self.activity,
            CategoryKind::Place => &self.place,
        }
    }
}

impl Default for CategoryConfig {
    fn default() -> Self {
        let owned = |labels: &[&str]| labels.iter().map(|s| s.to_string()).collect();
        Self {
            age_field: "Edad".to_string(),
            spending_field: "Valor COP".to_string(),
            transport: owned(&[
                "Vehiculo propio",
                "Vehiculo Plataforma Digital",
                "Alquiler de vehiculo",
                "Vehiculo de familia/amigo",
                "Transporte público",
                "Taxi",
                "Bicicleta",
            ]),
            activity: owned(&[
                "Cultural, arte, historico, etc",
                "Ecoturismo",
                "Aviturismo",
                "Agroturismo",
                "Montabike y aventura",
                "Bienestar",
                "Medico",
                "Negocios",
                "Gastronomíco",
                "Urbano",
                "Educativo",
                "Deportivo",
            ]),
            place: owned(&[
                "Iglesias",
                "Museoa",
                "Biblitecas",
                "Zonas de la ciudad",
                "Parques",
                "Parques de aventuras",
                "Quebradas / humedales / senderos",
                "Centros comerciales",
                "Restaurantes",
                "Plazas de mercado",
                "Bares / discotecas",
                "Spa / termales",
                "Centros medicos",
                "Estadio",
                "Planetario",
                "Jardin Botanico",
                "Movistar Arena",
                "Fincas Agroturisticas",
                "Universidades",
                "Teatros",
                "Corferias",
                "Alrededor de Bogota",
                "Monserrate",
            ]),
            spending_categories: owned(&[
                "Alojamiento",
                "Alimentación",
                "Transporte Interno",
                "Bienes de uso personal",
                "Servicio cultural y recreacional",
                "Compras",
            ]),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_list_sizes() {
        let config = CategoryConfig::default();
        assert_eq!(config.transport.len(), 7);
        assert_eq!(config.activity.len(), 12);
        assert_eq!(config.place.len(), 23);
        assert_eq!(config.spending_categories.len(), 6);
    }

    #[test]
    fn test_default_field_names() {
        let config = CategoryConfig::default();
        assert_eq!(config.age_field, "Edad");
        assert_eq!(config.spending_field, "Valor COP");
    }

    #[test]
    fn test_labels_accessor_matches_kind() {
        let config = CategoryConfig::default();
        assert_eq!(config.labels(CategoryKind::Transport)[5], "Taxi");
        assert_eq!(config.labels(CategoryKind::Activity)[1], "Ecoturismo");
        assert_eq!(config.labels(CategoryKind::Place)[22], "Monserrate");
    }

    #[test]
    fn test_kind_display_names() {
        assert_eq!(CategoryKind::Transport.to_string(), "transport");
        assert_eq!(CategoryKind::Activity.to_string(), "activity");
        assert_eq!(CategoryKind::Place.to_string(), "place");
    }
}
