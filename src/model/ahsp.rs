use serde::{Deserialize, Serialize};

/// Resource category used to partition AHSP component subtotals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceCategory {
    Labor,
    Material,
    Equipment,
}

impl ResourceCategory {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Labor => "Labor",
            Self::Material => "Material",
            Self::Equipment => "Equipment",
        }
    }
}

/// A priced resource (worker, material or machine) referenced by AHSP
/// components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: u64,
    pub name: String,
    pub category: ResourceCategory,
    #[serde(default)]
    pub unit: Option<String>,
    pub price_default: f64,
}

/// One `(resource, coefficient)` pair inside an AHSP analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AhspComponent {
    pub resource_id: u64,
    pub coefficient: f64,
}

/// A named unit-price analysis (Analisa Harga Satuan Pekerjaan).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AhspMaster {
    pub id: u64,
    pub name: String,
    pub unit: String,
    /// Overhead and profit percentage; defaults to 10 when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overhead_percent: Option<f64>,
    #[serde(default)]
    pub components: Vec<AhspComponent>,
}

/// Composition result of one AHSP analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AhspBreakdown {
    pub labor: f64,
    pub material: f64,
    pub equipment: f64,
    pub subtotal: f64,
    pub overhead: f64,
    pub total: f64,
}
