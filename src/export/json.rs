use crate::error::ExportError;
use crate::model::{BuildingClass, PricedNode, PricingContext};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// The flattened document handed to the export collaborator: summary cards
/// plus the priced item tree.
#[derive(Debug, Serialize)]
pub struct RabDocument<'a> {
    pub project: &'a str,
    pub building_class: BuildingClass,
    pub area: f64,
    pub regional_factor: f64,
    pub difficulty_factor: f64,
    pub adjustment_factor: f64,
    pub grand_total: f64,
    pub items: &'a [PricedNode],
}

impl<'a> RabDocument<'a> {
    #[must_use]
    pub fn new(
        project: &'a str,
        ctx: &PricingContext,
        grand_total: f64,
        items: &'a [PricedNode],
    ) -> Self {
        Self {
            project,
            building_class: ctx.building_class,
            area: ctx.area,
            regional_factor: ctx.regional_factor,
            difficulty_factor: ctx.difficulty_factor,
            adjustment_factor: ctx.adjustment_factor,
            grand_total,
            items,
        }
    }
}

pub fn export_json<P: AsRef<Path>>(document: &RabDocument, path: P) -> Result<(), ExportError> {
    let path_ref = path.as_ref();
    let json = serde_json::to_string_pretty(document)?;

    let mut file = File::create(path_ref).map_err(|source| ExportError::FileCreate {
        path: path_ref.to_path_buf(),
        source,
    })?;

    file.write_all(json.as_bytes())
        .map_err(|e| ExportError::WriteError {
            message: e.to_string(),
        })?;

    Ok(())
}
