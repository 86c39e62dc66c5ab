use crate::error::ExportError;
use crate::model::PricedNode;
use std::fs::File;
use std::path::Path;

/// Export a priced forest as flat CSV rows, one row per node in
/// depth-first order. Dotted codes carry the hierarchy; numbers are written
/// raw (formatting is the consumer's concern).
pub fn export_csv<P: AsRef<Path>>(priced: &[PricedNode], path: P) -> Result<(), ExportError> {
    let path_ref = path.as_ref();
    let file = File::create(path_ref).map_err(|source| ExportError::FileCreate {
        path: path_ref.to_path_buf(),
        source,
    })?;

    let mut writer = csv::Writer::from_writer(file);

    writer.write_record([
        "Code",
        "Name (EN)",
        "Name (ID)",
        "Unit",
        "Unit Price",
        "Volume",
        "Total",
    ])?;

    for node in priced {
        write_node(&mut writer, node)?;
    }

    writer.flush().map_err(|e| ExportError::WriteError {
        message: e.to_string(),
    })?;

    Ok(())
}

fn write_node(writer: &mut csv::Writer<File>, node: &PricedNode) -> Result<(), ExportError> {
    match node {
        PricedNode::Group {
            code,
            name_en,
            name_id,
            total,
            children,
        } => {
            writer.write_record([
                code.as_str(),
                name_en.as_str(),
                name_id.as_str(),
                "",
                "",
                "",
                &total.to_string(),
            ])?;
            for child in children {
                write_node(writer, child)?;
            }
        }
        PricedNode::Leaf {
            code,
            name_en,
            name_id,
            unit,
            unit_price,
            volume,
            total,
        } => {
            writer.write_record([
                code.as_str(),
                name_en.as_str(),
                name_id.as_str(),
                unit.as_deref().unwrap_or(""),
                &unit_price.to_string(),
                &volume.map(|v| v.to_string()).unwrap_or_default(),
                &total.to_string(),
            ])?;
        }
    }
    Ok(())
}
