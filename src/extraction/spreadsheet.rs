use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};

use super::ExtractionError;

/// Render every sheet as CSV, in workbook order, each block headed by
/// `Sheet: <name>`.
pub fn extract(data: &[u8]) -> Result<String, ExtractionError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(data))?;

    let mut content = String::new();
    for sheet_name in workbook.sheet_names() {
        let range = workbook.worksheet_range(&sheet_name)?;
        content.push_str(&format!("Sheet: {}\n", sheet_name));
        content.push_str(&sheet_to_csv(&range)?);
        content.push('\n');
    }

    Ok(content)
}

fn sheet_to_csv(range: &Range<Data>) -> Result<String, ExtractionError> {
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());
    for row in range.rows() {
        wtr.write_record(row.iter().map(cell_to_string))
            .map_err(|e| ExtractionError::Csv(e.to_string()))?;
    }
    let data = wtr
        .into_inner()
        .map_err(|e| ExtractionError::Csv(e.to_string()))?;
    let rendered = String::from_utf8_lossy(&data);
    Ok(rendered.trim_end_matches(['\r', '\n']).to_string())
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string().to_uppercase(),
        other => other.to_string(),
    }
}
