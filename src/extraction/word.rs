use docx_rs::{
    DocumentChild, Paragraph, ParagraphChild, RunChild, Table, TableCellContent, TableChild,
    TableRowChild,
};

use super::ExtractionError;

/// Raw text of a `.docx` body: one line per paragraph, table cells included
pub fn extract(data: &[u8]) -> Result<String, ExtractionError> {
    let docx = docx_rs::read_docx(data).map_err(|e| ExtractionError::Word(e.to_string()))?;

    let mut content = String::new();
    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(paragraph) => push_paragraph(&mut content, paragraph),
            DocumentChild::Table(table) => push_table(&mut content, table),
            _ => {}
        }
    }

    Ok(content.trim_end().to_string())
}

fn push_paragraph(content: &mut String, paragraph: &Paragraph) {
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                match run_child {
                    RunChild::Text(text) => content.push_str(&text.text),
                    RunChild::Tab(_) => content.push('\t'),
                    RunChild::Break(_) => content.push('\n'),
                    _ => {}
                }
            }
        }
    }
    content.push('\n');
}

#[allow(irrefutable_let_patterns)]
fn push_table(content: &mut String, table: &Table) {
    for row in &table.rows {
        let TableChild::TableRow(row) = row else { continue };
        for cell in &row.cells {
            let TableRowChild::TableCell(cell) = cell else { continue };
            for cell_content in &cell.children {
                if let TableCellContent::Paragraph(paragraph) = cell_content {
                    push_paragraph(content, paragraph);
                }
            }
        }
    }
}
