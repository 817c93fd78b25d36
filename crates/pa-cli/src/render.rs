//! Renderers over the assembled report.
//!
//! Consume `Report` only; no renderer reaches back into the raw payload.

use pa_common::OutputFormat;
use pa_report::{Report, RenderedTable};

/// Render a report in the requested format.
pub fn render(report: &Report, format: OutputFormat) -> pa_common::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Md => Ok(render_md(report)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

fn render_text(report: &Report) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\ngenerated {}\n",
        report.display_title(),
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    out.push_str("\nSummary\n-------\n");
    for advisory in &report.advisories {
        out.push_str(&format!(
            "{} [{}] {}\n",
            advisory.severity.glyph(),
            advisory.severity,
            advisory.message
        ));
    }

    for section in &report.sections {
        out.push_str(&format!("\n== {} ==\n", section.name));
        if let Some(blurb) = &section.blurb {
            out.push_str(&format!("{blurb}\n"));
        }
        for table in &section.tables {
            if let Some(label) = &table.label {
                out.push_str(&format!("\n[{label}]\n"));
            }
            out.push_str(&text_table(table));
            if table.truncated {
                out.push_str(&format!(
                    "… {} more row(s) not shown\n",
                    table.total_count - table.rows.len()
                ));
            }
        }
    }
    out
}

/// Fixed-width table with a flag gutter; tooltips print as footnote lines.
fn text_table(table: &RenderedTable) -> String {
    let mut widths: Vec<usize> = table.columns.iter().map(|h| h.chars().count()).collect();
    for row in &table.rows {
        for (i, cell) in row.cells.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let mut out = String::new();
    let header: Vec<String> = table
        .columns
        .iter()
        .zip(&widths)
        .map(|(h, &w)| format!("{h:<w$}"))
        .collect();
    out.push_str(&format!("  {}\n", header.join("  ")));
    out.push_str(&format!(
        "  {}\n",
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  ")
    ));
    for row in &table.rows {
        let gutter = if row.flagged { "✗" } else { " " };
        let cells: Vec<String> = row
            .cells
            .iter()
            .zip(&widths)
            .map(|(c, &w)| format!("{c:<w$}"))
            .collect();
        out.push_str(&format!("{gutter} {}\n", cells.join("  ")));
        if let Some(tooltip) = &row.tooltip {
            out.push_str(&format!("    ↳ {tooltip}\n"));
        }
    }
    out
}

fn render_md(report: &Report) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {}\n\n", report.display_title()));
    out.push_str(&format!(
        "_Generated {}_\n\n## Summary\n\n",
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    ));
    for advisory in &report.advisories {
        out.push_str(&format!(
            "- **{}**: {}\n",
            advisory.severity, advisory.message
        ));
    }

    for section in &report.sections {
        out.push_str(&format!("\n## {}\n\n", section.name));
        if let Some(blurb) = &section.blurb {
            out.push_str(&format!("{blurb}\n\n"));
        }
        for table in &section.tables {
            if let Some(label) = &table.label {
                out.push_str(&format!("### {label}\n\n"));
            }
            out.push_str(&md_table(table));
            for (header, tooltip) in table.columns.iter().zip(&table.column_tooltips) {
                if let Some(tooltip) = tooltip {
                    out.push_str(&format!("\n_{header}: {tooltip}_\n"));
                }
            }
            if table.truncated {
                out.push_str(&format!(
                    "\n_{} more row(s) not shown_\n",
                    table.total_count - table.rows.len()
                ));
            }
            out.push('\n');
        }
    }
    out
}

fn md_table(table: &RenderedTable) -> String {
    let mut out = String::new();
    out.push_str(&format!("| {} |\n", table.columns.join(" | ")));
    out.push_str(&format!(
        "|{}\n",
        " --- |".repeat(table.columns.len())
    ));
    for row in &table.rows {
        let mut cells = row.cells.clone();
        if row.flagged {
            if let Some(first) = cells.first_mut() {
                *first = format!("⚠ {first}");
            }
        }
        out.push_str(&format!("| {} |\n", cells.join(" | ")));
    }
    out
}
