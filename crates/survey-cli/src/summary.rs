use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde_json::json;

use survey_model::{ColumnKind, DatasetProfile, format_float};
use survey_transform::RunSummary;

use crate::types::{CleanResult, ProfileResult, ProfileSource};

pub fn print_clean_summary(result: &CleanResult) {
    println!("Input: {}", result.input.display());
    match &result.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: (dry run, nothing written)"),
    }
    match &result.profile_source {
        ProfileSource::Computed => println!("Profile: computed from input"),
        ProfileSource::Loaded(path) => println!("Profile: {}", path.display()),
    }
    println!("Stages: {}", result.stages.join(" -> "));
    println!("{}", run_table(&result.summary));
    if !result.summary.labels.is_empty() {
        println!("{}", label_table(&result.summary));
    }
    println!("Finished in {} ms", result.duration_ms);
}

pub fn print_clean_json(result: &CleanResult) -> serde_json::Result<()> {
    let report = json!({
        "input": result.input,
        "output": result.output,
        "stages": result.stages,
        "summary": result.summary,
        "duration_ms": result.duration_ms,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub fn print_profile(result: &ProfileResult) {
    println!("Input: {}", result.input.display());
    println!("Rows: {}", result.profile.row_count);
    if let Some(path) = &result.saved_to {
        println!("Saved profile: {}", path.display());
    }
    println!("{}", profile_table(&result.profile));
}

/// Counters of a finished run, one metric per row.
pub fn run_table(summary: &RunSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Count")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Rows read"), Cell::new(summary.rows_read)]);
    table.add_row(vec![
        Cell::new("Rows written"),
        Cell::new(summary.rows_written).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Rows skipped"),
        count_cell(summary.rows_skipped, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Imputed values"),
        count_cell(summary.imputed_values, Color::Cyan),
    ]);
    table.add_row(vec![
        Cell::new("Cast failures"),
        count_cell(summary.cast_failures, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Unparseable dates"),
        count_cell(summary.unparseable_dates, Color::Yellow),
    ]);
    table
}

pub fn label_table(summary: &RunSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Remark"), header_cell("Rows")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (label, count) in &summary.labels {
        table.add_row(vec![Cell::new(label), Cell::new(count)]);
    }
    table
}

pub fn profile_table(profile: &DatasetProfile) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Kind"),
        header_cell("Mean"),
        header_cell("Present"),
        header_cell("Missing"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for (name, column) in profile.iter() {
        let kind = match column.kind {
            ColumnKind::Numeric(_) => Cell::new(column.kind.label()).fg(Color::Blue),
            ColumnKind::Text => dim_cell(column.kind.label()),
        };
        let mean = column
            .mean
            .map_or_else(|| dim_cell("-"), |mean| Cell::new(format_float(mean)));
        table.add_row(vec![
            Cell::new(name).add_attribute(Attribute::Bold),
            kind,
            mean,
            Cell::new(column.present),
            count_cell(column.missing, Color::Yellow),
        ]);
    }
    table
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
