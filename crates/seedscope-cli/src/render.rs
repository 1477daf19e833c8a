//! Terminal rendering with `comfy-table`.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use seedscope_core::{
    Dataset, DatasetStats, DetailField, DetailView, PageSnapshot, Vocabulary,
};
use seedscope_model::{EvidenceQuality, StressTolerance, VarietyRecord};

/// Shown instead of a table when nothing matches.
pub const EMPTY_RESULT: &str = "No varieties match the current filters.";

const PAGE_COLUMNS: [&str; 10] = [
    "ID",
    "Crop",
    "Variety",
    "Year",
    "Stress Tolerance",
    "Key Attributes",
    "States",
    "Seasons",
    "Maturity",
    "Evidence",
];

#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL_CONDENSED)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic);
        if !self.color {
            table.force_no_tty();
        }
        table
    }

    pub fn page_table(&self, page: &PageSnapshot<'_>) -> Table {
        let mut table = self.table();
        table.set_header(PAGE_COLUMNS.iter().map(|label| header_cell(label)));
        for record in &page.records {
            table.add_row(page_row(record));
        }
        align_column(&mut table, 3, CellAlignment::Right);
        table
    }

    /// The page table, or the empty-result message.
    pub fn page(&self, page: &PageSnapshot<'_>) -> String {
        if page.is_empty_result() {
            format!("{EMPTY_RESULT}\n{}", page_summary(page))
        } else {
            format!("{}\n{}", self.page_table(page), page_summary(page))
        }
    }

    pub fn detail(&self, view: &DetailView) -> String {
        let mut out = format!(
            "{}\nID: {}\nPrimary state: {}\n",
            view.title, view.id, view.primary_state
        );

        match &view.official {
            Some(official) => {
                out.push_str("\nOfficial registry\n");
                out.push_str(&self.fields_table(&official.fields).to_string());
                out.push_str(&format!("\nPortal: {}\n", official.portal_url));
            }
            None => out.push_str("\nOfficial registry: no cross-reference\n"),
        }

        let research = &view.research;
        let mut table = self.fields_table(&research.fields);
        table.add_row(vec![
            label_cell("Stress Evidence"),
            Cell::new(research.stress_evidence_label()),
        ]);
        table.add_row(vec![
            label_cell("Enhancements"),
            Cell::new(research.enhancement_label()),
        ]);
        out.push_str("\nResearch evidence\n");
        out.push_str(&table.to_string());
        out
    }

    pub fn vocab_table(&self, vocab: &Vocabulary) -> Table {
        let mut table = self.table();
        table.set_header(vec![header_cell("Category"), header_cell("Values")]);
        let join = |values: Vec<String>| {
            if values.is_empty() {
                "-".to_string()
            } else {
                values.join(", ")
            }
        };
        table.add_row(vec![label_cell("Crops"), Cell::new(join(vocab.crops.clone()))]);
        table.add_row(vec![label_cell("States"), Cell::new(join(vocab.states.clone()))]);
        table.add_row(vec![
            label_cell("Stress Types"),
            Cell::new(join(vocab.stress_types.iter().map(ToString::to_string).collect())),
        ]);
        table.add_row(vec![
            label_cell("Evidence"),
            Cell::new(join(vocab.evidence.iter().map(ToString::to_string).collect())),
        ]);
        table.add_row(vec![label_cell("Years"), Cell::new(join(vocab.years.clone()))]);
        table
    }

    pub fn stats_table(&self, stats: &DatasetStats) -> Table {
        let mut table = self.table();
        table.set_header(vec![header_cell("Statistic"), header_cell("Count")]);
        for (label, value) in [
            ("Varieties", stats.total),
            ("Stress tolerant", stats.stress_tolerant),
            ("High evidence", stats.high_evidence),
            ("Crops", stats.distinct_crops),
            ("Official sources", stats.official_sources),
        ] {
            table.add_row(vec![label_cell(label), Cell::new(value)]);
        }
        align_column(&mut table, 1, CellAlignment::Right);
        table
    }

    fn fields_table(&self, fields: &[DetailField]) -> Table {
        let mut table = self.table();
        for field in fields {
            table.add_row(vec![label_cell(field.label), Cell::new(&field.value)]);
        }
        table
    }
}

/// "Showing 26-30 of 30 varieties (100 loaded), page 2/2".
pub fn page_summary(page: &PageSnapshot<'_>) -> String {
    if page.is_empty_result() {
        return format!(
            "0 of {} varieties, page {}/{}",
            page.total_count, page.page_index, page.total_pages
        );
    }
    format!(
        "Showing {}-{} of {} varieties ({} loaded), page {}/{}",
        page.offset + 1,
        page.offset + page.records.len(),
        page.filtered_count,
        page.total_count,
        page.page_index,
        page.total_pages
    )
}

/// "3 varieties loaded at 2026-10-16 09:30:00 UTC".
pub fn dataset_status(dataset: &Dataset) -> String {
    format!(
        "{} varieties loaded at {}",
        dataset.len(),
        dataset.loaded_at().format("%Y-%m-%d %H:%M:%S UTC")
    )
}

fn page_row(record: &VarietyRecord) -> Vec<Cell> {
    vec![
        Cell::new(&record.id).fg(Color::DarkGrey),
        Cell::new(&record.crop),
        Cell::new(&record.variety_name).add_attribute(Attribute::Bold),
        Cell::new(&record.year_of_release),
        tolerance_cell(record),
        Cell::new(&record.key_attributes),
        Cell::new(record.state_codes_label()),
        Cell::new(record.seasons_label()),
        Cell::new(&record.days_to_maturity),
        evidence_cell(record.evidence_quality),
    ]
}

fn tolerance_cell(record: &VarietyRecord) -> Cell {
    match record.stress_tolerance() {
        StressTolerance::Yes => Cell::new(format!("Yes ({})", record.stress_types_label()))
            .fg(Color::Green),
        StressTolerance::No => Cell::new("No").fg(Color::DarkGrey),
    }
}

fn evidence_cell(evidence: EvidenceQuality) -> Cell {
    let color = match evidence {
        EvidenceQuality::High => Color::Green,
        EvidenceQuality::Medium => Color::Yellow,
        EvidenceQuality::Low => Color::Red,
    };
    Cell::new(evidence).fg(color)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn label_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
