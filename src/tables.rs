use std::fmt::Display;

use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use itertools::Itertools;

use crate::core::{
    battery::BatteryReport,
    cooling::CoolingReport,
    form::{Field, FieldErrors},
    storage::StorageReport,
};

pub trait ToTable {
    fn to_table(&self) -> Table;
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

fn bullets<T: Display>(items: impl IntoIterator<Item = T>) -> String {
    items.into_iter().map(|item| format!("• {item}")).join("\n")
}

impl ToTable for BatteryReport {
    fn to_table(&self) -> Table {
        let mut table = new_table();
        table.set_header(vec!["Health state (SoH)", "Status", "Recommendations"]);
        table.add_row(vec![
            Cell::new(format!("{:.1}", self.state_of_health))
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Bold),
            Cell::new(self.severity).fg(self.severity.color()),
            Cell::new(bullets(&self.advice)),
        ]);
        table
    }
}

impl ToTable for CoolingReport {
    fn to_table(&self) -> Table {
        let mut table = new_table();
        table.set_header(vec!["Status", "Recommendations"]);
        table.add_row(vec![
            Cell::new(self.severity).fg(self.severity.color()),
            Cell::new(bullets(&self.advice)),
        ]);
        table
    }
}

impl ToTable for StorageReport {
    fn to_table(&self) -> Table {
        let alert = self.alert;
        let mut table = new_table();
        table.set_header(vec!["Storage used", "Status", "Details", "Recommendations"]);
        table.add_row(vec![
            Cell::new(format!("{} / {} ({:.1})", self.used.0, self.total, self.used_percent))
                .fg(self.saturation.color()),
            Cell::new(alert).fg(alert.color()).add_attribute(Attribute::Bold),
            Cell::new(alert.description().join("\n")),
            Cell::new(bullets(&self.recommendations)).add_attribute(Attribute::Dim),
        ]);
        if !self.notes.is_empty() {
            table.add_row(vec![
                Cell::new(""),
                Cell::new(""),
                Cell::new(""),
                Cell::new(self.notes.iter().join("\n")),
            ]);
        }
        table
    }
}

impl<F: Field> ToTable for FieldErrors<F> {
    fn to_table(&self) -> Table {
        let mut table = new_table();
        table.set_header(vec!["Field", "Error"]);
        for (field, message) in self.iter() {
            table.add_row(vec![
                Cell::new(field.key()).add_attribute(Attribute::Dim),
                Cell::new(message).fg(Color::Red),
            ]);
        }
        table
    }
}
