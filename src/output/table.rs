//! Table output formatting

use tabled::{
    Table, Tabled,
    builder::Builder,
    settings::{Alignment, Modify, Style, object::Columns, object::Rows},
};

/// Format a list of rows as a table
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    if data.is_empty() {
        return "No results found.".to_string();
    }

    let mut table = Table::new(data);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}

/// Format a single resource as a two-column `FIELD | VALUE` table.
///
/// Fields with an empty value are left out.
pub fn format_details(fields: &[(&str, String)]) -> String {
    let mut builder = Builder::default();
    for (name, value) in fields.iter().filter(|(_, v)| !v.is_empty()) {
        builder.push_record([name.to_string(), value.clone()]);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::right()));

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Tabled)]
    struct EnvRow {
        #[tabled(rename = "ID")]
        id: String,
        #[tabled(rename = "SLUG")]
        slug: String,
    }

    #[test]
    fn test_format_table_empty() {
        let items: Vec<EnvRow> = vec![];
        assert_eq!(format_table(&items), "No results found.");
    }

    #[test]
    fn test_format_table_rows() {
        let items = vec![
            EnvRow {
                id: "hcaen_01".to_string(),
                slug: "production".to_string(),
            },
            EnvRow {
                id: "hcaen_02".to_string(),
                slug: "staging".to_string(),
            },
        ];

        let result = format_table(&items);

        assert!(result.contains("SLUG"));
        assert!(result.contains("production"));
        assert!(result.contains("staging"));
        // Rounded style uses ╭ for top-left corner
        assert!(result.contains("╭"));
    }

    #[test]
    fn test_format_details_skips_empty_values() {
        let result = format_details(&[
            ("ID", "hcxik_01".to_string()),
            ("Secret", String::new()),
            ("Type", "ingest".to_string()),
        ]);

        assert!(result.contains("hcxik_01"));
        assert!(result.contains("ingest"));
        assert!(!result.contains("Secret"));
        assert!(result.contains("╰"));
    }
}
