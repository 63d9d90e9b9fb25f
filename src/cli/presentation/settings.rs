//! Posts settings tab as text.

use crate::settings::PostsTab;
use comfy_table::Table;

pub fn format_posts_tab_text(tab: &PostsTab) -> String {
    let mut out = Vec::new();
    for section in &tab.sections {
        let mut table = Table::new();
        table.load_preset(comfy_table::presets::UTF8_FULL);
        table.set_header(vec!["Option", "Label", "Value", "States"]);
        for field in &section.fields {
            table.add_row(vec![
                field.option.clone(),
                field.label.clone(),
                field.value.to_string(),
                field.states.join(", "),
            ]);
        }
        out.push(format!("{}\n{}\n{}", section.title, section.description, table));
    }
    out.join("\n\n")
}
