//! Option listing as a table.

use crate::types::Setting;
use comfy_table::Table;

pub fn format_settings_table(settings: &[Setting]) -> String {
    if settings.is_empty() {
        return "No options.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Key", "Value", "Source", "States"]);
    for setting in settings {
        let source = serde_json::to_value(setting.source)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();
        table.add_row(vec![
            setting.key.clone(),
            setting.value.to_string(),
            source,
            setting.states.join(", "),
        ]);
    }
    table.to_string()
}
