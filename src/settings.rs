//! Posts settings tab: per-type root page and template options.
//!
//! Describes the sections and fields of the tab as data. Each public post type
//! other than `page` gets a page selector (`xo_<type>_page_id`) and a template
//! selector (`xo_<type>_template`).

use crate::error::StorageError;
use crate::options::Options;
use crate::post_types::PostTypeRegistry;
use serde::Serialize;
use serde_json::Value;

pub const POST_PAGE_SECTION: &str = "post_page_section";
pub const POST_TEMPLATE_SECTION: &str = "post_template_section";

/// Input control a field renders as
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    /// Page dropdown; `none_value` selects no page
    PageSelect { none_value: Value },
    /// Template dropdown; `none_value` selects no template
    TemplateSelect { none_value: Value },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingsField {
    pub option: String,
    pub label: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    pub value: Value,
    pub states: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingsSection {
    pub id: String,
    pub title: String,
    pub description: String,
    pub fields: Vec<SettingsField>,
}

/// The tab's sections with current values and states
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostsTab {
    pub sections: Vec<SettingsSection>,
}

pub fn page_option(post_type: &str) -> String {
    format!("xo_{}_page_id", post_type)
}

pub fn template_option(post_type: &str) -> String {
    format!("xo_{}_template", post_type)
}

impl PostsTab {
    pub fn build(types: &dyn PostTypeRegistry, options: &Options) -> Result<Self, StorageError> {
        let routable: Vec<_> = types
            .all()
            .into_iter()
            .filter(|t| t.public && t.name != "page")
            .collect();

        let field = |option: String, label: String, kind: FieldKind| -> Result<SettingsField, StorageError> {
            let none_value = match &kind {
                FieldKind::PageSelect { none_value } | FieldKind::TemplateSelect { none_value } => {
                    none_value.clone()
                }
            };
            Ok(SettingsField {
                value: options.get_option(&option, none_value)?,
                states: options.get_states(&option),
                option,
                label,
                kind,
            })
        };

        let mut page_fields = Vec::new();
        let mut template_fields = Vec::new();
        for post_type in &routable {
            page_fields.push(field(
                page_option(&post_type.name),
                format!("{} Page", post_type.label),
                FieldKind::PageSelect {
                    none_value: Value::from(0),
                },
            )?);
            template_fields.push(field(
                template_option(&post_type.name),
                format!("{} Template", post_type.label),
                FieldKind::TemplateSelect {
                    none_value: Value::from(""),
                },
            )?);
        }

        Ok(Self {
            sections: vec![
                SettingsSection {
                    id: POST_PAGE_SECTION.to_string(),
                    title: "Post Pages".to_string(),
                    description: "Used to set the root page of a post type.".to_string(),
                    fields: page_fields,
                },
                SettingsSection {
                    id: POST_TEMPLATE_SECTION.to_string(),
                    title: "Post Templates".to_string(),
                    description: "Used to set the default template for a post type.".to_string(),
                    fields: template_fields,
                },
            ],
        })
    }
}
