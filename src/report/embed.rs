//! Rich message embeds, shaped like the Discord embed object.

use serde::{Deserialize, Serialize};

pub const COLOR_SUCCESS: u32 = 0x2ecc71;
pub const COLOR_FAILURE: u32 = 0xe74c3c;
pub const COLOR_INFO: u32 = 0x3498db;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    /// RFC 3339.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedAuthor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedFooter {
    pub text: String,
}

impl Embed {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline: false,
        });
        self
    }
}

/// Plain-text rendering for terminals.
pub fn format_text(embed: &Embed) -> String {
    let mut out = String::new();

    if let Some(title) = &embed.title {
        out.push_str(&format!("=== {} ===\n", title));
    }
    if let Some(author) = &embed.author {
        out.push_str(&format!("Author: {}\n", author.name));
    }
    if let Some(url) = &embed.url {
        out.push_str(&format!("{}\n", url));
    }
    if let Some(description) = &embed.description {
        out.push('\n');
        out.push_str(description);
        out.push('\n');
    }
    for field in &embed.fields {
        out.push_str(&format!("\n{}\n  {}\n", field.name, field.value));
    }
    if let Some(footer) = &embed.footer {
        out.push_str(&format!("\n{}\n", footer.text));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_skips_empty_parts() {
        let embed = Embed::new("Error").color(COLOR_FAILURE).field("Error", "boom");
        let json = serde_json::to_value(&embed).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "Error",
                "color": 0xe74c3c,
                "fields": [{ "name": "Error", "value": "boom", "inline": false }]
            })
        );
    }

    #[test]
    fn test_format_text() {
        let embed = Embed::new("LibJS test262 results")
            .description("Fix the thing")
            .field("test262 (1.00s)", "✅ 100.00%");
        let text = format_text(&embed);
        assert!(text.starts_with("=== LibJS test262 results ===\n"));
        assert!(text.contains("\nFix the thing\n"));
        assert!(text.contains("\ntest262 (1.00s)\n  ✅ 100.00%\n"));
    }
}
