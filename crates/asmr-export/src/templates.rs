use std::collections::HashMap;

use crate::ExportError;

pub const FOOTPRINT_TEMPLATE: &str = include_str!("../templates/footprint.kicad_mod.tpl");

/// Names of the `{{ name }}` placeholders in `template`, in order of appearance.
#[must_use]
pub fn extract_placeholders(template: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        if let Some(end) = after.find("}}") {
            out.push(after[..end].trim().to_string());
            rest = &after[end + 2..];
        } else {
            break;
        }
    }
    out
}

/// Substitute every `{{ name }}` placeholder from `ctx`.
///
/// A placeholder without a value is an error rather than being left in the output.
pub fn render_template(template: &str, ctx: &HashMap<String, String>) -> Result<String, ExportError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return Ok(out);
        };
        let name = after[..end].trim();
        let value = ctx
            .get(name)
            .ok_or_else(|| ExportError::MissingPlaceholder(name.to_string()))?;
        out.push_str(value);
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    Ok(out)
}
