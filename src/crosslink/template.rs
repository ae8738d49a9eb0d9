use crate::error::{ChangelogError, Result};
use regex::{Captures, Regex};
use std::collections::{BTreeMap, HashMap};

pub const UID_SERVICE_MAPPING: &str = "UID_SERVICE_MAPPING";
pub const SERVICE_CLIENT_MAPPING: &str = "SERVICE_CLIENT_MAPPING";

/// Render a table as JavaScript object members: `"key": "value"` joined by `,\n`
pub fn render_mapping(table: &BTreeMap<String, String>) -> String {
    table
        .iter()
        .map(|(key, value)| format!("\"{}\": \"{}\"", escape_js(key), escape_js(value)))
        .collect::<Vec<_>>()
        .join(",\n")
}

fn escape_js(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Substitute `${NAME}` placeholders in `template`.
///
/// Every name in `values` must occur at least once; placeholders with no value are
/// left as they are.
pub fn fill_template(template: &str, values: &HashMap<&str, String>) -> Result<String> {
    let placeholder = Regex::new(r"\$\{([A-Z][A-Z0-9_]*)\}")
        .map_err(|e| ChangelogError::template(format!("invalid placeholder pattern: {}", e)))?;

    for name in values.keys() {
        if !placeholder
            .captures_iter(template)
            .any(|caps| &caps[1] == *name)
        {
            return Err(ChangelogError::template(format!(
                "placeholder ${{{}}} not found in template",
                name
            )));
        }
    }

    let filled = placeholder.replace_all(template, |caps: &Captures| {
        values
            .get(&caps[1])
            .cloned()
            .unwrap_or_else(|| caps[0].to_string())
    });
    Ok(filled.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_mapping() {
        let mut table = BTreeMap::new();
        table.insert("sqs".to_string(), "SqsClient".to_string());
        table.insert("dynamodb".to_string(), "DynamoDbClient".to_string());

        assert_eq!(
            render_mapping(&table),
            "\"dynamodb\": \"DynamoDbClient\",\n\"sqs\": \"SqsClient\""
        );
    }

    #[test]
    fn test_render_mapping_escapes_quotes() {
        let mut table = BTreeMap::new();
        table.insert("a\"b".to_string(), "c\\d".to_string());
        assert_eq!(render_mapping(&table), r#""a\"b": "c\\d""#);
    }

    #[test]
    fn test_fill_template() {
        let template = concat!(
            "var a = { ${UID_SERVICE_MAPPING} };\n",
            "var b = { ${SERVICE_CLIENT_MAPPING} };\n",
            "${OTHER}"
        );
        let mut values = HashMap::new();
        values.insert(UID_SERVICE_MAPPING, "\"x\": \"y\"".to_string());
        values.insert(SERVICE_CLIENT_MAPPING, String::new());

        let filled = fill_template(template, &values).unwrap();
        let expected = "var a = { \"x\": \"y\" };\nvar b = {  };\n${OTHER}";
        assert_eq!(filled, expected);
    }

    #[test]
    fn test_fill_template_value_with_dollar_sign() {
        let mut values = HashMap::new();
        values.insert(UID_SERVICE_MAPPING, "$1 ${X}".to_string());
        assert_eq!(
            fill_template("[${UID_SERVICE_MAPPING}]", &values).unwrap(),
            "[$1 ${X}]"
        );
    }

    #[test]
    fn test_missing_placeholder_is_an_error() {
        let mut values = HashMap::new();
        values.insert(SERVICE_CLIENT_MAPPING, String::new());

        let err = fill_template("<html></html>", &values).unwrap_err();
        assert!(err.to_string().contains("SERVICE_CLIENT_MAPPING"));
    }
}
