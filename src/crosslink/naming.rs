//! Client class names derived from service identifiers

const REDUNDANT_PREFIXES: [&str; 2] = ["amazon", "aws"];

/// Split an identifier into words.
///
/// Boundaries: any non-alphanumeric character; a lower-case letter followed by an
/// upper-case letter that is itself followed by a letter or digit ("DynamoDB" ->
/// "Dynamo", "DB"; "IoT" stays whole); and the last capital of an acronym followed by
/// a lower-case letter ("SSOAdmin" -> "SSO", "Admin").
pub fn split_words(identifier: &str) -> Vec<String> {
    let mut words = Vec::new();

    for token in identifier.split(|c: char| !c.is_ascii_alphanumeric()) {
        let chars: Vec<char> = token.chars().collect();
        let mut current = String::new();

        for (i, &c) in chars.iter().enumerate() {
            if i > 0 && !current.is_empty() {
                let prev = chars[i - 1];
                let next = chars.get(i + 1).copied();
                let camel = prev.is_ascii_lowercase()
                    && c.is_ascii_uppercase()
                    && next.map_or(false, |n| n.is_ascii_alphanumeric());
                let acronym_end = prev.is_ascii_uppercase()
                    && c.is_ascii_uppercase()
                    && next.map_or(false, |n| n.is_ascii_lowercase());

                if camel || acronym_end {
                    words.push(std::mem::take(&mut current));
                }
            }
            current.push(c);
        }

        if !current.is_empty() {
            words.push(current);
        }
    }

    words
}

/// Capitalize the first character and lower-case the rest
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(word.len());
            out.push(first.to_ascii_uppercase());
            out.extend(chars.map(|c| c.to_ascii_lowercase()));
            out
        }
        None => String::new(),
    }
}

/// PascalCase service name without a leading "Amazon"/"AWS" ("Amazon DynamoDB" -> "DynamoDb")
pub fn service_name(identifier: &str) -> String {
    let mut words = split_words(identifier);
    if words.len() > 1
        && REDUNDANT_PREFIXES
            .iter()
            .any(|prefix| words[0].eq_ignore_ascii_case(prefix))
    {
        words.remove(0);
    }

    words.iter().map(|w| capitalize(w)).collect()
}

/// Synchronous client class name for a service identifier ("SFN" -> "SfnClient")
pub fn client_class_name(identifier: &str) -> String {
    format!("{}Client", service_name(identifier))
}
