/// Replace `${NAME}` placeholders using `lookup`.
///
/// Unresolvable or malformed placeholders are left as-is.
pub fn substitute_with(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && chars.peek() == Some(&'{') {
            chars.next(); // consume '{'
            let mut var_name = String::new();
            let mut closed = false;
            for c in chars.by_ref() {
                if c == '}' {
                    closed = true;
                    break;
                }
                var_name.push(c);
            }
            if closed && !var_name.is_empty() {
                match lookup(&var_name) {
                    Some(val) => result.push_str(&val),
                    None => {
                        // Unresolved, keep the placeholder as written.
                        result.push_str("${");
                        result.push_str(&var_name);
                        result.push('}');
                    },
                }
            } else {
                // Malformed placeholder, emit literally.
                result.push_str("${");
                result.push_str(&var_name);
            }
        } else {
            result.push(ch);
        }
    }

    result
}

/// Replace `${ENV_VAR}` placeholders in config string values.
pub fn substitute_env(input: &str) -> String {
    substitute_with(input, |name| std::env::var(name).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(name: &str) -> Option<String> {
        (name == "HERALD_TOKEN").then(|| "hello".to_string())
    }

    #[test]
    fn substitutes_known_var() {
        assert_eq!(substitute_with("key=${HERALD_TOKEN}", fixed), "key=hello");
    }

    #[test]
    fn leaves_unknown_var() {
        assert_eq!(
            substitute_with("${HERALD_NONEXISTENT_XYZ}", fixed),
            "${HERALD_NONEXISTENT_XYZ}"
        );
    }

    #[test]
    fn leaves_unclosed_placeholder() {
        assert_eq!(substitute_with("${HERALD_TOKEN", fixed), "${HERALD_TOKEN");
    }

    #[test]
    fn substitutes_multiple_occurrences() {
        assert_eq!(
            substitute_with("${HERALD_TOKEN} and ${HERALD_TOKEN}", fixed),
            "hello and hello"
        );
    }

    #[test]
    fn no_placeholders() {
        assert_eq!(substitute_with("plain text", fixed), "plain text");
    }
}
