/// Convert an identifier to PascalCase.
///
/// Words may be separated by `_` or `-`. Input without separators keeps its
/// interior capitalization and only has its first letter raised, so camelCase
/// and PascalCase names stay stable across repeated conversion.
pub fn to_pascal_case(name: &str) -> String {
    fn is_separator(c: char) -> bool {
        matches!(c, '_' | '-')
    }

    if !name.chars().any(is_separator) {
        let mut chars = name.chars();
        return match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        };
    }

    let mut result = String::with_capacity(name.len());
    let mut capitalize_next = true;
    for c in name.chars() {
        if is_separator(c) {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c.to_ascii_lowercase());
        }
    }
    result
}
