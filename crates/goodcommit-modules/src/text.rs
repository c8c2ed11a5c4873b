//! Sentence-case helpers shared by the text modules.

/// Uppercase the first character.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercase the first character.
pub fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Append a period unless the text already ends with one.
pub fn with_period(s: &str) -> String {
    if s.is_empty() || s.ends_with('.') {
        s.to_string()
    } else {
        format!("{s}.")
    }
}

/// Capitalized and terminated with a period.
pub fn sentence(s: &str) -> String {
    with_period(&capitalize(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn capitalizes_multibyte_first_char() {
        assert_eq!(capitalize("élan"), "Élan");
        assert_eq!(decapitalize("Add widget"), "add widget");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn period_is_not_doubled() {
        assert_eq!(with_period("done"), "done.");
        assert_eq!(with_period("done."), "done.");
        assert_eq!(with_period(""), "");
    }

    #[test]
    fn sentence_combines_both() {
        assert_eq!(sentence("fixes the cache"), "Fixes the cache.");
    }

    proptest! {
        #[test]
        fn sentence_is_idempotent(s in "[a-zA-Z .]{0,40}") {
            let once = sentence(&s);
            prop_assert_eq!(sentence(&once), once);
        }
    }
}
