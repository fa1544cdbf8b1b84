//! Title search query construction.

/// Turn a free-text search term into a `to_tsquery` expression.
///
/// Words are split on anything that is not alphanumeric and must all match.
/// The last word matches as a prefix, so a partly typed title still finds
/// its record. Returns `None` when the term holds no words.
#[must_use]
pub fn prefix_tsquery(term: &str) -> Option<String> {
    let mut words: Vec<String> = term
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect();

    let last = words.pop()?;
    words.push(format!("{last}:*"));

    Some(words.join(" & "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_word_is_prefix() {
        assert_eq!(prefix_tsquery("past").as_deref(), Some("past:*"));
        assert_eq!(
            prefix_tsquery("Morning rou").as_deref(),
            Some("morning & rou:*")
        );
    }

    #[test]
    fn test_operators_are_stripped() {
        assert_eq!(
            prefix_tsquery("hook's & (reel) | !cut:*").as_deref(),
            Some("hook & s & reel & cut:*")
        );
    }

    #[test]
    fn test_no_words() {
        assert_eq!(prefix_tsquery(""), None);
        assert_eq!(prefix_tsquery("  !! & "), None);
    }
}
