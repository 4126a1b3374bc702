use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref CLONE_SUFFIX: Regex = Regex::new(r"\s*\(\d+\)$").unwrap();
}

/// Strips the `" (3)"` suffix the editor appends to duplicated nodes
pub fn clean_name(name: &str) -> String {
    CLONE_SUFFIX.replace(name, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Crate (3)", "Crate")]
    #[case("Crate(12)", "Crate")]
    #[case("Crate", "Crate")]
    #[case("Crate (3) copy", "Crate (3) copy")]
    #[case("(1)", "")]
    fn test_clean_name(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(clean_name(name), expected);
    }
}
