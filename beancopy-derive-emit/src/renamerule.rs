/// Case conversions accepted by `#[bean(rename_all = "...")]`.
///
/// Input is a Rust field name, i.e. `snake_case` (leading underscores and the
/// `r#` prefix are stripped before the rule is applied).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenameRule {
    /// `foo_bar` -> `fooBar`
    CamelCase,
    /// `foo_bar` -> `FooBar`
    PascalCase,
    /// `foo_bar` -> `foo_bar`
    SnakeCase,
    /// `foo_bar` -> `foo-bar`
    KebabCase,
    /// `foo_bar` -> `FOO_BAR`
    ScreamingSnakeCase,
}

impl RenameRule {
    /// All rules, with the spelling used in attributes
    pub const ALL: &'static [(&'static str, RenameRule)] = &[
        ("camelCase", RenameRule::CamelCase),
        ("PascalCase", RenameRule::PascalCase),
        ("snake_case", RenameRule::SnakeCase),
        ("kebab-case", RenameRule::KebabCase),
        ("SCREAMING_SNAKE_CASE", RenameRule::ScreamingSnakeCase),
    ];

    /// Parses the attribute spelling of a rule
    pub fn parse(rule: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .find(|(name, _)| *name == rule)
            .map(|(_, rule)| *rule)
    }

    /// Applies the rule to a field name
    pub fn apply(self, field: &str) -> String {
        let words = field.split('_').filter(|w| !w.is_empty());
        match self {
            RenameRule::SnakeCase => join(words, "_", str::to_lowercase),
            RenameRule::KebabCase => join(words, "-", str::to_lowercase),
            RenameRule::ScreamingSnakeCase => join(words, "_", str::to_uppercase),
            RenameRule::PascalCase => join(words, "", capitalize),
            RenameRule::CamelCase => {
                let mut out = String::new();
                for (i, word) in words.enumerate() {
                    if i == 0 {
                        out.push_str(&word.to_lowercase());
                    } else {
                        out.push_str(&capitalize(word));
                    }
                }
                out
            }
        }
    }
}

fn join<'a>(
    words: impl Iterator<Item = &'a str>,
    sep: &str,
    f: impl Fn(&'a str) -> String,
) -> String {
    words.map(f).collect::<Vec<_>>().join(sep)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_rule_on_a_two_word_field() {
        let cases = [
            (RenameRule::CamelCase, "firstName"),
            (RenameRule::PascalCase, "FirstName"),
            (RenameRule::SnakeCase, "first_name"),
            (RenameRule::KebabCase, "first-name"),
            (RenameRule::ScreamingSnakeCase, "FIRST_NAME"),
        ];
        for (rule, expected) in cases {
            assert_eq!(rule.apply("first_name"), expected, "{rule:?}");
        }
    }

    #[test]
    fn single_words_and_stray_underscores() {
        assert_eq!(RenameRule::CamelCase.apply("id"), "id");
        assert_eq!(RenameRule::PascalCase.apply("id"), "Id");
        assert_eq!(RenameRule::CamelCase.apply("date__of_birth"), "dateOfBirth");
        assert_eq!(RenameRule::KebabCase.apply("x2_y"), "x2-y");
    }

    #[test]
    fn parse_known_spellings_only() {
        assert_eq!(RenameRule::parse("kebab-case"), Some(RenameRule::KebabCase));
        assert_eq!(RenameRule::parse("camelcase"), None);
        assert_eq!(RenameRule::ALL.len(), 5);
    }
}
