//! Module name grammar and identifier casing.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::value_objects::NameGrammar;

static SIMPLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z_$0-9]*$").expect("valid simple grammar"));

// A lone letter is a valid name; otherwise the name may not end with a dot.
static EXTENDED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z]|[A-Za-z](?:[A-Za-z0-9_-]*\.)*[A-Za-z0-9_-]+)$")
        .expect("valid extended grammar")
});

/// Characters that split words when folding a name into PascalCase.
const WORD_SEPARATORS: [char; 3] = ['.', '-', '_'];

/// Check `name` against `grammar`.
///
/// Returns a human-readable reason on failure.
pub fn validate_name(name: &str, grammar: NameGrammar) -> Result<(), String> {
    if name.is_empty() {
        return Err("name can not be empty".into());
    }

    let ok = match grammar {
        NameGrammar::Simple => SIMPLE.is_match(name),
        NameGrammar::Extended => EXTENDED.is_match(name),
    };

    if ok {
        return Ok(());
    }

    Err(match grammar {
        NameGrammar::Simple => {
            "name must start with a letter or '_' and contain only letters, digits, '_' or '$'"
                .into()
        }
        NameGrammar::Extended => {
            "name must start with a letter and contain only letters, digits, '-', '_' or \
             dot-separated segments"
                .into()
        }
    })
}

/// Fold a module name into a PascalCase identifier.
///
/// The first character and every character following `.`, `-` or `_` is
/// uppercased; the separators themselves are dropped.
///
/// | Input                | Output             |
/// |----------------------|--------------------|
/// | `greeting`           | `Greeting`         |
/// | `user-profile.extra` | `UserProfileExtra` |
/// | `order_item`         | `OrderItem`        |
pub fn to_pascal_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = true;

    for ch in name.chars() {
        if WORD_SEPARATORS.contains(&ch) {
            upper_next = true;
            continue;
        }
        if upper_next {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        upper_next = false;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_letter_is_valid_in_both_grammars() {
        assert!(validate_name("a", NameGrammar::Simple).is_ok());
        assert!(validate_name("a", NameGrammar::Extended).is_ok());
        assert_eq!(to_pascal_case("a"), "A");
    }

    #[test]
    fn empty_name_is_rejected() {
        let reason = validate_name("", NameGrammar::Extended).unwrap_err();
        assert!(reason.contains("empty"));
    }

    #[test]
    fn simple_grammar() {
        for ok in ["greeting", "_private", "user$", "Order2"] {
            assert!(validate_name(ok, NameGrammar::Simple).is_ok(), "{ok}");
        }
        for bad in ["2fast", "user-profile", "a.b", "$x"] {
            assert!(validate_name(bad, NameGrammar::Simple).is_err(), "{bad}");
        }
    }

    #[test]
    fn extended_grammar() {
        for ok in [
            "user-profile",
            "user-profile.extra",
            "admin.user_role",
            "ab",
            "a",
            "a..b",
            "user..profile",
        ] {
            assert!(validate_name(ok, NameGrammar::Extended).is_ok(), "{ok}");
        }
        for bad in ["-user", "user.", ".user", "a.", "_x", "user profile", "9lives"] {
            assert!(validate_name(bad, NameGrammar::Extended).is_err(), "{bad}");
        }
    }

    #[test]
    fn pascal_case_folds_separators() {
        assert_eq!(to_pascal_case("user-profile.extra"), "UserProfileExtra");
        assert_eq!(to_pascal_case("order_item"), "OrderItem");
        assert_eq!(to_pascal_case("greeting"), "Greeting");
        assert_eq!(to_pascal_case("alreadyPascal"), "AlreadyPascal");
    }

    #[test]
    fn pascal_case_keeps_dollar() {
        assert_eq!(to_pascal_case("user$"), "User$");
    }

    #[test]
    fn pascal_case_of_only_separators_is_empty() {
        assert_eq!(to_pascal_case("_"), "");
    }
}
