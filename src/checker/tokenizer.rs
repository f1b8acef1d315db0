use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How file contents are cut into tokens before checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tokenization {
    /// Split on runs of any whitespace; never yields empty tokens.
    #[default]
    Whitespace,
    /// Turn newlines into spaces and split on every single space. Repeated
    /// spaces yield empty tokens and tabs stay inside tokens.
    SingleSpace,
}

impl Tokenization {
    pub fn tokens<'a>(&self, text: &'a str) -> Vec<std::borrow::Cow<'a, str>> {
        use std::borrow::Cow;

        match self {
            Tokenization::Whitespace => text.split_whitespace().map(Cow::Borrowed).collect(),
            Tokenization::SingleSpace => {
                if !text.contains('\n') {
                    return text.split(' ').map(Cow::Borrowed).collect();
                }
                text.replace('\n', " ")
                    .split(' ')
                    .map(|t| Cow::Owned(t.to_string()))
                    .collect()
            }
        }
    }
}

impl FromStr for Tokenization {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "whitespace" => Ok(Tokenization::Whitespace),
            "single-space" | "single_space" => Ok(Tokenization::SingleSpace),
            _ => Err(format!("Unknown tokenization: {}", s)),
        }
    }
}

impl fmt::Display for Tokenization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tokenization::Whitespace => write!(f, "whitespace"),
            Tokenization::SingleSpace => write!(f, "single-space"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_collapses_runs() {
        let tokens = Tokenization::Whitespace.tokens("Teh  cat\tsat\non\r\nmat ");
        assert_eq!(tokens, vec!["Teh", "cat", "sat", "on", "mat"]);
    }

    #[test]
    fn test_single_space_keeps_quirks() {
        let tokens = Tokenization::SingleSpace.tokens("Teh  cat\tsat\non");
        assert_eq!(tokens, vec!["Teh", "", "cat\tsat", "on"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(Tokenization::Whitespace.tokens("").is_empty());
        assert_eq!(Tokenization::SingleSpace.tokens(""), vec![""]);
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            "single-space".parse::<Tokenization>().unwrap(),
            Tokenization::SingleSpace
        );
        assert!("tabs".parse::<Tokenization>().is_err());
    }
}
