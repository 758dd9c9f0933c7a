use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A repository reference of the form `owner/name`, as supplied on the
/// command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    pub owner: String,
    pub name: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseRepositoryError {
    #[error("expected exactly one '/' separating owner and repository")]
    MalformedReference,

    #[error("invalid or empty owner")]
    EmptyOwner,

    #[error("invalid or empty repository")]
    EmptyRepository,
}

impl FromStr for RepositoryRef {
    type Err = ParseRepositoryError;

    /// Splits a token into exactly two non-empty parts on `/`. Tokens with
    /// zero or more than one `/` are rejected; both parts are trimmed of
    /// surrounding whitespace before the emptiness check.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let mut parts = token.split('/');
        let (Some(owner), Some(name), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ParseRepositoryError::MalformedReference);
        };

        let owner = owner.trim();
        let name = name.trim();

        if owner.is_empty() {
            return Err(ParseRepositoryError::EmptyOwner);
        }
        if name.is_empty() {
            return Err(ParseRepositoryError::EmptyRepository);
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_owner_and_name() {
        let reference: RepositoryRef = "octocat/Hello-World".parse().unwrap();
        assert_eq!(reference.owner, "octocat");
        assert_eq!(reference.name, "Hello-World");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let reference: RepositoryRef = " octocat / Hello-World ".parse().unwrap();
        assert_eq!(reference.owner, "octocat");
        assert_eq!(reference.name, "Hello-World");
    }

    #[test]
    fn rejects_token_without_separator() {
        let result = RepositoryRef::from_str("octocat");
        assert_eq!(result, Err(ParseRepositoryError::MalformedReference));
    }

    #[test]
    fn rejects_token_with_extra_separators() {
        let result = RepositoryRef::from_str("octocat/Hello/World");
        assert_eq!(result, Err(ParseRepositoryError::MalformedReference));
    }

    #[test]
    fn rejects_empty_owner() {
        let result = RepositoryRef::from_str("  /Hello-World");
        assert_eq!(result, Err(ParseRepositoryError::EmptyOwner));
    }

    #[test]
    fn rejects_empty_repository() {
        let result = RepositoryRef::from_str("octocat/  ");
        assert_eq!(result, Err(ParseRepositoryError::EmptyRepository));
    }

    #[test]
    fn displays_as_owner_slash_name() {
        let reference: RepositoryRef = "octocat/Hello-World".parse().unwrap();
        assert_eq!(reference.to_string(), "octocat/Hello-World");
    }
}
