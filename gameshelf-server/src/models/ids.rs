//! Typed row identifiers

use std::fmt;

use serde::Serialize;

use super::ValidationError;

/// Primary key of a `games` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct GameId(i32);

impl GameId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    /// Parse an id taken from a request path.
    ///
    /// Surrounding whitespace is ignored and a leading `+`/`-` sign is
    /// accepted. Anything else that is not a 32-bit integer is rejected.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        parse_i32(raw).map(Self)
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Primary key of an `image` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ImageId(i32);

impl ImageId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        parse_i32(raw).map(Self)
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

fn parse_i32(raw: &str) -> Result<i32, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::InvalidId { field: "id" });
    }
    trimmed
        .parse::<i32>()
        .map_err(|_| ValidationError::InvalidId { field: "id" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_integers() {
        assert_eq!(GameId::parse("1").unwrap().get(), 1);
        assert_eq!(GameId::parse(" 42 ").unwrap().get(), 42);
        assert_eq!(ImageId::parse("+7").unwrap().get(), 7);
    }

    #[test]
    fn rejects_non_numeric() {
        for raw in ["", "   ", "abc", "12abc", "1.5", "1e3", "0x1A", "99999999999"] {
            assert_eq!(
                GameId::parse(raw),
                Err(ValidationError::InvalidId { field: "id" }),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn serializes_as_number() {
        let json = serde_json::to_string(&ImageId::new(7)).unwrap();
        assert_eq!(json, "7");
    }
}
