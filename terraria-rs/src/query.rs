//! The tile match language used by `find`.
//!
//! ```text
//! Expr    := TermSet (';' TermSet){0,3}
//! TermSet := Term (',' Term)*
//! Term    := Number | Number '-' Number | "None" | ""
//! Number  := hex (0x..) | decimal | tile name
//! ```
//!
//! The term sets are matched, in order, against the block id, frame u,
//! frame v and wall id of a cell. A set matches if any of its terms does;
//! an expression matches if every set does. Only cells with a block are
//! tested.

use std::fmt;
use std::str::FromStr;
use terraria_wld::Tile;
use thiserror::Error;

/// Maximum number of term sets: block, u, v, wall.
pub const MAX_TERM_SETS: usize = 4;

/// A syntax error in a match expression.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    /// More than four `;`-separated sets
    #[error("expression has {0} term sets, at most 4 are allowed")]
    TooManyTermSets(usize),
    /// A token that is neither a number, a range, a tile name nor `None`
    #[error("cannot parse term '{0}'")]
    InvalidTerm(String),
    /// A range whose start is above its end
    #[error("range {0}-{1} is empty")]
    EmptyRange(u32, u32),
}

/// One term of a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    /// Matches any value, including an absent one
    Any,
    /// Matches values in `start..=end`
    Range(u32, u32),
}

impl Term {
    fn matches(self, value: Option<u32>) -> bool {
        match self {
            Self::Any => true,
            Self::Range(start, end) => value.is_some_and(|v| (start..=end).contains(&v)),
        }
    }
}

impl FromStr for Term {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token.is_empty() || token.eq_ignore_ascii_case("none") {
            return Ok(Self::Any);
        }

        match token.split_once('-') {
            Some((start, end)) => {
                let start = parse_number(start)?;
                let end = parse_number(end)?;
                if start > end {
                    return Err(QueryError::EmptyRange(start, end));
                }
                Ok(Self::Range(start, end))
            }
            None => {
                let value = parse_number(token)?;
                Ok(Self::Range(value, value))
            }
        }
    }
}

fn parse_number(token: &str) -> Result<u32, QueryError> {
    let token = token.trim();
    let invalid = || QueryError::InvalidTerm(token.to_string());

    if let Some(hex) = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        return u32::from_str_radix(hex, 16).map_err(|_| invalid());
    }
    if token.starts_with(|c: char| c.is_ascii_digit()) {
        return token.parse().map_err(|_| invalid());
    }
    terraria_ids::tile_id(token)
        .map(u32::from)
        .ok_or_else(invalid)
}

/// A parsed match expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    sets: Vec<Vec<Term>>,
}

impl Match {
    /// Whether `tile` matches. Cells without a block never match.
    pub fn matches(&self, tile: &Tile) -> bool {
        let Some(block) = tile.block else {
            return false;
        };
        let values = [
            Some(u32::from(block.id)),
            block.frame.map(|frame| u32::from(frame.u)),
            block.frame.map(|frame| u32::from(frame.v)),
            tile.wall_id().map(u32::from),
        ];

        self.sets
            .iter()
            .zip(values)
            .all(|(terms, value)| terms.iter().any(|term| term.matches(value)))
    }
}

impl FromStr for Match {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(';').collect();
        if parts.len() > MAX_TERM_SETS {
            return Err(QueryError::TooManyTermSets(parts.len()));
        }

        let sets = parts
            .into_iter()
            .map(|part| part.split(',').map(str::parse).collect())
            .collect::<Result<_, _>>()?;
        Ok(Self { sets })
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sets: Vec<String> = self
            .sets
            .iter()
            .map(|terms| {
                terms
                    .iter()
                    .map(|term| match term {
                        Term::Any => "None".to_string(),
                        Term::Range(start, end) if start == end => start.to_string(),
                        Term::Range(start, end) => format!("{start}-{end}"),
                    })
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect();
        f.write_str(&sets.join(";"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use terraria_wld::{Block, Tile, Wall};
    use test_case::test_case;

    #[test_case("21", "21")]
    #[test_case("0x15", "21")]
    #[test_case("Containers", "21")]
    #[test_case("exposed gems,63-68", "178,63-68")]
    #[test_case("21;36;;None", "21;36;None;None")]
    fn test_parse(input: &str, display: &str) {
        let parsed: Match = input.parse().unwrap();
        assert_eq!(parsed.to_string(), display);
    }

    #[test_case("1;2;3;4;5", QueryError::TooManyTermSets(5))]
    #[test_case("Adamantium", QueryError::InvalidTerm("Adamantium".into()))]
    #[test_case("0xZZ", QueryError::InvalidTerm("0xZZ".into()))]
    #[test_case("9-3", QueryError::EmptyRange(9, 3))]
    fn test_syntax_errors(input: &str, expected: QueryError) {
        assert_eq!(input.parse::<Match>().unwrap_err(), expected);
    }

    #[test]
    fn test_matches() {
        let chest = Tile::default()
            .with_block(Block::framed(21, 36, 18))
            .with_wall(Wall::new(4));
        let stone = Tile::default().with_block(Block::new(1));
        let wall_only = Tile::default().with_wall(Wall::new(4));

        let by_id: Match = "21".parse().unwrap();
        assert!(by_id.matches(&chest));
        assert!(!by_id.matches(&stone));

        let by_frame: Match = "21;36-54;18".parse().unwrap();
        assert!(by_frame.matches(&chest));
        let wrong_v: Match = "21;36;0".parse().unwrap();
        assert!(!wrong_v.matches(&chest));

        // An unframed block has no u to compare
        let any_with_u: Match = "0-400;0".parse().unwrap();
        assert!(!any_with_u.matches(&stone));

        let by_wall: Match = ";;;4".parse().unwrap();
        assert!(by_wall.matches(&chest));
        assert!(!by_wall.matches(&wall_only));
    }
}
