//! Dice expression parsing and evaluation
//!
//! Expressions follow the usual tabletop shape: `<count>d<sides>` with an
//! optional flat modifier, e.g. "2d20+4", "1d100", "3d6-1".

use std::fmt;

use nom::character::complete::{char, digit1, one_of};
use nom::combinator::{all_consuming, map_res, opt};
use nom::sequence::separated_pair;
use nom::{IResult, Parser};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};

/// Largest dice pool a single expression may request
const MAX_DICE: u32 = 100;

/// Largest die size a single expression may request
const MAX_SIDES: u32 = 1000;

/// A parsed dice expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceExpr {
    pub count: u32,
    pub sides: u32,
    pub modifier: i32,
}

/// Outcome of evaluating a dice expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiceRoll {
    pub total: i32,
    /// Human-readable breakdown, e.g. "[12, 7] + 2 = 21"
    pub explanation: String,
}

fn integer(input: &str) -> IResult<&str, u32> {
    map_res(digit1, str::parse).parse(input)
}

fn modifier(input: &str) -> IResult<&str, i32> {
    let (input, (sign, magnitude)) = (one_of("+-"), integer).parse(input)?;
    let magnitude = magnitude as i32;
    Ok((input, if sign == '-' { -magnitude } else { magnitude }))
}

fn dice_body(input: &str) -> IResult<&str, (u32, u32, Option<i32>)> {
    let (input, ((count, sides), modifier)) =
        (separated_pair(integer, char('d'), integer), opt(modifier)).parse(input)?;
    Ok((input, (count, sides, modifier)))
}

impl DiceExpr {
    /// Parse an expression string
    ///
    /// Any failure is a fatal configuration error: a round cannot continue
    /// with an undefined roll result.
    pub fn parse(expr: &str) -> Result<Self> {
        let malformed = |reason: &str| SimError::MalformedDice {
            expr: expr.to_string(),
            reason: reason.to_string(),
        };

        let (_, (count, sides, modifier)) = all_consuming(dice_body)
            .parse(expr.trim())
            .map_err(|_| malformed("expected <count>d<sides> with optional +N/-N"))?;

        if count == 0 || count > MAX_DICE {
            return Err(malformed("dice count must be within 1..=100"));
        }
        if sides == 0 || sides > MAX_SIDES {
            return Err(malformed("die size must be within 1..=1000"));
        }

        Ok(Self {
            count,
            sides,
            modifier: modifier.unwrap_or(0),
        })
    }

    /// Evaluate the expression against the shared generator
    pub fn roll(&self, rng: &mut ChaCha8Rng) -> DiceRoll {
        let rolls: Vec<i32> = (0..self.count)
            .map(|_| rng.gen_range(1..=self.sides as i32))
            .collect();
        let total: i32 = rolls.iter().sum::<i32>() + self.modifier;

        let faces = rolls
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let explanation = match self.modifier {
            0 => format!("[{}] = {}", faces, total),
            m if m > 0 => format!("[{}] + {} = {}", faces, m, total),
            m => format!("[{}] - {} = {}", faces, -m, total),
        };

        DiceRoll { total, explanation }
    }
}

impl fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.modifier {
            0 => write!(f, "{}d{}", self.count, self.sides),
            m if m > 0 => write!(f, "{}d{}+{}", self.count, self.sides, m),
            m => write!(f, "{}d{}{}", self.count, self.sides, m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_parse_basic_expressions() {
        assert_eq!(
            DiceExpr::parse("2d20+4").unwrap(),
            DiceExpr {
                count: 2,
                sides: 20,
                modifier: 4
            }
        );
        assert_eq!(
            DiceExpr::parse("1d100").unwrap(),
            DiceExpr {
                count: 1,
                sides: 100,
                modifier: 0
            }
        );
        assert_eq!(
            DiceExpr::parse("3d6-1").unwrap(),
            DiceExpr {
                count: 3,
                sides: 6,
                modifier: -1
            }
        );
        // smallest die the demo data uses
        assert_eq!(
            DiceExpr::parse("1d1").unwrap(),
            DiceExpr {
                count: 1,
                sides: 1,
                modifier: 0
            }
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "d6", "2d", "2x20", "2d6+", "2d6 + 1", "0d6", "2d0", "abc", "-1d6"] {
            assert!(
                matches!(DiceExpr::parse(bad), Err(SimError::MalformedDice { .. })),
                "expected '{}' to be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_parse_rejects_absurd_pools() {
        assert!(DiceExpr::parse("101d6").is_err());
        assert!(DiceExpr::parse("1d1001").is_err());
    }

    #[test]
    fn test_roll_within_bounds() {
        let expr = DiceExpr::parse("3d6+2").unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let roll = expr.roll(&mut rng);
            assert!((5..=20).contains(&roll.total));
        }
    }

    #[test]
    fn test_roll_is_deterministic_for_seed() {
        let expr = DiceExpr::parse("2d20+2").unwrap();
        let a = expr.roll(&mut ChaCha8Rng::seed_from_u64(42));
        let b = expr.roll(&mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_explanation_includes_modifier() {
        let expr = DiceExpr::parse("1d1+3").unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let roll = expr.roll(&mut rng);
        assert_eq!(roll.total, 4);
        assert_eq!(roll.explanation, "[1] + 3 = 4");
    }

    #[test]
    fn test_display_round_trips() {
        for expr in ["2d20+2", "1d100", "3d6-1"] {
            assert_eq!(DiceExpr::parse(expr).unwrap().to_string(), expr);
        }
    }
}
