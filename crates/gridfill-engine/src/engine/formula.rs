//! `=SUM(...)` recognition and evaluation.
//!
//! The only formula form understood is a comma-separated list of single-cell
//! references inside `=SUM( )`. Evaluation is a one-shot computation against
//! a [`CellSource`]; no dependency information is retained afterwards.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

use super::cell_ref::{CellRef, letters_to_col};
use super::numeric::parse_sum_operand;

const SUM_PREFIX: &str = "=SUM(";

/// Errors produced while recognizing a formula.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormulaError {
    #[error("Not a formula")]
    NotAFormula,

    #[error("Unparseable formula: {0}")]
    Unparseable(String),
}

/// Read access to cell text for formula evaluation.
pub trait CellSource {
    /// Text at `cell`, or None if the cell lies outside the addressable grid.
    fn cell_text(&self, cell: &CellRef) -> Option<String>;
}

/// A parsed `=SUM(...)` formula.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SumFormula {
    pub refs: Vec<CellRef>,
}

impl SumFormula {
    /// Parse cell text. Leading/trailing whitespace is ignored and the
    /// `=SUM(` prefix is matched case-insensitively. Malformed references
    /// are dropped rather than rejecting the whole formula.
    pub fn parse(text: &str) -> Result<SumFormula, FormulaError> {
        let trimmed = text.trim();
        if !starts_with_sum(trimmed) {
            return Err(FormulaError::NotAFormula);
        }

        let inner = trimmed[SUM_PREFIX.len()..]
            .strip_suffix(')')
            .ok_or_else(|| FormulaError::Unparseable(trimmed.to_string()))?;

        let refs = inner
            .split(',')
            .map(str::trim)
            .filter_map(parse_reference)
            .collect();
        Ok(SumFormula { refs })
    }

    /// Sum every referenced cell holding a non-negative integer literal.
    /// Anything else, including references the source cannot resolve,
    /// contributes zero.
    pub fn evaluate<S: CellSource + ?Sized>(&self, source: &S) -> i64 {
        self.refs
            .iter()
            .filter_map(|cell| source.cell_text(cell))
            .filter_map(|text| parse_sum_operand(&text))
            .fold(0i64, |acc, n| acc.saturating_add(n))
    }
}

/// True if the text is meant to be a SUM formula (well-formed or not).
pub fn is_formula(text: &str) -> bool {
    starts_with_sum(text.trim())
}

/// Parse and evaluate in one step, returning the decimal text to store.
pub fn evaluate_sum<S: CellSource + ?Sized>(text: &str, source: &S) -> Result<String, FormulaError> {
    let formula = SumFormula::parse(text)?;
    let total = formula.evaluate(source);
    log::debug!("evaluated {} over {} refs -> {}", text.trim(), formula.refs.len(), total);
    Ok(total.to_string())
}

/// Build `=NAME(A1,B2,...)` from cell addresses. Sheet qualifiers such as
/// `Sheet1!A1` are stripped. Returns None when no address remains.
pub fn compose_formula<S: AsRef<str>>(function: &str, addresses: &[S]) -> Option<String> {
    let refs: Vec<&str> = addresses
        .iter()
        .map(|a| {
            let a = a.as_ref().trim();
            a.rsplit_once('!').map(|(_, cell)| cell).unwrap_or(a)
        })
        .filter(|a| !a.is_empty())
        .collect();
    if refs.is_empty() {
        return None;
    }
    Some(format!("={}({})", function.trim().to_ascii_uppercase(), refs.join(",")))
}

fn starts_with_sum(text: &str) -> bool {
    text.get(..SUM_PREFIX.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(SUM_PREFIX))
}

fn parse_reference(piece: &str) -> Option<CellRef> {
    let caps = sum_ref_re().captures(piece)?;
    let col = letters_to_col(&caps[1])?;
    let row = caps[2].parse::<usize>().ok()?.checked_sub(1)?;
    Some(CellRef::new(col, row))
}

fn sum_ref_re() -> &'static Regex {
    static SUM_REF_RE: OnceLock<Regex> = OnceLock::new();
    SUM_REF_RE.get_or_init(|| {
        Regex::new(r"^([A-Z]+)([0-9]+)$").expect("SUM reference regex must compile")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    struct MapSource(HashMap<CellRef, String>);

    impl CellSource for MapSource {
        fn cell_text(&self, cell: &CellRef) -> Option<String> {
            if cell.row >= 1000 || cell.col >= 1000 {
                return None;
            }
            Some(self.0.get(cell).cloned().unwrap_or_default())
        }
    }

    fn source(cells: &[(&str, &str)]) -> MapSource {
        MapSource(
            cells
                .iter()
                .map(|(r, v)| (CellRef::from_str(r).unwrap(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_sum_of_two_cells() {
        let src = source(&[("A1", "3"), ("A2", "4")]);
        assert_eq!(evaluate_sum("=SUM(A1,A2)", &src).unwrap(), "7");
    }

    #[test]
    fn test_prefix_is_case_insensitive_and_trimmed() {
        let src = source(&[("B2", "5")]);
        assert_eq!(evaluate_sum("  =sum(B2) ", &src).unwrap(), "5");
    }

    #[test]
    fn test_references_must_be_uppercase() {
        let formula = SumFormula::parse("=SUM(a1, B1)").unwrap();
        assert_eq!(formula.refs, vec![CellRef::new(1, 0)]);
    }

    #[test]
    fn test_malformed_references_are_skipped() {
        let formula = SumFormula::parse("=SUM(A1, 1A, , A0, B2x, C3)").unwrap();
        assert_eq!(formula.refs, vec![CellRef::new(0, 0), CellRef::new(2, 2)]);
    }

    #[test]
    fn test_non_integer_operands_contribute_zero() {
        let src = source(&[("A1", "3"), ("A2", "x"), ("A3", "-2"), ("A4", "1.5")]);
        assert_eq!(evaluate_sum("=SUM(A1,A2,A3,A4)", &src).unwrap(), "3");
    }

    #[test]
    fn test_unresolvable_references_contribute_zero() {
        let src = source(&[("A1", "3")]);
        assert_eq!(evaluate_sum("=SUM(A1,ZZZ5000)", &src).unwrap(), "3");
    }

    #[test]
    fn test_missing_close_paren_is_unparseable() {
        let src = source(&[]);
        assert!(matches!(
            evaluate_sum("=SUM(A1,A2", &src),
            Err(FormulaError::Unparseable(_))
        ));
    }

    #[test]
    fn test_plain_text_is_not_a_formula() {
        let src = source(&[]);
        assert_eq!(evaluate_sum("hello", &src), Err(FormulaError::NotAFormula));
        assert_eq!(evaluate_sum("=A1+A2", &src), Err(FormulaError::NotAFormula));
        assert!(!is_formula("=SU"));
        assert!(is_formula("=sum(A1"));
    }

    #[test]
    fn test_oversized_operand_saturates() {
        let src = source(&[("A1", "99999999999999999999999"), ("A2", "5")]);
        assert_eq!(evaluate_sum("=SUM(A1,A2)", &src).unwrap(), i64::MAX.to_string());
    }

    #[test]
    fn test_empty_sum_is_zero() {
        let src = source(&[]);
        assert_eq!(evaluate_sum("=SUM()", &src).unwrap(), "0");
    }

    #[test]
    fn test_compose_formula_strips_sheet_names() {
        assert_eq!(
            compose_formula("sum", &["Sheet1!A1", "Data!B2", "C3"]).as_deref(),
            Some("=SUM(A1,B2,C3)")
        );
        let none: [&str; 0] = [];
        assert_eq!(compose_formula("SUM", &none), None);
    }
}
