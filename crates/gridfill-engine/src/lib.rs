//! gridfill_engine - Grid-independent spreadsheet logic.

pub mod engine;

#[cfg(test)]
mod tests {
    use crate::engine::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    struct Cells(HashMap<CellRef, String>);

    impl Cells {
        fn with(entries: &[(&str, &str)]) -> Self {
            Cells(
                entries
                    .iter()
                    .map(|(name, text)| (CellRef::from_str(name).unwrap(), text.to_string()))
                    .collect(),
            )
        }
    }

    impl CellSource for Cells {
        fn cell_text(&self, cell: &CellRef) -> Option<String> {
            Some(self.0.get(cell).cloned().unwrap_or_default())
        }
    }

    #[test]
    fn test_from_str_columns_and_rows() {
        let cases = [
            ("A1", 0, 0),
            ("Z1", 25, 0),
            ("AA1", 26, 0),
            ("AZ1", 51, 0),
            ("BA1", 52, 0),
            ("b10", 1, 9),
            ("aA1", 26, 0),
            ("ALL1000", 999, 999),
        ];
        for (name, col, row) in cases {
            assert_eq!(CellRef::from_str(name), Some(CellRef::new(col, row)), "{}", name);
        }
    }

    #[test]
    fn test_from_str_invalid_inputs() {
        for name in ["", "123", "ABC", "A0", "1A", "A 1", "A-1"] {
            assert!(CellRef::from_str(name).is_none(), "{:?} should not parse", name);
        }
    }

    #[test]
    fn test_display_round_trip() {
        for name in ["A1", "Z9", "AA10", "ALL1000"] {
            assert_eq!(CellRef::from_str(name).unwrap().to_string(), name);
        }
    }

    #[test]
    fn test_composed_formula_evaluates() {
        let cells = Cells::with(&[("A1", "3"), ("B2", "4"), ("C3", "x")]);
        let formula = compose_formula("sum", &["Sheet1!A1", "B2", "C3"]).unwrap();
        assert_eq!(formula, "=SUM(A1,B2,C3)");
        assert_eq!(evaluate_sum(&formula, &cells), Ok("7".to_string()));
    }

    #[test]
    fn test_header_labels_parse_back() {
        for col in [0, 25, 26, 701, 702, 999] {
            let name = format!("{}{}", column_label(col), row_label(col));
            assert_eq!(CellRef::from_str(&name), Some(CellRef::new(col, col)));
        }
    }
}
