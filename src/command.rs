//! Non-interactive command mode (`gridfill -c "..."`).
//!
//! Commands are separated by `;` and run in order against one sheet. The first
//! failing command stops the script.

use crate::error::{GridfillError, Result};
use gridfill_core::{CellRef, Dimension, FillMode, Selection, Sheet, compose_formula};
use regex::Regex;
use std::io::Write;
use std::sync::OnceLock;

fn set_re() -> &'static Regex {
    static SET_RE: OnceLock<Regex> = OnceLock::new();
    SET_RE.get_or_init(|| {
        Regex::new(r"^(?i:set)\s+(?<cell>\S+)(?:\s(?<value>.*))?$").expect("set command regex must compile")
    })
}

/// Run every command in `script`, writing `print`/`size` output to `out`.
pub fn run_script<W: Write>(sheet: &mut Sheet, script: &str, out: &mut W) -> Result<()> {
    let commands = script.split(';').map(str::trim).filter(|c| !c.is_empty());
    for (i, command) in commands.enumerate() {
        let index = i + 1;
        log::debug!("command {}: {}", index, command);
        run_command(sheet, command, out).map_err(|err| match err {
            GridfillError::Grid(e) => GridfillError::Command {
                index,
                message: e.to_string(),
            },
            GridfillError::Command { message, .. } => GridfillError::Command { index, message },
            other => other,
        })?;
    }
    Ok(())
}

fn run_command<W: Write>(sheet: &mut Sheet, command: &str, out: &mut W) -> Result<()> {
    let mut words = command.split_whitespace();
    let verb = words.next().unwrap_or_default().to_ascii_lowercase();
    let args: Vec<&str> = words.collect();

    match verb.as_str() {
        "set" => {
            let caps = set_re()
                .captures(command)
                .ok_or_else(|| usage("set <cell> <value>"))?;
            let cell = parse_cell(&caps["cell"])?;
            let value = caps.name("value").map_or("", |m| m.as_str());
            sheet.commit_input(cell.row, cell.col, value)?;
        }
        "sum" => {
            let [target, refs @ ..] = args.as_slice() else {
                return Err(usage("sum <target> <cell>..."));
            };
            let target = parse_cell(target)?;
            let refs = refs
                .iter()
                .map(|r| parse_cell(r).map(|c| c.to_string()))
                .collect::<Result<Vec<_>>>()?;
            let formula = compose_formula("SUM", &refs).ok_or_else(|| usage("sum <target> <cell>..."))?;
            sheet.commit_input(target.row, target.col, &formula)?;
        }
        "fill" => {
            let (range, end, mode) = match args.as_slice() {
                [range, end] => (*range, *end, FillMode::Copy),
                [range, end, mode] => (*range, *end, parse_mode(mode)?),
                _ => return Err(usage("fill <range> <end> [copy|series]")),
            };
            let selection = parse_range(range)?;
            let end = parse_cell(end)?;
            let outcome = sheet.autofill(&selection, end, mode)?;
            log::info!("filled {} cells from {}", outcome.filled.len(), selection);
        }
        "merge" => {
            let [range] = args.as_slice() else {
                return Err(usage("merge <range>"));
            };
            sheet.merge(&parse_range(range)?)?;
        }
        "unmerge" => {
            let [cell] = args.as_slice() else {
                return Err(usage("unmerge <cell>"));
            };
            sheet.unmerge(&parse_cell(cell)?);
        }
        "clear" => {
            let [range] = args.as_slice() else {
                return Err(usage("clear <range>"));
            };
            sheet.clear(&parse_range(range)?);
        }
        "grow" => {
            let dim = match args.as_slice() {
                ["rows" | "row"] => Dimension::Row,
                ["cols" | "col" | "columns" | "column"] => Dimension::Column,
                _ => return Err(usage("grow rows|cols")),
            };
            sheet.grow_at_boundary(dim)?;
        }
        "size" => {
            writeln!(out, "{}x{}", sheet.rows(), sheet.cols())?;
        }
        "print" => {
            let [range] = args.as_slice() else {
                return Err(usage("print <range>"));
            };
            for row in sheet.snapshot(&parse_range(range)?)? {
                writeln!(out, "{}", row.join("\t"))?;
            }
        }
        other => {
            return Err(GridfillError::Command {
                index: 0,
                message: format!("unknown command '{}'", other),
            });
        }
    }
    Ok(())
}

fn usage(text: &str) -> GridfillError {
    GridfillError::Command {
        index: 0,
        message: format!("usage: {}", text),
    }
}

fn parse_cell(text: &str) -> Result<CellRef> {
    CellRef::from_str(text).ok_or_else(|| GridfillError::Command {
        index: 0,
        message: format!("invalid cell reference '{}'", text),
    })
}

fn parse_range(text: &str) -> Result<Selection> {
    Selection::parse(text).ok_or_else(|| GridfillError::Command {
        index: 0,
        message: format!("invalid range '{}'", text),
    })
}

fn parse_mode(text: &str) -> Result<FillMode> {
    match text.to_ascii_lowercase().as_str() {
        "copy" => Ok(FillMode::Copy),
        "series" => Ok(FillMode::Series),
        _ => Err(GridfillError::Command {
            index: 0,
            message: format!("unknown fill mode '{}' (expected copy or series)", text),
        }),
    }
}
