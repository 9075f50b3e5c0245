use crate::freecell::FREE_CELLS;
use crate::session::Variant;

/// All commands a player can issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Deal from the stock, or restore it when it has run out.
    Draw,
    /// Move the waste's top card to a column.
    WasteToColumn { dst: usize },
    /// Move cards between columns. Klondike finds the pile to move by itself
    /// and ignores `count`; Freecell moves the top `count` cards.
    ColumnToColumn { src: usize, count: usize, dst: usize },
    /// Move the waste's top card to its foundation.
    WasteToFoundation,
    /// Move the top card of a column to its foundation.
    ColumnToFoundation { src: usize },
    /// Turn a face-down top card face-up.
    Flip { col: usize },
    /// Park the top card of a column in a free cell.
    ColumnToFreeCell { src: usize },
    /// Move the card in a free cell to a column.
    FreeCellToColumn { cell: usize, dst: usize },
    /// Move the card in a free cell to its foundation.
    FreeCellToFoundation { cell: usize },
    /// Give up and deal a new game.
    NewGame,
    /// Quit the game.
    Quit,
    /// Print help.
    Help,
}

/// Parse a single line of text input into a `Command`.
///
/// Column indices are checked against `variant`'s column count, so a parsed
/// command never names a pile that does not exist.
///
/// Syntax reference (case-insensitive):
/// ```text
/// d | draw                  -- Deal from stock / restore stock
/// wc <col>                  -- Waste → column
/// wf                        -- Waste → foundation
/// cc <src> <dst>            -- Column → column
/// cc <src>:<n> <dst>        -- Move the top n cards (Freecell only)
/// ctf <col>                 -- Column top → foundation
/// flip <col>                -- Turn a face-down top card over
/// cf <col>                  -- Column top → free cell
/// fc <cell> <col>           -- Free cell → column
/// ftf <cell>                -- Free cell → foundation
/// new                       -- New game
/// quit | q                  -- Quit
/// help | h | ?              -- Help
/// ```
pub fn parse_command(input: &str, variant: Variant) -> Result<Command, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty input".to_string());
    }

    let tokens: Vec<&str> = input.split_whitespace().collect();
    let cmd = tokens[0].to_lowercase();
    let columns = variant.columns();

    match cmd.as_str() {
        "d" | "draw" => Ok(Command::Draw),
        "wc" => {
            if tokens.len() < 2 {
                return Err("Usage: wc <col>".to_string());
            }
            Ok(Command::WasteToColumn {
                dst: parse_col_idx(tokens[1], columns)?,
            })
        }
        "wf" => Ok(Command::WasteToFoundation),
        "cc" => {
            if tokens.len() < 3 {
                return Err("Usage: cc <src[:<n>]> <dst>".to_string());
            }
            let dst = parse_col_idx(tokens[2], columns)?;
            // "3:2" means the top two cards of column 3.
            if let Some((col_part, count_part)) = tokens[1].split_once(':') {
                if variant == Variant::Klondike {
                    return Err("Klondike moves the pile that fits; use cc <src> <dst>".to_string());
                }
                let src = parse_col_idx(col_part, columns)?;
                let count: usize = count_part
                    .parse()
                    .map_err(|_| format!("'{}' is not a valid card count", count_part))?;
                if count == 0 {
                    return Err("Card count must be at least 1".to_string());
                }
                Ok(Command::ColumnToColumn { src, count, dst })
            } else {
                let src = parse_col_idx(tokens[1], columns)?;
                Ok(Command::ColumnToColumn { src, count: 1, dst })
            }
        }
        "ctf" => {
            if tokens.len() < 2 {
                return Err("Usage: ctf <col>".to_string());
            }
            Ok(Command::ColumnToFoundation {
                src: parse_col_idx(tokens[1], columns)?,
            })
        }
        "flip" | "f" => {
            if tokens.len() < 2 {
                return Err("Usage: flip <col>".to_string());
            }
            Ok(Command::Flip {
                col: parse_col_idx(tokens[1], columns)?,
            })
        }
        "cf" => {
            if tokens.len() < 2 {
                return Err("Usage: cf <col>".to_string());
            }
            Ok(Command::ColumnToFreeCell {
                src: parse_col_idx(tokens[1], columns)?,
            })
        }
        "fc" => {
            if tokens.len() < 3 {
                return Err("Usage: fc <cell> <col>".to_string());
            }
            Ok(Command::FreeCellToColumn {
                cell: parse_cell_idx(tokens[1])?,
                dst: parse_col_idx(tokens[2], columns)?,
            })
        }
        "ftf" => {
            if tokens.len() < 2 {
                return Err("Usage: ftf <cell>".to_string());
            }
            Ok(Command::FreeCellToFoundation {
                cell: parse_cell_idx(tokens[1])?,
            })
        }

        "new" | "n" => Ok(Command::NewGame),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        "help" | "h" | "?" => Ok(Command::Help),
        _ => Err(format!("Unknown command '{}'. Type 'help' for help.", tokens[0])),
    }
}

fn parse_col_idx(s: &str, columns: usize) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid column index", s))?;
    if n >= columns {
        return Err(format!("Column index {} out of range (0–{})", n, columns - 1));
    }
    Ok(n)
}

fn parse_cell_idx(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid free-cell index", s))?;
    if n >= FREE_CELLS {
        return Err(format!(
            "Free-cell index {} out of range (0–{})",
            n,
            FREE_CELLS - 1
        ));
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_moves() {
        assert_eq!(parse_command("D", Variant::Klondike), Ok(Command::Draw));
        assert_eq!(
            parse_command("  wc 6 ", Variant::Klondike),
            Ok(Command::WasteToColumn { dst: 6 })
        );
        assert_eq!(
            parse_command("cc 1 4", Variant::Klondike),
            Ok(Command::ColumnToColumn { src: 1, count: 1, dst: 4 })
        );
        assert_eq!(
            parse_command("cc 7:3 0", Variant::Freecell),
            Ok(Command::ColumnToColumn { src: 7, count: 3, dst: 0 })
        );
        assert_eq!(
            parse_command("fc 3 2", Variant::Freecell),
            Ok(Command::FreeCellToColumn { cell: 3, dst: 2 })
        );
        assert_eq!(parse_command("FLIP 2", Variant::Klondike), Ok(Command::Flip { col: 2 }));
        assert_eq!(parse_command("?", Variant::Klondike), Ok(Command::Help));
    }

    #[test]
    fn column_range_depends_on_variant() {
        assert!(parse_command("ctf 7", Variant::Klondike).is_err());
        assert_eq!(
            parse_command("ctf 7", Variant::Freecell),
            Ok(Command::ColumnToFoundation { src: 7 })
        );
        assert!(parse_command("cf 8", Variant::Freecell).is_err());
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(parse_command("", Variant::Klondike).is_err());
        assert!(parse_command("cc 1", Variant::Klondike).is_err());
        assert!(parse_command("cc x 1", Variant::Klondike).is_err());
        assert!(parse_command("cc 1:0 2", Variant::Freecell).is_err());
        assert!(parse_command("cc 1:3 2", Variant::Klondike).is_err());
        assert!(parse_command("ftf 4", Variant::Freecell).is_err());
        assert!(parse_command("shuffle", Variant::Klondike).is_err());
    }
}
