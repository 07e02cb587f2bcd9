use std::io::{self, Write};

use crate::config::{Highlight, RESET};

/// One project per line, in the given order. With `highlight`, the line
/// naming `current` is wrapped in the highlight escapes.
pub fn write_listing(
    out: &mut dyn Write,
    projects: &[String],
    current: &str,
    highlight: Option<&Highlight>,
) -> io::Result<()> {
    for project in projects {
        match highlight {
            Some(hl) if project == current => {
                writeln!(out, "{}{}{project}{RESET}", hl.fg, hl.bg)?
            }
            _ => writeln!(out, "{project}")?,
        }
    }
    Ok(())
}
