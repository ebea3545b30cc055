// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Console interaction with the operator.

use std::io::{BufRead, Write};

use chrono::Local;
use replq_core::{BatchResult, FinalTally};

use crate::display;
use crate::drain::DrainObserver;

/// Ask a yes/no question. An empty answer picks `default`.
///
/// Only "y" (any case, surrounding whitespace ignored) counts as yes. End of
/// input counts as the default.
pub fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
    default: bool,
) -> std::io::Result<bool> {
    let hint = if default { "y" } else { "n" };
    write!(output, "\n{} [{}]? >", question, hint)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim();
    if answer.is_empty() {
        return Ok(default);
    }
    Ok(answer.eq_ignore_ascii_case("y"))
}

/// Prints drain progress and asks whether to continue.
pub struct ConsoleOperator<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleOperator<R, W> {
    pub fn new(input: R, output: W) -> Self {
        ConsoleOperator { input, output }
    }

    /// Ask before the first cycle. Defaults to yes.
    pub fn confirm_start(&mut self) -> std::io::Result<bool> {
        ask(&mut self.input, &mut self.output, "Start queue processing", true)
    }

    fn print(&mut self, text: &str) {
        // Losing progress output must not abort the drain
        if let Err(e) = writeln!(self.output, "\n{}", text) {
            tracing::debug!(error = %e, "failed to write progress");
        }
    }
}

impl<R: BufRead, W: Write> DrainObserver for ConsoleOperator<R, W> {
    fn on_cycle(&mut self, cycle: u32, result: &BatchResult) {
        self.print(&display::format_cycle(cycle, Local::now(), result));
        if !result.empty && result.remaining() > 0 {
            self.print(&format!("\t{}", display::format_continue(result.remaining())));
        }
    }

    fn on_reconciled(&mut self, tally: &FinalTally, progressed: bool) {
        self.print(&display::format_final_tally(tally));
        if !progressed {
            self.print("No transactions completed since the last check");
        }
    }

    fn confirm_continue(&mut self, _tally: &FinalTally) -> std::io::Result<bool> {
        ask(&mut self.input, &mut self.output, "Continue queue processing", false)
    }
}

#[cfg(test)]
#[path = "operator_tests.rs"]
mod tests;
