//! Interactive text session for recording messages between vehicles
//!
//! The session reads from any `BufRead` and writes to any `Write`, so the same
//! code drives a terminal in the binary and in-memory buffers in tests.

use crate::blockchain::Ledger;
use crate::error::Result;
use crate::messages::{compose, member_at};
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Table};
use std::io::{BufRead, Write};

const MENU: &str = "\nMenu:\n1. Send a message between vehicles\n2. Print the V2V communication blockchain\n3. Exit";

pub struct Session<R, W> {
    ledger: Ledger,
    input: R,
    output: W,
    json: bool,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(ledger: Ledger, input: R, output: W) -> Self {
        Session {
            ledger,
            input,
            output,
            json: false,
        }
    }

    /// Print the chain as JSON instead of a table.
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn into_ledger(self) -> Ledger {
        self.ledger
    }

    /// Registers vehicles, then serves the menu until exit or end of input.
    pub fn run(&mut self) -> Result<()> {
        let count = loop {
            let Some(line) =
                self.prompt("Enter the number of vehicles participating in V2V communication: ")?
            else {
                return Ok(());
            };
            match line.trim().parse::<usize>() {
                Ok(count) => break count,
                Err(_) => writeln!(self.output, "{}", "Please enter a whole number.".red())?,
            }
        };

        for i in 1..=count {
            let Some(name) = self.prompt(&format!("Enter the name of vehicle {}: ", i))? else {
                return Ok(());
            };
            self.ledger.add_member(name.trim());
        }

        loop {
            writeln!(self.output, "{}", MENU)?;
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                break;
            };
            match choice.trim() {
                "1" => self.send_message()?,
                "2" => self.print_chain()?,
                "3" => break,
                _ => writeln!(self.output, "{}", "Invalid choice.".red())?,
            }
        }
        Ok(())
    }

    fn send_message(&mut self) -> Result<()> {
        let members = self.ledger.members().len();

        let Some(sender) = self.prompt_member(&format!(
            "Enter the index of the sender vehicle (1-{}): ",
            members
        ))?
        else {
            return Ok(());
        };
        let Some(recipient) = self.prompt_member(&format!(
            "Enter the index of the recipient vehicle (1-{}): ",
            members
        ))?
        else {
            return Ok(());
        };
        let Some(text) = self.prompt("Enter the message: ")? else {
            return Ok(());
        };

        let message = compose(self.ledger.members(), sender, recipient, &text)?;
        let block = self.ledger.add_record(vec![message]);
        let digest = block.digest().to_string();
        writeln!(self.output, "{} {}", "Block mined:".bright_green(), digest)?;
        Ok(())
    }

    /// Reads a 1-based roster position, reporting invalid ones.
    fn prompt_member(&mut self, prompt: &str) -> Result<Option<usize>> {
        let Some(line) = self.prompt(prompt)? else {
            return Ok(None);
        };
        let Ok(position) = line.trim().parse::<usize>() else {
            writeln!(
                self.output,
                "{}",
                format!("'{}' is not a vehicle index. Please enter a whole number.", line.trim()).red()
            )?;
            return Ok(None);
        };
        match member_at(self.ledger.members(), position) {
            Ok(_) => Ok(Some(position)),
            Err(err) => {
                writeln!(self.output, "{}", err.to_string().red())?;
                Ok(None)
            }
        }
    }

    fn print_chain(&mut self) -> Result<()> {
        if self.json {
            let json = serde_json::to_string_pretty(&self.ledger.snapshot())?;
            writeln!(self.output, "{}", json)?;
            return Ok(());
        }

        writeln!(
            self.output,
            "\n{}",
            "V2V Communication Blockchain Status:".bright_cyan().bold()
        )?;
        match self.ledger.validate() {
            Ok(()) => writeln!(self.output, "Blockchain is valid: {}", "true".green())?,
            Err(err) => writeln!(
                self.output,
                "Blockchain is valid: {} ({})",
                "false".red(),
                err
            )?,
        }

        let mut table = Table::new();
        table.load_preset(UTF8_FULL).set_header(vec![
            Cell::new("Index").add_attribute(Attribute::Bold),
            Cell::new("Timestamp").add_attribute(Attribute::Bold),
            Cell::new("Previous Digest").add_attribute(Attribute::Bold),
            Cell::new("Digest").add_attribute(Attribute::Bold),
            Cell::new("Messages").add_attribute(Attribute::Bold),
        ]);
        for summary in self.ledger.snapshot() {
            let messages = summary
                .payload
                .iter()
                .map(|m| format!("- {}", m))
                .collect::<Vec<_>>()
                .join("\n");
            table.add_row(vec![
                Cell::new(summary.index),
                Cell::new(match summary.timestamp {
                    Some(time) => time.format("%Y-%m-%d %H:%M:%S%.3f UTC").to_string(),
                    None => format!("{} ms", summary.timestamp_ms),
                }),
                Cell::new(summary.previous_digest),
                Cell::new(summary.digest),
                Cell::new(messages),
            ]);
        }
        writeln!(self.output, "{}", table)?;
        Ok(())
    }

    /// Writes `prompt` and reads one line. `None` means end of input.
    fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
