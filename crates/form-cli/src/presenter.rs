use std::fmt::Write;

use form_spec::{RenderPayload, ValueMap};

use crate::command::CommandParseError;

/// Controls which bits of state the shell prints.
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum Verbosity {
    /// Clean output: the rendered form only.
    Clean,
    /// Verbose output: status lines and parse expectations.
    Verbose,
}

impl Verbosity {
    pub fn from_verbose(verbose: bool) -> Self {
        if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Clean
        }
    }

    pub fn is_verbose(&self) -> bool {
        matches!(self, Verbosity::Verbose)
    }
}

/// Prints shell output around the rendered form.
pub struct ShellPresenter {
    verbosity: Verbosity,
    header_printed: bool,
    show_values_json: bool,
}

impl ShellPresenter {
    pub fn new(verbosity: Verbosity, show_values_json: bool) -> Self {
        Self {
            verbosity,
            header_printed: false,
            show_values_json,
        }
    }

    pub fn show_header(&mut self) {
        if self.header_printed {
            return;
        }
        println!("Dynamic form builder. Type help for the command list.");
        self.header_printed = true;
    }

    pub fn show_status(&self, payload: &RenderPayload) {
        if self.verbosity.is_verbose() {
            println!(
                "Status: {} fields, {}",
                payload.rows.len(),
                if payload.editing { "editing" } else { "idle" }
            );
        }
    }

    pub fn show_help(&self) {
        println!("Commands:");
        println!("  add <label> | <placeholder> | <text|radio>   append a field");
        println!("  label <index>        edit a field label (type the text, then submit)");
        println!("  placeholder <index>  edit a field placeholder");
        println!("  menu <index>         toggle a row's action menu");
        println!("  delete <index>       remove a field");
        println!("  move <from> <to>     drag a row to a new position");
        println!("  fill <index> <text>  enter a value into a field");
        println!("  show                 redraw the form");
        println!("  submit               commit the current edit, or emit the values");
        println!("  quit                 leave the shell");
    }

    pub fn show_notice(&self, message: &str) {
        eprintln!("{}", message);
    }

    pub fn show_parse_error(&self, error: &CommandParseError) {
        eprintln!("Invalid command: {}", error.user_message);
        if let Some(debug) = &error.debug_message {
            eprintln!("  Expected: {}", debug);
        }
    }

    /// The deferred scroll request drained after a render pass.
    pub fn show_focus(&self, index: usize) {
        println!("Scrolled row {} into view.", index);
    }

    pub fn show_completion(&self, values: &ValueMap) {
        println!("Form values captured ✅");
        match values.to_cbor() {
            Ok(bytes) => {
                println!("Values (CBOR hex): {}", encode_hex(&bytes));
            }
            Err(err) => {
                eprintln!("Failed to serialize values to CBOR: {}", err);
            }
        }
        if self.show_values_json {
            match values.to_json_pretty() {
                Ok(pretty) => println!("{}", pretty),
                Err(err) => {
                    eprintln!("Failed to serialize values to JSON: {}", err);
                }
            }
        }
    }
}

fn encode_hex(bytes: &[u8]) -> String {
    let mut encoded = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        write!(&mut encoded, "{:02x}", byte).expect("writing to string cannot fail");
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_hex_formats_bytes() {
        assert_eq!(encode_hex(&[0x00, 0xab, 0x10]), "00ab10");
        assert_eq!(encode_hex(&[]), "");
    }
}
