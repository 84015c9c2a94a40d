use crate::table;
use dialoguer::Input;
use fairdice_core::{Die, GameError, GameIo, Result};

/// Interactive terminal backend for the game's I/O seam.
pub struct TerminalIo;

impl TerminalIo {
    pub fn new() -> Self {
        Self
    }
}

impl GameIo for TerminalIo {
    fn prompt(&mut self, text: &str) -> Result<String> {
        let line: String = Input::new()
            .with_prompt(text)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| {
                GameError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    e.to_string(),
                ))
            })?;
        Ok(line)
    }

    fn show(&mut self, text: &str) {
        println!("{text}");
    }

    fn show_matrix(&mut self, dice: &[Die], matrix: &[Vec<Option<f64>>]) {
        table::print_matrix(dice, matrix);
    }
}
