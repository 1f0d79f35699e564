//! Interactive prompts that collect a decision from a terminal.
//!
//! Answers are collected as text and handed to the gateway untouched;
//! parsing and validation of numbers happens there.

use std::io::{self, BufRead, Write};

use serde_json::{json, Value};
use thiserror::Error;

/// Errors raised while prompting.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Input ended while waiting for {prompt}")]
    UnexpectedEof { prompt: String },

    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Asks for alternatives, criteria, weights and scores.
pub struct DecisionPrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> DecisionPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Runs the full interview and returns raw gateway input.
    pub fn gather(&mut self) -> Result<Value, PromptError> {
        let title = self.ask("Decision title (optional)")?;

        writeln!(self.output, "Enter alternatives, one per line (blank line to finish):")?;
        let alternatives = self.ask_list("Alternative")?;

        writeln!(self.output, "Enter criteria, one per line (blank line to finish):")?;
        let criterion_names = self.ask_list("Criterion")?;

        let mut criteria = Vec::with_capacity(criterion_names.len());
        for name in &criterion_names {
            let weight = self.ask(&format!("Weight for '{}'", name))?;
            criteria.push(json!({ "name": name, "weight": weight }));
        }

        let mut scores = Vec::with_capacity(alternatives.len() * criterion_names.len());
        for alternative in &alternatives {
            for criterion in &criterion_names {
                let value = self.ask(&format!("Score of '{}' on '{}'", alternative, criterion))?;
                scores.push(json!({
                    "alternative": alternative,
                    "criterion": criterion,
                    "value": value,
                }));
            }
        }

        let mut raw = json!({
            "criteria": criteria,
            "alternatives": alternatives,
            "scores": scores,
        });
        if !title.is_empty() {
            raw["title"] = Value::String(title);
        }
        Ok(raw)
    }

    /// Prints a prompt and reads one trimmed line.
    fn ask(&mut self, prompt: &str) -> Result<String, PromptError> {
        write!(self.output, "{}: ", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::UnexpectedEof {
                prompt: prompt.to_string(),
            });
        }
        Ok(line.trim().to_string())
    }

    /// Reads entries until a blank line.
    fn ask_list(&mut self, label: &str) -> Result<Vec<String>, PromptError> {
        let mut entries = Vec::new();
        loop {
            let entry = self.ask(&format!("{} #{}", label, entries.len() + 1))?;
            if entry.is_empty() {
                return Ok(entries);
            }
            entries.push(entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gateway::InputTransformer;
    use crate::domain::matrix::DecisionMatrix;

    fn gather(script: &str) -> Result<Value, PromptError> {
        let mut output = Vec::new();
        DecisionPrompter::new(script.as_bytes(), &mut output).gather()
    }

    #[test]
    fn collects_a_complete_decision() {
        let script = "Laptop\nA\nB\n\nCost\nQuality\n\n0.5\n0.5\n8\n4\n4\n8\n";
        let raw = gather(script).unwrap();

        assert_eq!(raw["title"], "Laptop");
        assert_eq!(raw["alternatives"], json!(["A", "B"]));
        assert_eq!(raw["criteria"][1], json!({"name": "Quality", "weight": "0.5"}));
        assert_eq!(
            raw["scores"][1],
            json!({"alternative": "A", "criterion": "Quality", "value": "4"})
        );

        let matrix = DecisionMatrix::new(InputTransformer::transform(&raw).unwrap()).unwrap();
        assert_eq!(matrix.score("B", "Quality"), Some(8.0));
    }

    #[test]
    fn blank_title_is_omitted() {
        let raw = gather("\nA\n\nCost\n\n1\n3\n").unwrap();
        assert!(raw.get("title").is_none());
    }

    #[test]
    fn early_eof_names_the_prompt() {
        match gather("Laptop\nA\n\nCost\n\n") {
            Err(PromptError::UnexpectedEof { prompt }) => assert_eq!(prompt, "Weight for 'Cost'"),
            other => panic!("Expected UnexpectedEof, got {:?}", other),
        }
    }

    #[test]
    fn prompts_are_written_to_output() {
        let mut output = Vec::new();
        DecisionPrompter::new("\nA\n\nCost\n\n1\n3\n".as_bytes(), &mut output)
            .gather()
            .unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Alternative #1: "));
        assert!(text.contains("Score of 'A' on 'Cost': "));
    }
}
