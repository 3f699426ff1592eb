use std::collections::VecDeque;
use std::io::{BufRead, Write};

use crate::error::AppError;
use crate::stamp::{DialogEvent, Key, Prompt};

/// Line-based prompt: the field is shown pre-filled, the operator types a
/// pattern and presses Enter. End of input dismisses the prompt.
pub(crate) struct LinePrompt<R, W> {
    input: R,
    output: W,
    pending: VecDeque<DialogEvent>,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub(crate) fn new(input: R, output: W) -> Self {
        LinePrompt {
            input,
            output,
            pending: VecDeque::new(),
        }
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn next_event(&mut self, current: &str) -> Result<DialogEvent, AppError> {
        if let Some(event) = self.pending.pop_front() {
            return Ok(event);
        }

        write!(self.output, "Format string [{current}]: ")
            .and_then(|()| self.output.flush())
            .map_err(AppError::Prompt)?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(AppError::Prompt)?;
        if read == 0 {
            return Ok(DialogEvent::Dismiss);
        }

        let typed = line.trim_end_matches(['\n', '\r']);
        if typed.is_empty() {
            // Enter on the untouched field keeps the pre-filled pattern.
            return Ok(DialogEvent::KeyPress(Key::Enter));
        }
        self.pending.push_back(DialogEvent::KeyPress(Key::Enter));
        Ok(DialogEvent::Input(typed.to_string()))
    }

    fn close(&mut self) {
        let _ = self.output.flush();
    }
}

/// Non-interactive prompt for a pattern given up front: fills the field and
/// presses the submit button.
#[derive(Debug)]
pub(crate) struct SubmitPrompt {
    pattern: Option<String>,
}

impl SubmitPrompt {
    pub(crate) fn new(pattern: String) -> Self {
        SubmitPrompt {
            pattern: Some(pattern),
        }
    }
}

impl Prompt for SubmitPrompt {
    fn next_event(&mut self, _current: &str) -> Result<DialogEvent, AppError> {
        Ok(match self.pattern.take() {
            Some(pattern) => DialogEvent::Input(pattern),
            None => DialogEvent::Submit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompt(input: &str) -> LinePrompt<Cursor<Vec<u8>>, Vec<u8>> {
        LinePrompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn typed_line_becomes_input_then_enter() {
        let mut p = prompt("HH:mm\n");
        assert_eq!(
            p.next_event("YYYY").unwrap(),
            DialogEvent::Input("HH:mm".to_string())
        );
        assert_eq!(p.next_event("HH:mm").unwrap(), DialogEvent::KeyPress(Key::Enter));
        assert_eq!(String::from_utf8(p.output).unwrap(), "Format string [YYYY]: ");
    }

    #[test]
    fn empty_line_confirms_prefill() {
        let mut p = prompt("\r\n");
        assert_eq!(p.next_event("YYYY").unwrap(), DialogEvent::KeyPress(Key::Enter));
    }

    #[test]
    fn end_of_input_dismisses() {
        let mut p = prompt("");
        assert_eq!(p.next_event("YYYY").unwrap(), DialogEvent::Dismiss);
    }

    #[test]
    fn submit_prompt_fills_then_submits() {
        let mut p = SubmitPrompt::new("Do MMMM".to_string());
        assert_eq!(
            p.next_event("").unwrap(),
            DialogEvent::Input("Do MMMM".to_string())
        );
        assert_eq!(p.next_event("Do MMMM").unwrap(), DialogEvent::Submit);
    }
}
