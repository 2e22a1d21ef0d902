//! What the user sees after each attempt: status line plus the numeric and
//! LaTeX regions.

use crate::consts::{
    PLACEHOLDER_EMPTY, PLACEHOLDER_FAILED, PLACEHOLDER_PENDING, STATUS_FAILED, STATUS_SUCCESS,
};
use crate::sanitize::Evaluation;

/// Colour of the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Muted,
    Success,
    Danger,
}

/// Content of one result region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Nothing evaluated yet (or cleared).
    Empty,
    /// A request is in flight.
    Pending,
    /// The last attempt failed.
    Failed,
    Shown(String),
}

impl Output {
    /// Text to print for this region.
    pub fn text(&self) -> &str {
        match self {
            Output::Empty => PLACEHOLDER_EMPTY,
            Output::Pending => PLACEHOLDER_PENDING,
            Output::Failed => PLACEHOLDER_FAILED,
            Output::Shown(s) => s,
        }
    }

    pub fn is_shown(&self) -> bool {
        matches!(self, Output::Shown(_))
    }
}

/// Display state for the calculator.
///
/// Both result regions are only ever written together, so a value is never
/// visible next to a stale or missing LaTeX rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayState {
    pub input: String,
    pub status: String,
    pub tone: Tone,
    pub value: Output,
    pub latex: Output,
    /// Output of the external typesetter, when one ran.
    pub rendered: Option<String>,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            input: String::new(),
            status: String::new(),
            tone: Tone::Muted,
            value: Output::Empty,
            latex: Output::Empty,
            rendered: None,
        }
    }
}

impl DisplayState {
    /// Back to the initial placeholders, input included.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn set_status(&mut self, status: &str, tone: Tone) {
        self.status = status.to_string();
        self.tone = tone;
    }

    pub fn pending(&mut self, status: &str) {
        self.set_status(status, Tone::Muted);
        self.set_outputs(Output::Pending, Output::Pending);
    }

    pub fn succeed(&mut self, evaluation: &Evaluation) {
        self.set_status(STATUS_SUCCESS, Tone::Success);
        self.set_outputs(
            Output::Shown(evaluation.value_text()),
            Output::Shown(evaluation.latex_markup()),
        );
    }

    /// Failure with the generic status message.
    pub fn fail(&mut self) {
        self.fail_with(STATUS_FAILED);
    }

    pub fn fail_with(&mut self, status: &str) {
        self.set_status(status, Tone::Danger);
        self.set_outputs(Output::Failed, Output::Failed);
    }

    fn set_outputs(&mut self, value: Output, latex: Output) {
        self.value = value;
        self.latex = latex;
        self.rendered = None;
    }

    /// Multi-line text block for the terminal.
    pub fn render(&self) -> String {
        let marker = match self.tone {
            Tone::Muted => " ",
            Tone::Success => "✓",
            Tone::Danger => "✗",
        };

        let mut out = String::new();
        if !self.status.is_empty() {
            out.push_str(&format!("  {marker} {}\n", self.status));
        }
        out.push_str(&format!("  result  {}\n", self.value.text()));
        out.push_str(&format!("  latex   {}\n", self.latex.text()));
        if let Some(rendered) = &self.rendered {
            for line in rendered.lines() {
                out.push_str(&format!("          {line}\n"));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn four() -> Evaluation {
        Evaluation {
            resultado: json!(4),
            latex: "2+2=4".to_string(),
        }
    }

    #[test]
    fn default_shows_empty_placeholders() {
        let display = DisplayState::default();
        assert_eq!(display.value.text(), PLACEHOLDER_EMPTY);
        assert_eq!(display.latex.text(), PLACEHOLDER_EMPTY);
        assert!(display.status.is_empty());
    }

    #[test]
    fn succeed_fills_both_regions() {
        let mut display = DisplayState::default();
        display.succeed(&four());
        assert_eq!(display.value, Output::Shown("4".to_string()));
        assert_eq!(display.latex, Output::Shown("$$2+2=4$$".to_string()));
        assert_eq!(display.tone, Tone::Success);
    }

    #[test]
    fn fail_clears_previous_result() {
        let mut display = DisplayState::default();
        display.succeed(&four());
        display.rendered = Some("2 + 2 = 4".to_string());
        display.fail();
        assert_eq!(display.value, Output::Failed);
        assert_eq!(display.latex, Output::Failed);
        assert!(display.rendered.is_none());
        assert_eq!(display.status, STATUS_FAILED);
        assert_eq!(display.tone, Tone::Danger);
    }

    #[test]
    fn pending_marks_both_regions() {
        let mut display = DisplayState::default();
        display.pending("working");
        assert_eq!(display.value.text(), PLACEHOLDER_PENDING);
        assert_eq!(display.latex.text(), PLACEHOLDER_PENDING);
        assert_eq!(display.tone, Tone::Muted);
    }

    #[test]
    fn reset_from_any_state() {
        let mut display = DisplayState {
            input: "2+2".to_string(),
            ..DisplayState::default()
        };
        display.succeed(&four());
        display.reset();
        assert_eq!(display, DisplayState::default());
    }

    #[test]
    fn render_includes_regions() {
        let mut display = DisplayState::default();
        display.succeed(&four());
        let text = display.render();
        assert!(text.contains(STATUS_SUCCESS));
        assert!(text.contains("result  4"));
        assert!(text.contains("latex   $$2+2=4$$"));
    }

    #[test]
    fn render_skips_empty_status() {
        let text = DisplayState::default().render();
        assert_eq!(text.lines().count(), 2);
    }
}
