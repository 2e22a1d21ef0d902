//! Cleanup and validation of the model's raw reply.
//!
//! The model is told to answer with a bare JSON object, but it sometimes
//! wraps it in a markdown code fence anyway. [`strip_fences`] removes that
//! wrapper and [`sanitize_and_validate`] turns what is left into an
//! [`Evaluation`], or rejects it as a whole.

use serde_json::Value;
use tracing::{debug, error};

use crate::consts::{MATH_CLOSE, MATH_OPEN};
use crate::error::{EvalError, Result};

const FENCE: &str = "```";

/// A validated model answer.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// The computed value. Any JSON value the model put there.
    pub resultado: Value,
    pub latex: String,
}

impl Evaluation {
    /// The value as it should appear in the numeric region.
    pub fn value_text(&self) -> String {
        match &self.resultado {
            Value::String(s) => s.clone(),
            Value::Number(n) => match n.as_f64() {
                // 4.0 reads as 4
                Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => {
                    format!("{}", f as i64)
                }
                _ => n.to_string(),
            },
            other => other.to_string(),
        }
    }

    /// The LaTeX wrapped in display-math delimiters.
    pub fn latex_markup(&self) -> String {
        format!("{MATH_OPEN}{}{MATH_CLOSE}", self.latex)
    }
}

/// Strip an optional code fence from `raw`.
///
/// When the trimmed text opens with a fence, everything up to and including
/// the first newline is dropped (this removes a language tag such as
/// `json`), then a trailing fence if there is one.
pub fn strip_fences(raw: &str) -> &str {
    let mut text = raw.trim();

    if text.starts_with(FENCE) {
        if let Some(newline) = text.find('\n') {
            text = &text[newline + 1..];
        }
        if let Some(inner) = text.strip_suffix(FENCE) {
            text = inner;
        }
        text = text.trim();
    }

    text
}

/// Strip fences, parse JSON, and check the two-field schema.
pub fn sanitize_and_validate(raw: &str) -> Result<Evaluation> {
    let text = strip_fences(raw);

    let parsed: Value = serde_json::from_str(text).map_err(|e| {
        error!(raw = %text, "model output is not valid JSON");
        EvalError::Parse(e)
    })?;

    let Value::Object(mut fields) = parsed else {
        error!(raw = %text, "model output is not a JSON object");
        return Err(EvalError::ResultSchema);
    };

    let resultado = fields.remove("resultado");
    let latex = fields.remove("latex");

    match (resultado, latex) {
        (Some(resultado), Some(Value::String(latex))) => {
            debug!(%resultado, %latex, "model output validated");
            Ok(Evaluation { resultado, latex })
        }
        _ => {
            error!(raw = %text, "model output is missing 'resultado' or 'latex'");
            Err(EvalError::ResultSchema)
        }
    }
}
