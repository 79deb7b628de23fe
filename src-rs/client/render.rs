use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

use crate::analysis::AnalysisResult;

#[derive(Debug, Error)]
#[error("unexpected analysis shape: {0}")]
pub struct RenderError(#[from] serde_json::Error);

/// The two result lists plus whether the results panel is shown
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResultsView {
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub visible: bool,
}

impl ResultsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.visible = false;
        self.pros.clear();
        self.cons.clear();
    }

    /// Replaces the lists with `data.analysis` and reveals the panel.
    /// Missing lists render as empty; a missing `analysis` key is an error.
    pub fn render(&mut self, data: &Value) -> Result<(), RenderError> {
        self.pros.clear();
        self.cons.clear();

        let result = AnalysisResult::deserialize(data)?;
        self.pros.extend(result.analysis.pros);
        self.cons.extend(result.analysis.cons);
        self.visible = true;
        Ok(())
    }
}

impl fmt::Display for ResultsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.visible {
            return Ok(());
        }
        writeln!(f, "Pros:")?;
        for item in &self.pros {
            writeln!(f, "  + {}", item)?;
        }
        writeln!(f, "Cons:")?;
        for item in &self.cons {
            writeln!(f, "  - {}", item)?;
        }
        Ok(())
    }
}
