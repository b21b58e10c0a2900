//! Chart recommendations.
//!
//! A static, ordered rule table maps column roles and cardinalities onto
//! candidate charts, each with a fixed priority. The engine evaluates every
//! rule, ranks the candidates and keeps the top entries.

mod generator;
mod rules;
mod suggestion;

pub use generator::SuggestionEngine;
pub use rules::{ColumnPartition, RuleContext, SuggestionRule, RULES};
pub use suggestion::{ChartSuggestion, ChartType};
