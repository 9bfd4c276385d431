//! Mask rule configuration and compilation
//!
//! Raw rule specs mirror the configuration document one to one (`serde`
//! structs with every field optional except the target). Compilation turns
//! them into [`MaskRule`]s: the masking kind is resolved (including the
//! legacy `pattern: email` alias), regexes are compiled, and path
//! expressions are parsed. Everything that can be rejected is rejected
//! here, before any record is processed.

use crate::tree::PathExpr;
use regex::Regex;
use rowmask_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Masking strategy with its parameters.
///
/// A closed sum type: one variant per supported kind, plus `Passthrough`,
/// the explicit identity transform that unrecognized kind names compile to.
#[derive(Debug, Clone)]
pub enum MaskKind {
    /// Replace the whole value with a run of redaction characters
    Full { length: Option<usize> },

    /// Redact the local part of an email address, keep `@domain`
    Email { length: Option<usize> },

    /// Collapse every regex match to a single redaction character
    Regex { pattern: Regex },

    /// Redact the half-open character range `[start, end)`
    Substring {
        start: Option<i64>,
        end: Option<i64>,
        length: Option<usize>,
    },

    /// Identity transform for unrecognized kind names
    Passthrough,
}

/// A compiled rule for one target column
#[derive(Debug, Clone)]
pub struct MaskRule {
    /// Target column name
    pub column: String,

    /// Strategy applied to scalar columns
    pub kind: MaskKind,

    /// For JSON columns: path rules applied sequentially, in configured order
    pub paths: Vec<PathRule>,
}

/// A compiled rule for one path inside a JSON column
#[derive(Debug, Clone)]
pub struct PathRule {
    /// Compiled path expression
    pub path: PathExpr,

    /// Strategy applied to the addressed node
    pub kind: MaskKind,
}

/// Raw configuration entry for one column, as found in the config document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnRuleSpec {
    /// Target column name
    pub name: String,

    /// Masking kind: `all`/`full`, `email`, `regex` or `substring`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Regex source for `type: regex`; legacy kind alias when `type` is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Fixed output length for the redacted span
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,

    /// Start offset for `type: substring`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,

    /// End offset for `type: substring`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,

    /// Path rules for JSON columns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paths: Option<Vec<PathRuleSpec>>,
}

/// Raw configuration entry for one path inside a JSON column
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathRuleSpec {
    /// Path expression, e.g. `$.root.key1` or `$.items[0].id`
    pub key: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
}

/// Compile raw column specs into mask rules.
///
/// Fails on an invalid regex, a malformed path expression, or `type: regex`
/// without a pattern. Duplicate target names are rejected later, when the
/// engine builds its rule map.
pub fn compile(specs: &[ColumnRuleSpec]) -> Result<Vec<MaskRule>> {
    specs
        .iter()
        .map(|spec| {
            let kind = resolve_kind(
                &spec.name,
                spec.kind.as_deref(),
                spec.pattern.as_deref(),
                spec.length,
                spec.start,
                spec.end,
            )?;
            let paths = spec
                .paths
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|p| {
                    Ok(PathRule {
                        path: PathExpr::parse(&p.key)?,
                        kind: resolve_kind(
                            &spec.name,
                            p.kind.as_deref(),
                            p.pattern.as_deref(),
                            p.length,
                            p.start,
                            p.end,
                        )?,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(MaskRule {
                column: spec.name.clone(),
                kind,
                paths,
            })
        })
        .collect()
}

/// Resolve a raw (kind, parameters) pair into a [`MaskKind`].
///
/// When `type` is absent, `pattern: email` selects the email kind (legacy
/// alias); any other pattern value defaults to full redaction. A configured
/// length of zero counts as unset.
fn resolve_kind(
    column: &str,
    kind: Option<&str>,
    pattern: Option<&str>,
    length: Option<usize>,
    start: Option<i64>,
    end: Option<i64>,
) -> Result<MaskKind> {
    let length = length.filter(|l| *l > 0);
    match kind {
        None => match pattern {
            Some("email") => Ok(MaskKind::Email { length }),
            _ => Ok(MaskKind::Full { length }),
        },
        Some("all") | Some("full") => Ok(MaskKind::Full { length }),
        Some("email") => Ok(MaskKind::Email { length }),
        Some("regex") => {
            let source = pattern.ok_or_else(|| {
                Error::ConfigValidation(format!(
                    "column '{column}': 'type: regex' requires a 'pattern'"
                ))
            })?;
            let pattern = Regex::new(source).map_err(|e| {
                Error::ConfigValidation(format!("column '{column}': invalid pattern: {e}"))
            })?;
            Ok(MaskKind::Regex { pattern })
        }
        Some("substring") => Ok(MaskKind::Substring { start, end, length }),
        Some(other) => {
            warn!(column, kind = other, "unrecognized masking kind, passing values through");
            Ok(MaskKind::Passthrough)
        }
    }
}
