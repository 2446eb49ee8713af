use std::fmt;

/// A named message parameter, classified safe-to-log or sensitive.
///
/// The classification controls where the value may appear: safe values can
/// be shipped to external log aggregation, sensitive values must stay in
/// local server logs. Neither kind ever reaches the remote caller — the
/// caller-facing payload carries only the error id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    name: String,
    value: String,
    safe: bool,
}

impl Param {
    /// A parameter whose value is safe to log anywhere.
    pub fn safe(name: impl Into<String>, value: impl fmt::Display) -> Self {
        Param {
            name: name.into(),
            value: value.to_string(),
            safe: true,
        }
    }

    /// A parameter whose value must not leave local server logs.
    pub fn sensitive(name: impl Into<String>, value: impl fmt::Display) -> Self {
        Param {
            name: name.into(),
            value: value.to_string(),
            safe: false,
        }
    }

    /// The parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The rendered parameter value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the value is safe to log outside local server logs.
    pub fn is_safe(&self) -> bool {
        self.safe
    }
}

/// Substitutes `{}` placeholders in `template` positionally with the
/// parameter values. Surplus placeholders are left verbatim, surplus
/// parameters are ignored.
pub(crate) fn format_message(template: &str, params: &[Param]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut values = params.iter();
    while let Some(idx) = rest.find("{}") {
        match values.next() {
            Some(param) => {
                out.push_str(&rest[..idx]);
                out.push_str(param.value());
                rest = &rest[idx + 2..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}
