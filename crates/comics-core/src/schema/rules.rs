//! Declarative field rules and the checker that applies them.

use serde_json::{Map, Number, Value};

use super::ValidationMode;

/// A constraint on a single JSON value.
#[derive(Debug)]
pub(crate) enum Rule {
    /// A string whose length in characters lies in `min..=max`.
    Str { min: usize, max: usize },
    /// An integer in `min..=max`. Numeric strings are converted.
    Int { min: i64, max: i64 },
    /// A boolean. `"true"` and `"false"` strings are converted.
    Bool,
    /// A string drawn from a closed set.
    OneOf(&'static [&'static str]),
    /// An array with at least `min_items` items, each satisfying `item`.
    List { min_items: usize, item: &'static Rule },
    /// A nested object. Unknown keys are rejected.
    Object(&'static [Field]),
}

/// A named field and its rule.
#[derive(Debug)]
pub(crate) struct Field {
    pub(crate) name: &'static str,
    pub(crate) rule: Rule,
}

impl Field {
    pub(crate) const fn new(name: &'static str, rule: Rule) -> Self {
        Self { name, rule }
    }
}

/// Whether absent fields are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Presence {
    Required,
    Optional,
}

/// Collects messages and decides when to stop.
pub(crate) struct Checker {
    mode: ValidationMode,
    messages: Vec<String>,
}

impl Checker {
    pub(crate) fn new(mode: ValidationMode) -> Self {
        Self {
            mode,
            messages: Vec::new(),
        }
    }

    pub(crate) fn into_messages(self) -> Vec<String> {
        self.messages
    }

    fn fail(&mut self, label: &str, problem: impl AsRef<str>) {
        if !self.stopped() {
            self.messages
                .push(format!("\"{}\" {}", label, problem.as_ref()));
        }
    }

    fn stopped(&self) -> bool {
        self.mode == ValidationMode::FailFast && !self.messages.is_empty()
    }

    /// Check the top-level object. Keys in `owned` are dropped unchecked,
    /// unknown keys are passed through.
    pub(crate) fn check_root(
        &mut self,
        fields: &[Field],
        owned: &[&str],
        presence: Presence,
        value: &Value,
    ) -> Option<Map<String, Value>> {
        let Some(object) = value.as_object() else {
            self.fail("value", "must be of type object");
            return None;
        };

        let mut normalized = Map::new();
        let start = self.messages.len();

        for field in fields {
            if self.stopped() {
                break;
            }
            match object.get(field.name) {
                Some(v) => {
                    if let Some(v) = self.check(&field.rule, field.name, v) {
                        normalized.insert(field.name.to_string(), v);
                    }
                }
                None if presence == Presence::Required => self.fail(field.name, "is required"),
                None => {}
            }
        }

        for (key, v) in object {
            let key_str = key.as_str();
            if owned.iter().any(|o| *o == key_str) || fields.iter().any(|f| f.name == key_str) {
                continue;
            }
            normalized.insert(key.clone(), v.clone());
        }

        (self.messages.len() == start).then_some(normalized)
    }

    fn check(&mut self, rule: &Rule, label: &str, value: &Value) -> Option<Value> {
        match rule {
            Rule::Str { min, max } => {
                let Some(s) = value.as_str() else {
                    self.fail(label, "must be a string");
                    return None;
                };
                let len = s.chars().count();
                if len < *min {
                    self.fail(
                        label,
                        format!("length must be at least {} characters long", min),
                    );
                    return None;
                }
                if len > *max {
                    self.fail(
                        label,
                        format!("length must be less than or equal to {} characters long", max),
                    );
                    return None;
                }
                Some(value.clone())
            }

            Rule::Int { min, max } => {
                let n = match value {
                    Value::Number(n) => n.clone(),
                    Value::String(s) => match s.trim().parse::<Number>() {
                        Ok(n) => n,
                        Err(_) => {
                            self.fail(label, "must be a number");
                            return None;
                        }
                    },
                    _ => {
                        self.fail(label, "must be a number");
                        return None;
                    }
                };
                let int = match (n.as_i64(), n.as_u64(), n.as_f64()) {
                    (Some(i), _, _) => i,
                    (None, Some(_), _) => i64::MAX,
                    (None, None, Some(f)) if f.fract() == 0.0 && f.is_finite() => {
                        f.clamp(i64::MIN as f64, i64::MAX as f64) as i64
                    }
                    _ => {
                        self.fail(label, "must be an integer");
                        return None;
                    }
                };
                if int < *min {
                    self.fail(label, format!("must be greater than or equal to {}", min));
                    return None;
                }
                if int > *max {
                    self.fail(label, format!("must be less than or equal to {}", max));
                    return None;
                }
                Some(Value::from(int))
            }

            Rule::Bool => match value {
                Value::Bool(_) => Some(value.clone()),
                Value::String(s) if s.eq_ignore_ascii_case("true") => Some(Value::Bool(true)),
                Value::String(s) if s.eq_ignore_ascii_case("false") => Some(Value::Bool(false)),
                _ => {
                    self.fail(label, "must be a boolean");
                    None
                }
            },

            Rule::OneOf(allowed) => match value.as_str() {
                Some(s) if allowed.iter().any(|a| *a == s) => Some(value.clone()),
                _ => {
                    self.fail(label, format!("must be one of [{}]", allowed.join(", ")));
                    None
                }
            },

            Rule::List { min_items, item } => {
                let Some(items) = value.as_array() else {
                    self.fail(label, "must be an array");
                    return None;
                };
                if items.len() < *min_items {
                    self.fail(label, format!("must contain at least {} items", min_items));
                    return None;
                }
                let mut out = Vec::with_capacity(items.len());
                let start = self.messages.len();
                for (i, v) in items.iter().enumerate() {
                    if self.stopped() {
                        break;
                    }
                    if let Some(v) = self.check(item, &format!("{}[{}]", label, i), v) {
                        out.push(v);
                    }
                }
                (self.messages.len() == start).then_some(Value::Array(out))
            }

            Rule::Object(fields) => {
                let Some(object) = value.as_object() else {
                    self.fail(label, "must be of type object");
                    return None;
                };
                let mut out = Map::new();
                let start = self.messages.len();
                for field in fields.iter() {
                    if self.stopped() {
                        break;
                    }
                    let nested = format!("{}.{}", label, field.name);
                    match object.get(field.name) {
                        Some(v) => {
                            if let Some(v) = self.check(&field.rule, &nested, v) {
                                out.insert(field.name.to_string(), v);
                            }
                        }
                        None => self.fail(&nested, "is required"),
                    }
                }
                for key in object.keys() {
                    if !fields.iter().any(|f| f.name == key.as_str()) {
                        self.fail(&format!("{}.{}", label, key), "is not allowed");
                    }
                }
                (self.messages.len() == start).then_some(Value::Object(out))
            }
        }
    }
}
