use serde_json::Value;

/// The shape of a JSON value.
///
/// Produced once per rendered node; every later branch (path joining, child
/// iteration, leaf formatting) matches on this tag instead of re-inspecting
/// the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Boolean,
    Number,
    String,
    Object,
    Array,
}

impl Kind {
    /// Classifies a JSON value. Total over every `serde_json::Value`.
    #[must_use]
    pub fn of(value: &Value) -> Kind {
        match value {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Boolean,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Object(_) => Kind::Object,
            Value::Array(_) => Kind::Array,
        }
    }

    /// Returns `true` for objects and arrays.
    #[must_use]
    pub fn is_container(self) -> bool {
        matches!(self, Kind::Object | Kind::Array)
    }
}

impl From<&Value> for Kind {
    fn from(value: &Value) -> Self {
        Kind::of(value)
    }
}
