use crate::ids::AttributeOrdinal;
use crate::value::Value;

/// Host-provided buffer receiving one decoded row per scan step.
///
/// The buffer has one slot per table attribute. A scan only writes the
/// slots of projected attributes; other slots keep whatever they held
/// before, so callers must consult the projection to know which slots are
/// meaningful.
#[derive(Debug, Clone, PartialEq)]
pub struct RowBuffer {
    values: Vec<Value>,
    valid: usize,
    empty: bool,
}

impl RowBuffer {
    /// Empty buffer with `natts` NULL slots.
    pub fn new(natts: usize) -> Self {
        Self {
            values: vec![Value::Null; natts],
            valid: 0,
            empty: true,
        }
    }

    /// Buffer holding a complete row, e.g. for `insert_row`.
    pub fn from_values(values: Vec<Value>) -> Self {
        let valid = values.len();
        Self {
            values,
            valid,
            empty: false,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// `true` when the buffer does not hold a row (fresh or after exhaustion).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// Number of leading slots the last producer declared valid.
    #[inline]
    pub fn valid_count(&self) -> usize {
        self.valid
    }

    #[inline]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn value(&self, ordinal: AttributeOrdinal) -> Option<&Value> {
        self.values.get(ordinal)
    }

    pub fn is_null(&self, ordinal: AttributeOrdinal) -> bool {
        self.values.get(ordinal).is_none_or(Value::is_null)
    }

    /// Store a decoded value in slot `ordinal`, marking it non-null.
    pub fn set(&mut self, ordinal: AttributeOrdinal, value: Value) {
        self.values[ordinal] = value;
    }

    /// Mark the buffer as holding a complete row.
    pub fn mark_filled(&mut self) {
        self.valid = self.values.len();
        self.empty = false;
    }

    /// Mark the buffer empty. Slot contents are left as they are.
    pub fn clear(&mut self) {
        self.valid = 0;
        self.empty = true;
    }

    /// Copy out the values of the given ordinals, in the order given.
    pub fn project(&self, ordinals: &[AttributeOrdinal]) -> Vec<Value> {
        ordinals
            .iter()
            .filter_map(|&i| self.values.get(i).cloned())
            .collect()
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}
