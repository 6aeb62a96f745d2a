use sea_orm::{ActiveValue, Value};
use serde::{Deserialize, Deserializer};

/// A single field of a partial update.
///
/// A field that is absent or `null` in the request body deserializes to
/// `Unchanged`; any other value becomes `Set`. Request structs mark these
/// fields `#[serde(default)]` so that omitted keys are accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    Unchanged,
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Unchanged
    }
}

impl<T> Patch<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Patch::Unchanged)
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Patch::Unchanged => None,
            Patch::Set(v) => Some(v),
        }
    }

    /// The patched value, or `current` when the field is unchanged.
    pub fn unwrap_or(self, current: T) -> T {
        self.into_option().unwrap_or(current)
    }

    /// Write a `Set` value into an active model column; `Unchanged` leaves it alone.
    pub fn apply(self, column: &mut ActiveValue<T>)
    where
        T: Into<Value>,
    {
        if let Patch::Set(v) = self {
            *column = ActiveValue::Set(v);
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Patch::Set(v),
            None => Patch::Unchanged,
        })
    }
}
