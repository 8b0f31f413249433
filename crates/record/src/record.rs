//! The [`Record`] trait.

use crate::{CoercionError, FieldDescriptor, FieldValue, InstantiationError};

/// A typed value that is stored as one XML element with one child element per
/// field.
///
/// Implementations are normally generated with `#[derive(Record)]`; writing one
/// by hand is useful for types that have no sensible zero value, in which case
/// [`Record::instantiate`] returns an error and the read path drops the
/// fragment.
pub trait Record: Sized {
    /// The type name, as declared. Its lower-cased form is the XML element name.
    const TYPE_NAME: &'static str;

    /// Every `String`/`Integer` field, in declaration order.
    fn fields() -> &'static [FieldDescriptor];

    /// Returns the current value of `field`, or `None` when the field is null
    /// or not declared.
    fn value_of(&self, field: &str) -> Option<FieldValue>;

    /// Like [`Record::value_of`], but fails for a value that exists and
    /// cannot be represented as a [`FieldValue`] (an unsigned integer above
    /// `i64::MAX`). The serializer reads fields through this method.
    fn try_value_of(&self, field: &str) -> Result<Option<FieldValue>, CoercionError> {
        Ok(self.value_of(field))
    }

    /// Creates the zero-valued instance that the read path populates.
    fn instantiate() -> Result<Self, InstantiationError>;

    /// Stores `value` into `field`.
    fn assign(&mut self, field: &str, value: FieldValue) -> Result<(), CoercionError>;

    /// The XML element name for this type: [`Record::TYPE_NAME`] lower-cased.
    fn element_name() -> String {
        Self::TYPE_NAME.to_lowercase()
    }

    /// The non-null field values, in descriptor order.
    fn field_values(&self) -> Vec<(&'static FieldDescriptor, FieldValue)> {
        Self::fields()
            .iter()
            .filter_map(|field| self.value_of(field.name).map(|value| (field, value)))
            .collect()
    }
}

/// Returns the field descriptor table of `T`.
pub fn describe<T: Record>() -> &'static [FieldDescriptor] {
    T::fields()
}
