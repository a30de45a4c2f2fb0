//! Tri-state fields for partial updates.
//!
//! Clubhouse update endpoints treat a missing key and an explicit `null`
//! differently: a missing key leaves the stored value alone while `null`
//! clears it. A plain `Option<T>` can only express two of those states, so
//! update parameters use [`Nullable`] for every field that can be cleared.
//!
//! ```
//! use clubhouse::{Nullable, UpdateEpicParams};
//!
//! let params = UpdateEpicParams {
//!     milestone_id: Nullable::Reset,
//!     ..Default::default()
//! };
//! assert_eq!(
//!     clubhouse::encode_params(&params).unwrap(),
//!     br#"{"milestone_id":null}"#.to_vec(),
//! );
//! ```

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ClubhouseError, Result};

/// A field that can be left untouched, set to a value, or reset to `null`.
///
/// Struct fields of this type must carry
/// `#[serde(default, skip_serializing_if = "Nullable::is_unset")]` so that
/// [`Nullable::Unset`] leaves the key out of the request body entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nullable<T> {
    /// The caller did not mention the field; the key is omitted.
    Unset,
    /// Set the field to this value.
    Value(T),
    /// Clear the field; the key is sent as `null`.
    Reset,
}

/// Wire classification of a single [`Nullable`] field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldState {
    /// The key does not appear in the output object.
    Absent,
    /// The key maps to `null`.
    Null,
    /// The key maps to this JSON value.
    Value(serde_json::Value),
}

impl<T> Nullable<T> {
    /// Build a field from an `Option`, mapping `None` to [`Nullable::Reset`].
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Value(v),
            None => Self::Reset,
        }
    }

    /// Returns true if the field will be omitted from the request.
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Returns true if the field will be sent as `null`.
    pub fn is_reset(&self) -> bool {
        matches!(self, Self::Reset)
    }

    /// Returns the value if one is set.
    pub fn as_value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Borrow the inner value.
    pub fn as_ref(&self) -> Nullable<&T> {
        match self {
            Self::Unset => Nullable::Unset,
            Self::Value(v) => Nullable::Value(v),
            Self::Reset => Nullable::Reset,
        }
    }

    /// Map the inner value, keeping `Unset` and `Reset` as they are.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Nullable<U> {
        match self {
            Self::Unset => Nullable::Unset,
            Self::Value(v) => Nullable::Value(f(v)),
            Self::Reset => Nullable::Reset,
        }
    }

    /// Apply this patch to a stored optional value.
    ///
    /// `Unset` keeps `current`, `Reset` clears it, `Value` replaces it.
    pub fn apply_to(self, current: &mut Option<T>) {
        match self {
            Self::Unset => {}
            Self::Value(v) => *current = Some(v),
            Self::Reset => *current = None,
        }
    }
}

impl<T: Serialize> Nullable<T> {
    /// Classify this field the way it will appear on the wire.
    ///
    /// # Errors
    ///
    /// Returns an error if the inner value cannot be encoded as JSON.
    pub fn resolve(&self) -> serde_json::Result<FieldState> {
        match self {
            Self::Unset => Ok(FieldState::Absent),
            Self::Reset => Ok(FieldState::Null),
            Self::Value(v) => match serde_json::to_value(v)? {
                serde_json::Value::Null => Ok(FieldState::Null),
                value => Ok(FieldState::Value(value)),
            },
        }
    }
}

impl<T> Default for Nullable<T> {
    fn default() -> Self {
        Self::Unset
    }
}

impl<T> From<T> for Nullable<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T: Serialize> Serialize for Nullable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        match self {
            Self::Value(v) => v.serialize(serializer),
            // Unset only reaches here when the field lacks skip_serializing_if
            Self::Unset | Self::Reset => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Nullable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        // A missing key never reaches this point; `#[serde(default)]` yields Unset.
        Option::<T>::deserialize(deserializer).map(Self::from_option)
    }
}

/// A label, category, or project color such as `#00ff00`.
///
/// The empty color is reserved for clearing: it always encodes as `null`,
/// so `Nullable::Value(Color::default())` behaves exactly like
/// [`Nullable::Reset`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Color(String);

impl Color {
    /// Create a color from a hex string or CSS color name.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The color string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for the reserved empty color.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Color {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.0
    }
}

impl From<&str> for Nullable<Color> {
    fn from(value: &str) -> Self {
        Self::Value(Color::new(value))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        if self.0.is_empty() {
            serializer.serialize_none()
        } else {
            serializer.serialize_str(&self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        Option::<String>::deserialize(deserializer).map(|s| Self(s.unwrap_or_default()))
    }
}

/// Encode request parameters into a JSON body.
///
/// # Errors
///
/// Returns [`ClubhouseError::Marshal`] if any field fails to encode.
pub fn encode_params<P: Serialize + ?Sized>(params: &P) -> Result<Vec<u8>> {
    serde_json::to_vec(params).map_err(ClubhouseError::Marshal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    struct Patch {
        #[serde(default, skip_serializing_if = "Nullable::is_unset")]
        color: Nullable<Color>,
        #[serde(default, skip_serializing_if = "Nullable::is_unset")]
        estimate: Nullable<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    }

    fn encode(patch: &Patch) -> String {
        String::from_utf8(encode_params(patch).unwrap()).unwrap()
    }

    #[test]
    fn test_unset_fields_are_omitted() {
        assert_eq!(encode(&Patch::default()), "{}");
    }

    #[test]
    fn test_value_and_reset() {
        let patch = Patch {
            estimate: Nullable::Value(3),
            color: Nullable::Reset,
            ..Default::default()
        };
        assert_eq!(encode(&patch), r#"{"color":null,"estimate":3}"#);
    }

    #[test]
    fn test_zero_value_is_still_sent() {
        let patch = Patch {
            estimate: Nullable::Value(0),
            ..Default::default()
        };
        assert_eq!(encode(&patch), r#"{"estimate":0}"#);
    }

    #[test]
    fn test_empty_color_encodes_as_null() {
        let patch = Patch {
            color: Nullable::Value(Color::default()),
            ..Default::default()
        };
        assert_eq!(encode(&patch), r#"{"color":null}"#);
    }

    struct Unencodable;

    impl Serialize for Unencodable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> core::result::Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("value has no JSON form"))
        }
    }

    #[test]
    fn test_encode_failure_is_marshal_error() {
        let err = encode_params(&Unencodable).unwrap_err();
        assert!(matches!(err, ClubhouseError::Marshal(_)), "got {err:?}");
        assert!(err.to_string().contains("value has no JSON form"));

        assert!(Nullable::Value(Unencodable).resolve().is_err());
    }

    #[test]
    fn test_resolve_states() {
        assert_eq!(Nullable::<i64>::Unset.resolve().unwrap(), FieldState::Absent);
        assert_eq!(Nullable::<i64>::Reset.resolve().unwrap(), FieldState::Null);
        assert_eq!(
            Nullable::Value(124).resolve().unwrap(),
            FieldState::Value(serde_json::json!(124))
        );
        assert_eq!(
            Nullable::Value(Color::new("")).resolve().unwrap(),
            FieldState::Null
        );
    }

    #[test]
    fn test_deserialize_distinguishes_missing_and_null() {
        let patch: Patch = serde_json::from_str(r#"{"estimate":null}"#).unwrap();
        assert!(patch.estimate.is_reset());
        assert!(patch.color.is_unset());

        let patch: Patch = serde_json::from_str(r#"{"estimate":5,"color":"red"}"#).unwrap();
        assert_eq!(patch.estimate, Nullable::Value(5));
        assert_eq!(patch.color, Nullable::Value(Color::new("red")));
    }

    #[test]
    fn test_round_trip_recovers_values() {
        let patch = Patch {
            color: "#00ff00".into(),
            estimate: Nullable::Value(8),
            name: Some("ship it".to_string()),
        };
        let decoded: Patch = serde_json::from_slice(&encode_params(&patch).unwrap()).unwrap();
        assert_eq!(decoded, patch);
    }

    #[test]
    fn test_apply_to() {
        let mut stored = Some(4);
        Nullable::Unset.apply_to(&mut stored);
        assert_eq!(stored, Some(4));
        Nullable::Value(7).apply_to(&mut stored);
        assert_eq!(stored, Some(7));
        Nullable::Reset.apply_to(&mut stored);
        assert_eq!(stored, None);
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Nullable::from_option(Some(1)), Nullable::Value(1));
        assert_eq!(Nullable::<i32>::from_option(None), Nullable::Reset);
    }
}
