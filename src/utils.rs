//! serde glue shared by the models

use serde::{Deserialize, Deserializer, Serializer};

/// For fields that must be present but may be `null`.
///
/// A plain `Option<T>` lets serde fill in `None` when the key is missing,
/// which would hide an absent field behind a null one.
pub fn required_nullable<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

/// Role tag booleans: a key present with `null` means true, an absent key means false.
pub mod null_flag {
    use super::*;

    pub fn serialize<S: Serializer>(_flag: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_unit()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        <()>::deserialize(deserializer)?;
        Ok(true)
    }

    pub fn is_unset(flag: &bool) -> bool {
        !*flag
    }
}
