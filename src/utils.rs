//! Small helpers shared across the crate: identifier normalisation and the
//! getter/builder macros used by the entity and style types.

use crate::data_structs::typedef::SmallStr;

/// Normalises a display name into its unique-id form: trimmed and
/// lower-cased. Identity lookups and merge keys always go through this so
/// that two independently parsed records with differing case collide.
pub fn normalize_name(name: &str) -> SmallStr {
    SmallStr::from(name.trim().to_ascii_lowercase().as_str())
}

#[macro_export]
macro_rules! getter_fn {
    ($field_name: ident, $field_type: ty) => {
        pub fn $field_name(&self) -> &$field_type {
            &self.$field_name
        }
    };
}
pub use getter_fn;

#[macro_export]
macro_rules! with_field_fn {
    ($field_name: ident, $field_type: ty) => {
        paste::paste! {
            pub fn [<with_$field_name>](mut self, value: $field_type) -> Self {
            self.$field_name = value;
            self
            }
        }
    };
}
pub use with_field_fn;
