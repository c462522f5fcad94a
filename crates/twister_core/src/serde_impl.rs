//! `serde` support: generators serialise as their checkpoint text.

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use crate::{GaussianRng, IntegerRng, UniformRng};

macro_rules! impl_serde_as_state_text {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_state_string())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let text = String::deserialize(deserializer)?;
                <$ty>::from_state_str(&text).map_err(de::Error::custom)
            }
        }
    };
}

impl_serde_as_state_text!(IntegerRng);
impl_serde_as_state_text!(UniformRng);
impl_serde_as_state_text!(GaussianRng);
