use alloc::string::String;

use crate::macros::impl_reflect_for_scalar;

impl_reflect_for_scalar!(String, "String", String, String);
