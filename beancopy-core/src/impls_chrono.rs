use chrono::{NaiveDate, NaiveDateTime};

use crate::macros::impl_reflect_for_scalar;

impl_reflect_for_scalar!(NaiveDate, "NaiveDate", Date, Date);
impl_reflect_for_scalar!(NaiveDateTime, "NaiveDateTime", DateTime, DateTime);
