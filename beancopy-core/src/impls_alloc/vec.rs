use alloc::collections::{LinkedList, VecDeque};
use alloc::vec::Vec;

use crate::macros::impl_reflect_for_list;

impl_reflect_for_list!(Vec, "Vec");
impl_reflect_for_list!(VecDeque, "VecDeque");
impl_reflect_for_list!(LinkedList, "LinkedList");
