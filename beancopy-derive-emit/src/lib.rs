#![doc = include_str!("../README.md")]

mod renamerule;
pub use renamerule::*;

mod generics;
pub use generics::*;

mod attributes;
pub use attributes::*;

mod process_struct;

mod derive;
pub use derive::*;
