mod boxed;
mod btreemap;
mod btreeset;
mod string;
mod vec;
