mod array;
mod option;
mod scalar;
