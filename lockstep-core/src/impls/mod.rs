mod collections;
mod opaque;
mod pointers;
mod scalars;
mod time;
mod tuples;

#[cfg(feature = "num-complex")]
mod complex;

pub use time::duration_of;
