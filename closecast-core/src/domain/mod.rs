//! Domain types: bars and the placeholder-bearing series.

pub mod bar;
pub mod series;

pub use bar::Bar;
pub use series::Series;
