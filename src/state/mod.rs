pub mod bounce;
pub mod overscroll;
pub mod surface;

pub use bounce::Bounce;
pub use overscroll::{ElasticOverscroll, PointerAction};
pub use surface::{Pivot, ScrollMetrics, ScrollSurface, Stretch};

#[cfg(test)]
mod tests;
