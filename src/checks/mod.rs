pub mod flat_line;
pub mod gross_range;
pub mod location;
pub mod spike;

pub use flat_line::FlatLineCheck;
pub use gross_range::GrossRangeCheck;
pub use location::LocationCheck;
pub use spike::SpikeCheck;
