//! Display driver implementations

pub mod seven_segment;

pub use seven_segment::ParallelSegmentDisplay;
