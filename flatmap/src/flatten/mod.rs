mod cycle_guard;
mod navigation_path;
mod resolver;
mod segment_matcher;

pub use cycle_guard::CycleGuard;
pub use navigation_path::{CollectionOperation, Hop, NavigationPath};
pub use resolver::{PathResolver, Stall};
pub use segment_matcher::{SegmentMatch, match_segment, strip_segment};
