mod executor;
mod searcher;
mod segment_reader;
mod settings;
mod term;

pub use self::executor::Executor;
pub use self::searcher::Searcher;
pub use self::segment_reader::{SegmentBuilder, SegmentReader};
pub use self::settings::{
    SearchSettings, DEFAULT_BUCKETED_CLAUSE_THRESHOLD, DEFAULT_MAX_CLAUSE_COUNT,
};
pub use self::term::Term;
