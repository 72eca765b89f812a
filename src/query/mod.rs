//! Query module
//!
//! The query module regroups all of the query objects, and the scorers
//! they are executed with.

mod bitset;
mod boolean_query;
mod boost_query;
mod bulk_scorer;
mod conjunction;
mod const_score_query;
pub(crate) mod coord;
mod disjunction;
mod exclude;
mod explanation;
mod occur;
mod query;
mod reqopt_scorer;
mod score_combiner;
mod scorer;
mod scorer_node;
mod similarity;
mod term_query;
mod term_range_query;
mod vec_docset;
mod weight;

pub(crate) use self::bitset::BitSetDocSet;
pub use self::boolean_query::{BooleanQuery, BooleanWeight};
pub use self::boost_query::BoostQuery;
pub use self::bulk_scorer::{BulkScorer, BulkScorerDocSet, DefaultBulkScorer, HitView};
pub use self::conjunction::Conjunction;
pub use self::const_score_query::{ConstScoreQuery, ConstScorer};
pub use self::coord::{CoordinationPolicy, DefaultCoordination, NoCoordination};
pub use self::disjunction::DisjunctionScorer;
pub use self::exclude::Exclude;
pub use self::explanation::Explanation;
pub use self::occur::Occur;
pub use self::query::{EnableScoring, Query, QueryClone};
pub use self::reqopt_scorer::RequiredOptionalScorer;
pub use self::score_combiner::SumWithCoordsCombiner;
pub use self::scorer::Scorer;
pub use self::scorer_node::ScorerNode;
pub use self::similarity::{DefaultSimilarity, Similarity};
pub use self::term_query::{TermQuery, TermScorer, TermWeight};
pub use self::term_range_query::{
    RewriteMethod, TermRangeQuery, DEFAULT_DOC_COUNT_PERCENT, DEFAULT_TERM_COUNT_CUTOFF,
};
pub use self::vec_docset::VecDocSet;
pub use self::weight::Weight;
