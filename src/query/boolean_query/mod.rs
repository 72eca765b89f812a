mod boolean_query;
mod boolean_scorer;
mod boolean_weight;

pub use self::boolean_query::BooleanQuery;
pub(crate) use self::boolean_scorer::BooleanScorer;
pub use self::boolean_weight::BooleanWeight;
