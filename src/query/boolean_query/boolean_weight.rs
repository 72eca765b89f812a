use std::sync::Arc;

use super::boolean_scorer::BooleanScorer;
use crate::core::SegmentReader;
use crate::query::coord::unit_coord_table;
use crate::query::explanation::does_not_match;
use crate::query::{
    BulkScorer, Conjunction, DefaultBulkScorer, DisjunctionScorer, Exclude, Explanation, Occur,
    RequiredOptionalScorer, ScorerNode, Weight,
};
use crate::{DocId, Score};

/// Sub-scorers of a segment, split by occurrence.
struct PerOccurScorers<T> {
    required: Vec<T>,
    optional: Vec<T>,
    prohibited: Vec<T>,
}

impl<T> Default for PerOccurScorers<T> {
    fn default() -> Self {
        PerOccurScorers {
            required: Vec::new(),
            optional: Vec::new(),
            prohibited: Vec::new(),
        }
    }
}

/// Weight associated to the `BooleanQuery`.
pub struct BooleanWeight {
    weights: Vec<(Occur, Box<dyn Weight>)>,
    minimum_number_should_match: usize,
    // Coordination factors, indexed by the number of matching clauses.
    coords: Arc<[Score]>,
    num_clauses: usize,
    bucketed_clause_threshold: usize,
}

impl BooleanWeight {
    /// Create a new boolean weight
    pub(crate) fn new(
        weights: Vec<(Occur, Box<dyn Weight>)>,
        minimum_number_should_match: usize,
        coords: Arc<[Score]>,
        num_clauses: usize,
        bucketed_clause_threshold: usize,
    ) -> BooleanWeight {
        BooleanWeight {
            weights,
            minimum_number_should_match,
            coords,
            num_clauses,
            bucketed_clause_threshold,
        }
    }

    fn has_required_clause(&self) -> bool {
        self.weights.iter().any(|(occur, _)| *occur == Occur::Must)
    }

    /// Without required clauses, the bucketed scorer takes over when there
    /// are many optional and prohibited clauses.
    fn exceeds_bucketed_threshold(&self) -> bool {
        !self.has_required_clause() && self.weights.len() > self.bucketed_clause_threshold
    }

    /// Builds the sub-scorers, returning `None` as soon as a required clause
    /// cannot match.
    fn per_occur_scorers<T>(
        &self,
        mut sub_scorer: impl FnMut(&dyn Weight) -> crate::Result<Option<T>>,
    ) -> crate::Result<Option<PerOccurScorers<T>>> {
        let mut per_occur_scorers = PerOccurScorers::default();
        for (occur, weight) in &self.weights {
            let sub_scorer_opt = sub_scorer(weight.as_ref())?;
            match (occur, sub_scorer_opt) {
                (Occur::Must, Some(sub_scorer)) => per_occur_scorers.required.push(sub_scorer),
                (Occur::Must, None) => return Ok(None),
                (Occur::Should, Some(sub_scorer)) => per_occur_scorers.optional.push(sub_scorer),
                (Occur::MustNot, Some(sub_scorer)) => {
                    per_occur_scorers.prohibited.push(sub_scorer)
                }
                // These clauses never match but still count in the coordination factor.
                (Occur::Should, None) | (Occur::MustNot, None) => {}
            }
        }
        Ok(Some(per_occur_scorers))
    }

    fn complex_scorer(
        &self,
        reader: &SegmentReader,
        boost: Score,
    ) -> crate::Result<Option<ScorerNode>> {
        let per_occur_scorers =
            match self.per_occur_scorers(|weight| weight.scorer(reader, boost))? {
                Some(per_occur_scorers) => per_occur_scorers,
                None => return Ok(None),
            };
        let PerOccurScorers {
            required,
            optional,
            prohibited,
        } = per_occur_scorers;
        if required.is_empty() && optional.is_empty() {
            return Ok(None);
        }
        if optional.len() < self.minimum_number_should_match {
            return Ok(None);
        }
        let positive_scorer = if required.is_empty() {
            ScorerNode::Disjunction(DisjunctionScorer::new(
                optional,
                self.minimum_number_should_match,
                self.coords.clone(),
            ))
        } else if optional.is_empty() {
            let coord = self.coords[required.len()];
            ScorerNode::Conjunction(Conjunction::new(required, coord))
        } else {
            let num_optional = optional.len();
            let req_scorer = ScorerNode::Conjunction(Conjunction::new(required, 1.0));
            let opt_scorer = ScorerNode::Disjunction(DisjunctionScorer::new(
                optional,
                self.minimum_number_should_match,
                unit_coord_table(num_optional + 1),
            ));
            ScorerNode::ReqOpt(Box::new(RequiredOptionalScorer::new(
                req_scorer,
                opt_scorer,
                self.minimum_number_should_match > 0,
                self.coords.clone(),
            )))
        };
        if prohibited.is_empty() {
            Ok(Some(positive_scorer))
        } else {
            Ok(Some(ScorerNode::Exclusion(Box::new(Exclude::new(
                positive_scorer,
                prohibited,
            )))))
        }
    }

    /// Returns the bucketed scorer of the segment, or `None` if it cannot match.
    ///
    /// Only valid for queries without required clauses.
    fn boolean_scorer(
        &self,
        reader: &SegmentReader,
        boost: Score,
    ) -> crate::Result<Option<BooleanScorer>> {
        debug_assert!(!self.has_required_clause());
        let per_occur_scorers =
            match self.per_occur_scorers(|weight| weight.bulk_scorer(reader, boost, false))? {
                Some(per_occur_scorers) => per_occur_scorers,
                None => return Ok(None),
            };
        let PerOccurScorers {
            optional,
            prohibited,
            ..
        } = per_occur_scorers;
        if optional.is_empty() || optional.len() < self.minimum_number_should_match {
            return Ok(None);
        }
        Ok(Some(BooleanScorer::new(
            optional,
            prohibited,
            self.minimum_number_should_match,
            self.coords.clone(),
        )))
    }
}

impl Weight for BooleanWeight {
    fn scorer(&self, reader: &SegmentReader, boost: Score) -> crate::Result<Option<ScorerNode>> {
        if self.exceeds_bucketed_threshold() {
            debug!(
                "Bucketed scoring of {} clauses (threshold={})",
                self.weights.len(),
                self.bucketed_clause_threshold
            );
            return Ok(self
                .boolean_scorer(reader, boost)?
                .map(ScorerNode::from_boolean_scorer));
        }
        self.complex_scorer(reader, boost)
    }

    fn bulk_scorer(
        &self,
        reader: &SegmentReader,
        boost: Score,
        in_order: bool,
    ) -> crate::Result<Option<Box<dyn BulkScorer>>> {
        // The bucketed scorer flushes each window in doc id order, so it also
        // serves in order collection.
        if !self.has_required_clause() && (!in_order || self.exceeds_bucketed_threshold()) {
            return Ok(self
                .boolean_scorer(reader, boost)?
                .map(|boolean_scorer| Box::new(boolean_scorer) as Box<dyn BulkScorer>));
        }
        Ok(self
            .complex_scorer(reader, boost)?
            .map(|scorer| Box::new(DefaultBulkScorer::new(scorer)) as Box<dyn BulkScorer>))
    }

    fn num_clauses(&self) -> usize {
        self.num_clauses
    }

    fn explain(&self, reader: &SegmentReader, doc: DocId) -> crate::Result<Explanation> {
        let mut details = Vec::new();
        let mut sum: Score = 0.0;
        let mut coord = 0u32;
        let mut should_matches = 0usize;
        for (occur, weight) in &self.weights {
            // A clause failing to explain the document does not match it.
            let explanation_opt = weight.explain(reader, doc).ok();
            match (occur, explanation_opt) {
                (Occur::MustNot, Some(_)) => return Err(does_not_match(doc)),
                (Occur::MustNot, None) => {}
                (Occur::Must, None) => return Err(does_not_match(doc)),
                (occur, Some(explanation)) => {
                    if *occur == Occur::Should {
                        should_matches += 1;
                    }
                    coord += 1;
                    sum += explanation.value();
                    details.push(explanation);
                }
                (Occur::Should, None) => {}
            }
        }
        if coord == 0 || should_matches < self.minimum_number_should_match {
            return Err(does_not_match(doc));
        }
        let mut sum_explanation = Explanation::new("sum of:", sum);
        for detail in details {
            sum_explanation.add_detail(detail);
        }
        let coord_factor = self.coords[coord as usize];
        if coord_factor == 1.0 {
            return Ok(sum_explanation);
        }
        let max_coord = self.coords.len() - 1;
        let mut explanation = Explanation::new("product of:", sum * coord_factor);
        explanation.add_detail(sum_explanation);
        explanation.add_const(format!("coord({coord}/{max_coord})"), coord_factor);
        Ok(explanation)
    }

    fn count(&self, reader: &SegmentReader) -> crate::Result<u32> {
        let mut count = 0u32;
        if let Some(mut bulk_scorer) = self.bulk_scorer(reader, 1.0, false)? {
            bulk_scorer.score_all(&mut |_| count += 1);
        }
        Ok(count)
    }
}
