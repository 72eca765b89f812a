use crate::docset::{DocSet, TERMINATED};
use crate::query::boolean_query::BooleanScorer;
use crate::query::{
    BulkScorer, BulkScorerDocSet, Conjunction, DisjunctionScorer, Exclude, RequiredOptionalScorer,
    Scorer,
};
use crate::{DocId, Score};

/// Node of the scorer tree built by a [`Weight`](crate::query::Weight) for a segment.
///
/// Leaves are opaque scorers (term postings, constant scorers, ...). The
/// other variants are the boolean building blocks. All of them are driven
/// through the same `doc / advance / seek / freq / score` interface.
pub enum ScorerNode {
    /// An opaque scorer, typically produced by a term or a filter weight.
    Leaf(Box<dyn Scorer>),
    /// Intersection of required clauses.
    Conjunction(Conjunction),
    /// Union of optional clauses, with a minimum number of matching clauses.
    Disjunction(DisjunctionScorer),
    /// Required clauses with optional clauses adding to the score.
    ReqOpt(Box<RequiredOptionalScorer>),
    /// A scorer minus the documents matched by prohibited clauses.
    Exclusion(Box<Exclude>),
    /// A bulk scorer, buffered one window at a time.
    Bucketed(Box<BulkScorerDocSet>),
}

impl ScorerNode {
    /// Wraps an opaque scorer.
    pub fn leaf<TScorer: Scorer>(scorer: TScorer) -> ScorerNode {
        ScorerNode::Leaf(Box::new(scorer))
    }

    /// Turns a bulk scorer into a pull scorer.
    pub fn from_bulk(bulk_scorer: Box<dyn BulkScorer>) -> ScorerNode {
        ScorerNode::Bucketed(Box::new(BulkScorerDocSet::new(bulk_scorer)))
    }

    pub(crate) fn from_boolean_scorer(boolean_scorer: BooleanScorer) -> ScorerNode {
        ScorerNode::from_bulk(Box::new(boolean_scorer))
    }
}

#[inline]
fn check_leaf_progress(previous: DocId, doc: DocId) -> DocId {
    assert!(
        doc >= previous,
        "Scorer went backward from doc {previous} to doc {doc}"
    );
    doc
}

impl DocSet for ScorerNode {
    fn advance(&mut self) -> DocId {
        match self {
            ScorerNode::Leaf(scorer) => {
                let previous = scorer.doc();
                let doc = scorer.advance();
                assert!(
                    doc > previous || doc == TERMINATED,
                    "Scorer went backward from doc {previous} to doc {doc}"
                );
                doc
            }
            ScorerNode::Conjunction(conjunction) => conjunction.advance(),
            ScorerNode::Disjunction(disjunction) => disjunction.advance(),
            ScorerNode::ReqOpt(req_opt) => req_opt.advance(),
            ScorerNode::Exclusion(exclude) => exclude.advance(),
            ScorerNode::Bucketed(bucketed) => bucketed.advance(),
        }
    }

    fn seek(&mut self, target: DocId) -> DocId {
        match self {
            ScorerNode::Leaf(scorer) => {
                let previous = scorer.doc();
                check_leaf_progress(previous, scorer.seek(target))
            }
            ScorerNode::Conjunction(conjunction) => conjunction.seek(target),
            ScorerNode::Disjunction(disjunction) => disjunction.seek(target),
            ScorerNode::ReqOpt(req_opt) => req_opt.seek(target),
            ScorerNode::Exclusion(exclude) => exclude.seek(target),
            ScorerNode::Bucketed(bucketed) => bucketed.seek(target),
        }
    }

    #[inline]
    fn doc(&self) -> DocId {
        match self {
            ScorerNode::Leaf(scorer) => scorer.doc(),
            ScorerNode::Conjunction(conjunction) => conjunction.doc(),
            ScorerNode::Disjunction(disjunction) => disjunction.doc(),
            ScorerNode::ReqOpt(req_opt) => req_opt.doc(),
            ScorerNode::Exclusion(exclude) => exclude.doc(),
            ScorerNode::Bucketed(bucketed) => bucketed.doc(),
        }
    }

    fn size_hint(&self) -> u32 {
        match self {
            ScorerNode::Leaf(scorer) => scorer.size_hint(),
            ScorerNode::Conjunction(conjunction) => conjunction.size_hint(),
            ScorerNode::Disjunction(disjunction) => disjunction.size_hint(),
            ScorerNode::ReqOpt(req_opt) => req_opt.size_hint(),
            ScorerNode::Exclusion(exclude) => exclude.size_hint(),
            ScorerNode::Bucketed(bucketed) => bucketed.size_hint(),
        }
    }
}

impl Scorer for ScorerNode {
    fn score(&mut self) -> Score {
        match self {
            ScorerNode::Leaf(scorer) => scorer.score(),
            ScorerNode::Conjunction(conjunction) => conjunction.score(),
            ScorerNode::Disjunction(disjunction) => disjunction.score(),
            ScorerNode::ReqOpt(req_opt) => req_opt.score(),
            ScorerNode::Exclusion(exclude) => exclude.score(),
            ScorerNode::Bucketed(bucketed) => bucketed.score(),
        }
    }

    fn freq(&mut self) -> u32 {
        match self {
            ScorerNode::Leaf(scorer) => scorer.freq(),
            ScorerNode::Conjunction(conjunction) => conjunction.freq(),
            ScorerNode::Disjunction(disjunction) => disjunction.freq(),
            ScorerNode::ReqOpt(req_opt) => req_opt.freq(),
            ScorerNode::Exclusion(exclude) => exclude.freq(),
            ScorerNode::Bucketed(bucketed) => bucketed.freq(),
        }
    }
}
