use std::fmt;
use std::sync::Arc;

use crate::collector::Collector;
use crate::core::{Executor, SearchSettings, SegmentReader, Term};
use crate::query::{
    CoordinationPolicy, DefaultCoordination, DefaultSimilarity, EnableScoring, Query, Similarity,
};
use crate::SegmentOrdinal;

/// Holds a list of `SegmentReader`s ready for search.
///
/// Besides the segments, the searcher carries everything a query needs
/// while building its weight: the [`SearchSettings`], the
/// [`CoordinationPolicy`] and the [`Similarity`].
#[derive(Clone)]
pub struct Searcher {
    segment_readers: Vec<SegmentReader>,
    settings: SearchSettings,
    executor: Arc<Executor>,
    coordination_policy: Arc<dyn CoordinationPolicy>,
    similarity: Arc<dyn Similarity>,
}

impl Searcher {
    /// Creates a searcher over the given segments, with default settings.
    pub fn new(segment_readers: Vec<SegmentReader>) -> Searcher {
        Searcher {
            segment_readers,
            settings: SearchSettings::default(),
            executor: Arc::new(Executor::single_thread()),
            coordination_policy: Arc::new(DefaultCoordination),
            similarity: Arc::new(DefaultSimilarity),
        }
    }

    /// Replaces the search settings.
    ///
    /// Returns an error if the settings are invalid.
    pub fn with_settings(mut self, settings: SearchSettings) -> crate::Result<Searcher> {
        settings.validate()?;
        self.settings = settings;
        Ok(self)
    }

    /// Segments will be searched using the given executor.
    pub fn with_executor(mut self, executor: Executor) -> Searcher {
        self.executor = Arc::new(executor);
        self
    }

    /// Replaces the coordination policy used by boolean queries.
    pub fn with_coordination_policy<P: CoordinationPolicy + 'static>(
        mut self,
        coordination_policy: P,
    ) -> Searcher {
        self.coordination_policy = Arc::new(coordination_policy);
        self
    }

    /// Replaces the similarity used by term queries.
    pub fn with_similarity<S: Similarity + 'static>(mut self, similarity: S) -> Searcher {
        self.similarity = Arc::new(similarity);
        self
    }

    /// Returns the search settings.
    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Returns the coordination policy.
    pub fn coordination_policy(&self) -> &dyn CoordinationPolicy {
        self.coordination_policy.as_ref()
    }

    /// Returns the similarity.
    pub fn similarity(&self) -> &Arc<dyn Similarity> {
        &self.similarity
    }

    /// Returns the overall number of documents.
    pub fn num_docs(&self) -> u64 {
        self.segment_readers
            .iter()
            .map(|segment_reader| u64::from(segment_reader.num_docs()))
            .sum::<u64>()
    }

    /// Return the overall number of documents containing
    /// the given term.
    pub fn doc_freq(&self, term: &Term) -> u64 {
        self.segment_readers
            .iter()
            .map(|segment_reader| u64::from(segment_reader.doc_freq(term)))
            .sum::<u64>()
    }

    /// Return the list of segment readers
    pub fn segment_readers(&self) -> &[SegmentReader] {
        &self.segment_readers
    }

    /// Returns the segment_reader associated with the given segment_ord
    pub fn segment_reader(&self, segment_ord: SegmentOrdinal) -> &SegmentReader {
        &self.segment_readers[segment_ord as usize]
    }

    /// Runs a query on the segment readers wrapped by the searcher.
    ///
    /// Search works as follows :
    ///
    ///  First the weight object associated to the query is created.
    ///
    ///  Then, the query loops over the segments and for each segment :
    ///  - setup the collector and informs it that the segment being processed has changed.
    ///  - creates a SegmentCollector for collecting documents associated to the segment
    ///  - creates a bulk scorer for this segment, in or out of order depending on the
    ///    collector
    ///  - pushes the matching documents to the segment collector.
    ///
    ///  Finally, the Collector merges each of the child collectors into itself for result
    ///  usability by the caller.
    pub fn search<C: Collector>(
        &self,
        query: &dyn Query,
        collector: &C,
    ) -> crate::Result<C::Fruit> {
        self.search_with_executor(query, collector, &self.executor)
    }

    /// Same as [`search(...)`](Searcher::search) but multithreaded.
    ///
    /// The current implementation is rather naive :
    /// multithreading is by splitting search into as many task
    /// as there are segments.
    pub fn search_with_executor<C: Collector>(
        &self,
        query: &dyn Query,
        collector: &C,
        executor: &Executor,
    ) -> crate::Result<C::Fruit> {
        let enable_scoring = if collector.requires_scoring() {
            EnableScoring::enabled_from_searcher(self)
        } else {
            EnableScoring::disabled_from_searcher(self)
        };
        let weight = query.weight(enable_scoring)?;
        let segment_readers = self.segment_readers();
        let fruits = executor.map(
            |(segment_ord, segment_reader)| {
                collector.collect_segment(weight.as_ref(), segment_ord as u32, segment_reader)
            },
            segment_readers.iter().enumerate(),
        )?;
        collector.merge_fruits(fruits)
    }
}

impl fmt::Debug for Searcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Searcher")
            .field("segment_readers", &self.segment_readers)
            .field("settings", &self.settings)
            .field("coordination_policy", &self.coordination_policy)
            .field("similarity", &self.similarity)
            .finish()
    }
}
