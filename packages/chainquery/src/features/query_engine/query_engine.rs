// QueryEngine - select / collect / remove over in-memory sources
//
// Three entry shapes, one core:
// - explicit transform (recorded chain or selector function)
// - chain claimed from a CaptureContext
// - staged source (`from` / `from_mut`) whose stand-in records the chain
//
// Replay runs per element in source order; `settle` applies the
// configured failure policy to each outcome.

use super::staged::{StagedQuery, StagedRemoval};
use crate::config::{EmptyClaimPolicy, FailurePolicy, QueryConfig, Validatable};
use crate::errors::{QueryError, ReplayResult, Result};
use crate::features::capture::{Recorder, StandIn};
use crate::features::capture_context::CaptureContext;
use crate::features::expression::{ExpressionChain, Matcher, Transform};
use crate::features::type_resolution::{Source, SourceMut, TypeResolver};
use crate::shared::models::{Describe, Recordable, TypeHandle, Value};
use tracing::{debug, warn};

/// Query Engine - main entry point for query execution
///
/// Example:
/// ```ignore
/// let engine = QueryEngine::new();
///
/// // explicit chain
/// let last_name = ExpressionChain::path(Person::type_handle(), &["last_name"])?;
/// let smiths = engine.select(&people, &last_name, Match::eq("Smith"))?;
///
/// // staged source
/// let query = engine.from(&people)?;
/// query.each().get("first_name")?;
/// let names = query.collect()?;
/// ```
#[derive(Debug)]
pub struct QueryEngine {
    config: QueryConfig,
    resolver: TypeResolver,
}

impl QueryEngine {
    /// Engine with the standard preset
    pub fn new() -> Self {
        let config = QueryConfig::default();
        let resolver = TypeResolver::new().with_tag_probes(config.use_tag_probes);
        Self { config, resolver }
    }

    /// Engine with a validated configuration
    pub fn with_config(config: QueryConfig) -> Result<Self> {
        config.validate()?;
        let resolver = TypeResolver::new().with_tag_probes(config.use_tag_probes);
        Ok(Self { config, resolver })
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    pub fn resolver(&self) -> &TypeResolver {
        &self.resolver
    }

    /// Register tag probes here
    pub fn resolver_mut(&mut self) -> &mut TypeResolver {
        &mut self.resolver
    }

    /// Fresh capture context using this engine's overwrite policy and limits
    pub fn capture_context(&self) -> CaptureContext {
        CaptureContext::with_config(&self.config)
    }

    /// Stand-in recording a new chain rooted at `ty`
    pub fn capture(&self, ty: TypeHandle) -> Result<StandIn> {
        let recorder = Recorder::new(ty, self.config.max_chain_steps)?;
        Ok(recorder.stand_in())
    }

    /// `capture` for a statically known type
    pub fn capture_for<T: Describe>(&self) -> Result<StandIn> {
        self.capture(T::type_handle())
    }

    // ------------------------------------------------------------------
    // Explicit transform
    // ------------------------------------------------------------------

    /// Elements whose derived value matches, cloned into a new `Vec`
    pub fn select<S, X, M>(&self, source: &S, transform: X, matcher: M) -> Result<Vec<S::Item>>
    where
        S: Source + ?Sized,
        S::Item: Clone,
        X: Transform<S::Item>,
        M: Matcher<X::Output>,
    {
        let mut selected = Vec::new();
        for (index, item) in source.iter_items().enumerate() {
            if let Some(value) = self.settle(index, transform.apply(item))? {
                if matcher.matches(&value) {
                    selected.push(item.clone());
                }
            }
        }
        debug!("select: {} of {} elements matched", selected.len(), source.len());
        Ok(selected)
    }

    /// Elements matching a predicate on the element itself
    pub fn select_matching<S, P>(&self, source: &S, predicate: P) -> Vec<S::Item>
    where
        S: Source + ?Sized,
        S::Item: Clone,
        P: Matcher<S::Item>,
    {
        let selected: Vec<S::Item> = source
            .iter_items()
            .filter(|item| predicate.matches(item))
            .cloned()
            .collect();
        debug!("select_matching: {} of {} elements matched", selected.len(), source.len());
        selected
    }

    /// Derived value of every element, in source order
    pub fn collect<S, X>(&self, source: &S, transform: X) -> Result<Vec<X::Output>>
    where
        S: Source + ?Sized,
        X: Transform<S::Item>,
    {
        let mut collected = Vec::with_capacity(source.len());
        for (index, item) in source.iter_items().enumerate() {
            if let Some(value) = self.settle(index, transform.apply(item))? {
                collected.push(value);
            }
        }
        debug!("collect: {} values from {} elements", collected.len(), source.len());
        Ok(collected)
    }

    /// Remove in place every element whose derived value matches
    ///
    /// All elements are evaluated before anything is removed, so an aborted
    /// query leaves `source` untouched. Returns the number removed.
    pub fn remove<S, X, M>(&self, source: &mut S, transform: X, matcher: M) -> Result<usize>
    where
        S: SourceMut + ?Sized,
        X: Transform<S::Item>,
        M: Matcher<X::Output>,
    {
        let mut doomed = Vec::with_capacity(source.len());
        for (index, item) in source.iter_items().enumerate() {
            let hit = match self.settle(index, transform.apply(item))? {
                Some(value) => matcher.matches(&value),
                None => false,
            };
            doomed.push(hit);
        }
        Ok(retain_unmarked(source, &doomed))
    }

    /// Remove in place every element matching a predicate on the element
    pub fn remove_matching<S, P>(&self, source: &mut S, predicate: P) -> usize
    where
        S: SourceMut + ?Sized,
        P: Matcher<S::Item>,
    {
        let doomed: Vec<bool> = source.iter_items().map(|item| predicate.matches(item)).collect();
        retain_unmarked(source, &doomed)
    }

    // ------------------------------------------------------------------
    // Claimed chain
    // ------------------------------------------------------------------

    /// `select` with the chain staged in `ctx`
    pub fn select_claimed<S, M>(
        &self,
        ctx: &mut CaptureContext,
        source: &S,
        matcher: M,
    ) -> Result<Vec<S::Item>>
    where
        S: Source + ?Sized,
        S::Item: Recordable + Clone,
        M: Matcher<Value>,
    {
        let chain = self.claim(ctx)?;
        self.select(source, &chain, matcher)
    }

    /// `collect` with the chain staged in `ctx`
    pub fn collect_claimed<S>(&self, ctx: &mut CaptureContext, source: &S) -> Result<Vec<Value>>
    where
        S: Source + ?Sized,
        S::Item: Recordable,
    {
        let chain = self.claim(ctx)?;
        self.collect(source, &chain)
    }

    /// `remove` with the chain staged in `ctx`
    pub fn remove_claimed<S, M>(
        &self,
        ctx: &mut CaptureContext,
        source: &mut S,
        matcher: M,
    ) -> Result<usize>
    where
        S: SourceMut + ?Sized,
        S::Item: Recordable,
        M: Matcher<Value>,
    {
        let chain = self.claim(ctx)?;
        self.remove(source, &chain, matcher)
    }

    // ------------------------------------------------------------------
    // Staged source
    // ------------------------------------------------------------------

    /// Stage `source`: resolve its element type and hand out a stand-in
    pub fn from<'s, S>(&self, source: &'s S) -> Result<StagedQuery<'s, '_, S>>
    where
        S: Source + ?Sized,
        S::Item: Recordable,
    {
        let resolution = self.resolver.resolve(source)?;
        let recorder = Recorder::new(resolution.element_type, self.config.max_chain_steps)?;
        debug!(
            "staged source of {} elements as {} ({:?})",
            source.len(),
            resolution.element_type,
            resolution.strategy
        );
        Ok(StagedQuery::new(self, source, resolution, recorder.stand_in()))
    }

    /// `from` for in-place removal
    pub fn from_mut<'s, S>(&self, source: &'s mut S) -> Result<StagedRemoval<'s, '_, S>>
    where
        S: SourceMut + ?Sized,
        S::Item: Recordable,
    {
        let resolution = self.resolver.resolve(&*source)?;
        let recorder = Recorder::new(resolution.element_type, self.config.max_chain_steps)?;
        debug!(
            "staged mutable source of {} elements as {} ({:?})",
            source.len(),
            resolution.element_type,
            resolution.strategy
        );
        Ok(StagedRemoval::new(self, source, resolution, recorder.stand_in()))
    }

    fn claim(&self, ctx: &mut CaptureContext) -> Result<ExpressionChain> {
        match ctx.claim() {
            Some(chain) => Ok(chain),
            None => match self.config.empty_claim {
                EmptyClaimPolicy::Identity => Ok(ExpressionChain::identity()),
                EmptyClaimPolicy::Reject => Err(QueryError::NoStagedExpression),
            },
        }
    }

    /// Apply the failure policy to one element's replay outcome
    fn settle<V>(&self, index: usize, outcome: ReplayResult<V>) -> Result<Option<V>> {
        match outcome {
            Ok(value) => Ok(Some(value)),
            Err(source) => match self.config.failure_policy {
                FailurePolicy::Abort => Err(QueryError::ReplayFailure { index, source }),
                FailurePolicy::Skip => {
                    warn!("skipping element {}: {}", index, source);
                    Ok(None)
                }
            },
        }
    }
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Single retain pass dropping elements whose mark is set
fn retain_unmarked<S: SourceMut + ?Sized>(source: &mut S, doomed: &[bool]) -> usize {
    let before = source.len();
    let mut cursor = 0usize;
    source.retain_items(&mut |_| {
        let remove = doomed.get(cursor).copied().unwrap_or(false);
        cursor += 1;
        !remove
    });
    let removed = before - source.len();
    debug!("remove: {} of {} elements removed", removed, before);
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Preset;
    use crate::errors::{CaptureError, InvokeError};
    use crate::features::expression::{transform, Match};
    use crate::features::typed_collections::typed_view;
    use crate::test_fixtures::{people, Person};
    use std::collections::VecDeque;

    fn last_name() -> ExpressionChain {
        ExpressionChain::path(Person::type_handle(), &["last_name"]).unwrap()
    }

    fn town() -> ExpressionChain {
        ExpressionChain::path(Person::type_handle(), &["address", "town"]).unwrap()
    }

    #[test]
    fn test_select_smiths_in_order() {
        let engine = QueryEngine::new();
        let source = people();
        let smiths = engine.select(&source, &last_name(), Match::eq("Smith")).unwrap();
        assert_eq!(smiths, vec![source[0].clone(), source[2].clone()]);
    }

    #[test]
    fn test_select_with_selector_function() {
        let engine = QueryEngine::new();
        let source = people();
        let billies = engine
            .select(
                &source,
                transform(|p: &Person| p.first_name()),
                |name: &String| name == "Billy",
            )
            .unwrap();
        assert_eq!(billies.len(), 2);
    }

    #[test]
    fn test_select_matching_on_element() {
        let source: VecDeque<Person> = people().into();
        let housed = QueryEngine::new().select_matching(&source, |p: &Person| p.address.is_some());
        assert_eq!(housed.len(), 2);
    }

    #[test]
    fn test_collect_first_names() {
        let names = QueryEngine::new()
            .collect(
                &people(),
                ExpressionChain::path(Person::type_handle(), &["first_name"]).unwrap(),
            )
            .unwrap();
        assert_eq!(
            names,
            vec![Value::from("Billy"), Value::from("Billy"), Value::from("James")]
        );
    }

    #[test]
    fn test_abort_reports_failing_element() {
        let err = QueryEngine::new().collect(&people(), &town()).unwrap_err();
        match err {
            QueryError::ReplayFailure { index, source } => {
                assert_eq!(index, 2);
                assert!(matches!(source.source, InvokeError::NullTarget { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_skip_policy_drops_failures() {
        let engine =
            QueryEngine::with_config(QueryConfig::preset(Preset::Lenient)).unwrap();
        let towns = engine.collect(&people(), &town()).unwrap();
        assert_eq!(towns, vec![Value::from("Leeds"), Value::from("York")]);
    }

    #[test]
    fn test_remove_in_place() {
        let mut source = people();
        let removed = QueryEngine::new()
            .remove(&mut source, &last_name(), Match::eq("Smith"))
            .unwrap();
        assert_eq!(removed, 2);
        assert_eq!(source.len(), 1);
        assert_eq!(source[0].last_name, "Jones");
    }

    #[test]
    fn test_aborted_remove_leaves_source_untouched() {
        let mut source = people();
        let result = QueryEngine::new().remove(&mut source, &town(), Match::eq("Leeds"));
        assert!(result.is_err());
        assert_eq!(source, people());
    }

    #[test]
    fn test_skipped_elements_survive_remove() {
        let engine =
            QueryEngine::with_config(QueryConfig::preset(Preset::Lenient)).unwrap();
        let mut source = people();
        let removed = engine.remove(&mut source, &town(), Match::any()).unwrap();
        assert_eq!(removed, 2);
        assert_eq!(source[0].first_name, "James");
    }

    #[test]
    fn test_remove_matching() {
        let mut source = people();
        let removed = QueryEngine::new().remove_matching(&mut source, |p: &Person| p.first_name == "James");
        assert_eq!(removed, 1);
        assert_eq!(source.len(), 2);
    }

    #[test]
    fn test_claimed_chain() {
        let engine = QueryEngine::new();
        let mut ctx = engine.capture_context();
        ctx.begin_for::<Person>().unwrap().get("last_name").unwrap();

        let source = people();
        let jones = engine.select_claimed(&mut ctx, &source, Match::eq("Jones")).unwrap();
        assert_eq!(jones, vec![source[1].clone()]);

        // context is drained: identity chain, so every element is collected
        let all = engine.collect_claimed(&mut ctx, &source).unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|v| v.as_record().is_some()));
    }

    #[test]
    fn test_strict_rejects_empty_claim() {
        let engine = QueryEngine::with_config(QueryConfig::preset(Preset::Strict)).unwrap();
        let mut ctx = engine.capture_context();
        let mut source = people();
        assert!(matches!(
            engine.remove_claimed(&mut ctx, &mut source, Match::any()),
            Err(QueryError::NoStagedExpression)
        ));
        assert_eq!(source.len(), 3);
    }

    #[test]
    fn test_capture_rejects_primitive() {
        let err = QueryEngine::new().capture_for::<i64>().unwrap_err();
        assert!(matches!(err, QueryError::UnsupportedCaptureTarget { .. }));
    }

    #[test]
    fn test_capture_honours_step_limit() {
        let config = QueryConfig::default().max_chain_steps(1);
        let engine = QueryEngine::with_config(config).unwrap();
        let each = engine.capture_for::<Person>().unwrap();
        let address = each.get("address").unwrap();
        assert!(matches!(
            address.get("town"),
            Err(CaptureError::ChainTooLong { limit: 1 })
        ));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = QueryConfig::default().max_chain_steps(0);
        assert!(matches!(
            QueryEngine::with_config(config),
            Err(QueryError::Config(_))
        ));
    }

    #[test]
    fn test_staged_select_and_collect() {
        let engine = QueryEngine::new();
        let source = people();

        let query = engine.from(&source).unwrap();
        assert_eq!(query.element_type(), Person::type_handle());
        query.each().get("last_name").unwrap();
        let smiths = query.select(Match::eq("Smith")).unwrap();
        assert_eq!(smiths, vec![source[0].clone(), source[2].clone()]);

        let names = engine
            .from(&source)
            .unwrap()
            .path(&["address", "town"])
            .unwrap()
            .collect();
        // James Smith has no address
        assert!(matches!(names, Err(QueryError::ReplayFailure { index: 2, .. })));
    }

    #[test]
    fn test_staged_empty_sources() {
        let engine = QueryEngine::new();
        let untyped: Vec<Person> = Vec::new();
        assert!(matches!(
            engine.from(&untyped),
            Err(QueryError::AmbiguousElementType(_))
        ));

        let typed = typed_view(Vec::<Person>::new(), Person::type_handle());
        let query = engine.from(&typed).unwrap().path(&["first_name"]).unwrap();
        assert!(query.collect().unwrap().is_empty());
    }

    #[test]
    fn test_staged_removal() {
        let engine = QueryEngine::new();
        let mut source = people();
        let removed = engine
            .from_mut(&mut source)
            .unwrap()
            .path(&["first_name"])
            .unwrap()
            .remove(Match::eq("Billy"))
            .unwrap();
        assert_eq!(removed, 2);
        assert_eq!(source, vec![Person::new("James", "Smith")]);
    }

    #[test]
    fn test_staged_sealed_element_is_unsupported() {
        use crate::test_fixtures::Badge;
        let badges = vec![Badge { number: 1 }];
        assert!(matches!(
            QueryEngine::new().from(&badges),
            Err(QueryError::UnsupportedCaptureTarget { .. })
        ));
    }
}
