//! Daily scheduling run.
//!
//! # Run sequence for date D
//!
//! 1. Read available adjudicators. None → `NoAdjudicatorsAvailable`, no writes.
//! 2. Clear D's `Upcoming` entries and return their cases to `Pending`.
//! 3. Snapshot pending cases and order them with the rule engine.
//! 4. Allocate against a fresh clock registry, with each adjudicator's
//!    cursor moved past any entries still on D (held hearings).
//! 5. Commit entry/case pairs in order; abort on the first failed pair.
//!
//! A run is single-threaded and owns its clock state. Two runs for the
//! same date must not overlap; serializing them is the caller's job.

use chrono::NaiveDate;

use super::allocator::Allocator;
use super::kpi::ScheduleKpi;
use super::materializer::Materializer;
use super::venue::VenueSampler;
use crate::config::SchedulerConfig;
use crate::dispatching::RuleEngine;
use crate::error::{ScheduleError, StoreError};
use crate::estimator::DurationEstimator;
use crate::models::ScheduleEntry;
use crate::store::{AdjudicatorStore, CaseStore, ScheduleStore};
use crate::validation::validate_pools;

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Target date.
    pub date: NaiveDate,
    /// Upcoming entries removed before regeneration.
    pub cleared: usize,
    /// Newly created entries, in emission order.
    pub entries: Vec<ScheduleEntry>,
    /// Pending cases that fit no adjudicator.
    pub unscheduled: Vec<String>,
}

impl RunOutcome {
    /// Number of cases scheduled by this run.
    pub fn scheduled_count(&self) -> usize {
        self.entries.len()
    }
}

/// Hearing scheduler bound to its stores.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_hearing::config::SchedulerConfig;
/// use u_hearing::models::{Adjudicator, Case, PriorityTier};
/// use u_hearing::scheduler::DailyScheduler;
/// use u_hearing::store::{InMemoryAdjudicatorStore, InMemoryCaseStore, InMemoryScheduleStore};
///
/// let cases = InMemoryCaseStore::new(vec![
///     Case::new("Case1", "Criminal").with_priority(PriorityTier::High).with_witnesses(2),
///     Case::new("Case2", "Civil").with_witnesses(1),
/// ]);
/// let judges = InMemoryAdjudicatorStore::new(vec![
///     Adjudicator::new("J1", "Justice One").with_specialization("Criminal"),
/// ]);
///
/// let mut scheduler = DailyScheduler::new(
///     cases,
///     judges,
///     InMemoryScheduleStore::new(),
///     SchedulerConfig::default(),
/// );
/// let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// let outcome = scheduler.run_schedule(date).unwrap();
/// assert_eq!(outcome.scheduled_count(), 2);
/// assert_eq!(outcome.entries[1].start_time.to_string(), "10:50");
/// ```
#[derive(Debug)]
pub struct DailyScheduler<C, A, S> {
    cases: C,
    adjudicators: A,
    schedule: S,
    config: SchedulerConfig,
    estimator: DurationEstimator,
    rules: RuleEngine,
}

impl<C, A, S> DailyScheduler<C, A, S>
where
    C: CaseStore,
    A: AdjudicatorStore,
    S: ScheduleStore,
{
    /// Creates a scheduler. The estimator is built from `config`.
    pub fn new(cases: C, adjudicators: A, schedule: S, config: SchedulerConfig) -> Self {
        let estimator = DurationEstimator::from_config(&config);
        Self {
            cases,
            adjudicators,
            schedule,
            config,
            estimator,
            rules: RuleEngine::default_policy(),
        }
    }

    /// Replaces the duration estimator.
    pub fn with_estimator(mut self, estimator: DurationEstimator) -> Self {
        self.estimator = estimator;
        self
    }

    /// Replaces the prioritization rules.
    pub fn with_rules(mut self, rules: RuleEngine) -> Self {
        self.rules = rules;
        self
    }

    /// Runs the scheduler for `date`.
    pub fn run_schedule(&mut self, date: NaiveDate) -> Result<RunOutcome, ScheduleError> {
        let mut adjudicators = self.adjudicators.available_adjudicators()?;
        adjudicators.retain(|a| a.is_available());
        if adjudicators.is_empty() {
            tracing::warn!(%date, "no adjudicators available, run aborted");
            return Err(ScheduleError::NoAdjudicatorsAvailable);
        }

        let cleared = Materializer::new(&mut self.cases, &mut self.schedule).clear(date)?;

        let mut cases = self.cases.pending_cases()?;
        cases.retain(|c| c.is_pending());

        if let Err(findings) = validate_pools(&cases, &adjudicators) {
            for finding in &findings {
                tracing::warn!(kind = ?finding.kind, "{}", finding.message);
            }
        }

        tracing::info!(
            %date,
            pending = cases.len(),
            adjudicators = adjudicators.len(),
            cleared,
            "starting schedule run"
        );

        let retained = self.schedule.entries_for_date(date)?;
        let ordered = self.rules.sort(cases);
        let mut venues = VenueSampler::from_config(&self.config);
        let plan = Allocator::new(&self.config, &self.estimator).plan(
            date,
            &ordered,
            &adjudicators,
            &retained,
            &mut venues,
        );

        let entries =
            Materializer::new(&mut self.cases, &mut self.schedule).commit_all(plan.entries)?;

        tracing::info!(
            %date,
            scheduled = entries.len(),
            unscheduled = plan.unscheduled.len(),
            "schedule run complete"
        );

        Ok(RunOutcome {
            date,
            cleared,
            entries,
            unscheduled: plan.unscheduled,
        })
    }

    /// Runs the scheduler for today in local time.
    pub fn run_today(&mut self) -> Result<RunOutcome, ScheduleError> {
        self.run_schedule(chrono::Local::now().date_naive())
    }

    /// All entries stored for `date`.
    pub fn daily_schedule(&self, date: NaiveDate) -> Result<Vec<ScheduleEntry>, StoreError> {
        self.schedule.entries_for_date(date)
    }

    /// Load metrics for `date` across currently available adjudicators.
    pub fn utilization(&self, date: NaiveDate) -> Result<ScheduleKpi, StoreError> {
        let entries = self.schedule.entries_for_date(date)?;
        let adjudicators = self.adjudicators.available_adjudicators()?;
        Ok(ScheduleKpi::calculate(date, &entries, &adjudicators))
    }

    /// Records that the hearing for `case_number` on `date` took place.
    pub fn mark_held(&mut self, date: NaiveDate, case_number: &str) -> Result<(), StoreError> {
        self.schedule.mark_held(date, case_number)
    }

    /// Policy in use.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Case store.
    pub fn case_store(&self) -> &C {
        &self.cases
    }

    /// Mutable case store, for hosts that register or close cases between runs.
    pub fn case_store_mut(&mut self) -> &mut C {
        &mut self.cases
    }

    /// Adjudicator store.
    pub fn adjudicator_store(&self) -> &A {
        &self.adjudicators
    }

    /// Schedule store.
    pub fn schedule_store(&self) -> &S {
        &self.schedule
    }

    /// Releases the stores.
    pub fn into_parts(self) -> (C, A, S) {
        (self.cases, self.adjudicators, self.schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::{CaseFeatures, DurationModel, EstimatorError};
    use crate::models::{
        Adjudicator, AdjudicatorStatus, Case, CaseStatus, ClockTime, PriorityTier, RiskLevel,
    };
    use crate::store::{InMemoryAdjudicatorStore, InMemoryCaseStore, InMemoryScheduleStore};
    use proptest::prelude::*;

    type MemScheduler =
        DailyScheduler<InMemoryCaseStore, InMemoryAdjudicatorStore, InMemoryScheduleStore>;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn scheduler(cases: Vec<Case>, judges: Vec<Adjudicator>) -> MemScheduler {
        DailyScheduler::new(
            InMemoryCaseStore::new(cases),
            InMemoryAdjudicatorStore::new(judges),
            InMemoryScheduleStore::new(),
            SchedulerConfig::default(),
        )
    }

    fn scenario() -> MemScheduler {
        scheduler(
            vec![
                Case::new("Case1", "Criminal")
                    .with_priority(PriorityTier::High)
                    .with_witnesses(2),
                Case::new("Case2", "Civil").with_witnesses(1),
            ],
            vec![Adjudicator::new("J1", "Justice One").with_specialization("Criminal")],
        )
    }

    fn triples(entries: &[ScheduleEntry]) -> Vec<(String, String, ClockTime)> {
        entries
            .iter()
            .map(|e| (e.case_number.clone(), e.adjudicator_id.clone(), e.start_time))
            .collect()
    }

    fn triple(case: &str, judge: &str, start: ClockTime) -> (String, String, ClockTime) {
        (case.to_string(), judge.to_string(), start)
    }

    #[test]
    fn test_end_to_end_scenario() {
        let mut s = scenario();
        let outcome = s.run_schedule(date()).unwrap();

        assert_eq!(outcome.scheduled_count(), 2);
        assert_eq!(outcome.cleared, 0);
        assert!(outcome.unscheduled.is_empty());

        let e1 = &outcome.entries[0];
        assert_eq!(
            (e1.case_number.as_str(), e1.adjudicator_id.as_str()),
            ("Case1", "J1")
        );
        assert_eq!((e1.start_time, e1.end_time), (ClockTime::hm(10, 0), ClockTime::hm(10, 35)));
        assert_eq!(e1.duration_minutes, 35);
        assert_eq!(e1.risk_level, RiskLevel::Low);

        let e2 = &outcome.entries[1];
        assert_eq!(e2.case_number, "Case2");
        assert_eq!((e2.start_time, e2.end_time), (ClockTime::hm(10, 50), ClockTime::hm(11, 15)));
        assert_eq!(e2.duration_minutes, 25);
        assert_eq!(e2.risk_level, RiskLevel::Low);

        for number in ["Case1", "Case2"] {
            let case = s.case_store().get(number).unwrap();
            assert_eq!(case.status, CaseStatus::Scheduled);
            assert_eq!(case.hearing_date, Some(date()));
        }
        assert_eq!(s.daily_schedule(date()).unwrap().len(), 2);
    }

    #[test]
    fn test_no_adjudicators_writes_nothing() {
        let mut s = scheduler(
            vec![Case::new("A", "Civil")],
            vec![Adjudicator::new("J1", "One").with_status(AdjudicatorStatus::Unavailable)],
        );
        let err = s.run_schedule(date()).unwrap_err();
        assert_eq!(err, ScheduleError::NoAdjudicatorsAvailable);
        assert_eq!(err.to_string(), "No adjudicators available");
        assert!(s.case_store().get("A").unwrap().is_pending());
        assert!(s.schedule_store().is_empty());
    }

    #[test]
    fn test_no_adjudicators_keeps_prior_entries() {
        let mut s = scenario();
        s.run_schedule(date()).unwrap();
        let (cases, _, schedule) = s.into_parts();
        let mut s = DailyScheduler::new(
            cases,
            InMemoryAdjudicatorStore::new(Vec::new()),
            schedule,
            SchedulerConfig::default(),
        );
        assert!(s.run_schedule(date()).is_err());
        assert_eq!(s.schedule_store().len(), 2);
        assert_eq!(s.case_store().get("Case1").unwrap().status, CaseStatus::Scheduled);
    }

    #[test]
    fn test_rerun_regenerates_same_assignments() {
        let mut s = scenario();
        let first = s.run_schedule(date()).unwrap();
        let second = s.run_schedule(date()).unwrap();

        assert_eq!(second.cleared, 2);
        assert_eq!(first.scheduled_count(), second.scheduled_count());
        assert_eq!(triples(&first.entries), triples(&second.entries));
        assert_eq!(s.schedule_store().len(), 2);
    }

    #[test]
    fn test_rerun_preserves_held_entries() {
        let mut s = scenario();
        s.run_schedule(date()).unwrap();
        s.mark_held(date(), "Case1").unwrap();

        let outcome = s.run_schedule(date()).unwrap();
        assert_eq!(outcome.cleared, 1);
        assert_eq!(triples(&outcome.entries), [triple("Case2", "J1", ClockTime::hm(10, 50))]);

        let day = s.daily_schedule(date()).unwrap();
        assert_eq!(day.len(), 2);
        assert!(!day[0].window().overlaps(&day[1].window()));
        assert_eq!(s.case_store().get("Case1").unwrap().status, CaseStatus::Scheduled);
    }

    #[test]
    fn test_rerun_after_late_held_hearing() {
        let mut s = scenario();
        s.run_schedule(date()).unwrap();
        s.mark_held(date(), "Case2").unwrap();

        // Case1 is regenerated after the held 10:50-11:15 hearing.
        let outcome = s.run_schedule(date()).unwrap();
        assert_eq!(triples(&outcome.entries), [triple("Case1", "J1", ClockTime::hm(11, 30))]);
    }

    #[test]
    fn test_other_dates_untouched() {
        let mut s = scenario();
        s.run_schedule(date()).unwrap();
        s.case_store_mut().insert(Case::new("Case3", "Family"));

        let next = date().succ_opt().unwrap();
        let outcome = s.run_schedule(next).unwrap();
        assert_eq!(outcome.cleared, 0);
        assert_eq!(triples(&outcome.entries), [triple("Case3", "J1", ClockTime::hm(10, 0))]);
        assert_eq!(s.daily_schedule(date()).unwrap().len(), 2);
    }

    #[test]
    fn test_closed_and_scheduled_cases_not_offered() {
        let mut s = scheduler(
            vec![
                Case::new("open", "Civil"),
                Case::new("closed", "Civil").with_status(CaseStatus::Closed),
                Case::new("done", "Civil").with_status(CaseStatus::Scheduled),
            ],
            vec![Adjudicator::new("J1", "One")],
        );
        let outcome = s.run_schedule(date()).unwrap();
        assert_eq!(triples(&outcome.entries), [triple("open", "J1", ClockTime::hm(10, 0))]);
    }

    #[test]
    fn test_unschedulable_cases_stay_pending() {
        let cases: Vec<Case> = (0..5)
            .map(|i| Case::new(format!("C{i}"), "Civil").with_witnesses(10))
            .collect();
        let mut s = scheduler(cases, vec![Adjudicator::new("J1", "One")]);
        let outcome = s.run_schedule(date()).unwrap();

        assert_eq!(outcome.scheduled_count(), 3);
        assert_eq!(outcome.unscheduled, ["C3", "C4"]);
        assert!(s.case_store().get("C3").unwrap().is_pending());
        assert!(s.case_store().get("C4").unwrap().is_pending());
    }

    #[derive(Debug)]
    struct Failing;

    impl DurationModel for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn predict(&self, _features: &CaseFeatures) -> Result<f64, EstimatorError> {
            Err(EstimatorError::Prediction("model crashed".into()))
        }
    }

    #[test]
    fn test_model_failure_uses_heuristic() {
        let mut s = scenario().with_estimator(DurationEstimator::default().with_model(Failing));
        let outcome = s.run_schedule(date()).unwrap();
        assert_eq!(outcome.entries[0].duration_minutes, 35);
        assert_eq!(outcome.entries[1].duration_minutes, 25);
    }

    #[derive(Debug)]
    struct Runaway;

    impl DurationModel for Runaway {
        fn name(&self) -> &'static str {
            "runaway"
        }

        fn predict(&self, _features: &CaseFeatures) -> Result<f64, EstimatorError> {
            Ok(1e12)
        }
    }

    #[test]
    fn test_huge_model_prediction_does_not_break_run() {
        let mut s = scenario().with_estimator(DurationEstimator::default().with_model(Runaway));
        let outcome = s.run_schedule(date()).unwrap();
        assert_eq!(outcome.scheduled_count(), 2);
        for e in &outcome.entries {
            assert!(e.start_time < e.end_time);
            assert!(e.end_time <= ClockTime::hm(17, 0));
        }
    }

    #[test]
    fn test_utilization_report() {
        let mut s = scenario();
        s.run_schedule(date()).unwrap();
        let kpi = s.utilization(date()).unwrap();
        let j1 = kpi.for_adjudicator("J1").unwrap();
        assert_eq!(j1.hearings, 2);
        assert_eq!(j1.minutes_booked, 60);
        assert!((j1.utilization_percent - 20.0).abs() < 1e-10);
    }

    /// Case store that refuses status updates for one case.
    struct StuckCase {
        inner: InMemoryCaseStore,
        stuck: &'static str,
    }

    impl CaseStore for StuckCase {
        fn pending_cases(&self) -> Result<Vec<Case>, StoreError> {
            self.inner.pending_cases()
        }

        fn mark_scheduled(&mut self, case_number: &str, date: NaiveDate) -> Result<(), StoreError> {
            if case_number == self.stuck {
                return Err(StoreError::Backend("write timeout".into()));
            }
            self.inner.mark_scheduled(case_number, date)
        }

        fn release(&mut self, case_number: &str, date: NaiveDate) -> Result<(), StoreError> {
            self.inner.release(case_number, date)
        }
    }

    #[test]
    fn test_persistence_failure_aborts_with_partial_count() {
        let cases = StuckCase {
            inner: InMemoryCaseStore::new(vec![
                Case::new("A", "Criminal"),
                Case::new("B", "Civil"),
                Case::new("C", "Civil"),
            ]),
            stuck: "B",
        };
        let mut s = DailyScheduler::new(
            cases,
            InMemoryAdjudicatorStore::new(vec![Adjudicator::new("J1", "One")]),
            InMemoryScheduleStore::new(),
            SchedulerConfig::default(),
        );

        let err = s.run_schedule(date()).unwrap_err();
        assert_eq!(err.scheduled_count(), 1);

        let entries = s.daily_schedule(date()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].case_number, "A");
        let inner = &s.case_store().inner;
        assert!(inner.get("B").unwrap().is_pending());
        assert!(inner.get("C").unwrap().is_pending());
    }

    /// Case store that cannot release one case.
    struct StuckRelease {
        inner: InMemoryCaseStore,
        stuck: &'static str,
    }

    impl CaseStore for StuckRelease {
        fn pending_cases(&self) -> Result<Vec<Case>, StoreError> {
            self.inner.pending_cases()
        }

        fn mark_scheduled(&mut self, case_number: &str, date: NaiveDate) -> Result<(), StoreError> {
            self.inner.mark_scheduled(case_number, date)
        }

        fn release(&mut self, case_number: &str, date: NaiveDate) -> Result<(), StoreError> {
            if case_number == self.stuck {
                return Err(StoreError::Unavailable("connection reset".into()));
            }
            self.inner.release(case_number, date)
        }
    }

    #[test]
    fn test_release_failure_keeps_cases_and_entries_paired() {
        let cases = StuckRelease {
            inner: InMemoryCaseStore::new(vec![Case::new("A", "Civil"), Case::new("B", "Civil")]),
            stuck: "B",
        };
        let mut s = DailyScheduler::new(
            cases,
            InMemoryAdjudicatorStore::new(vec![Adjudicator::new("J1", "One")]),
            InMemoryScheduleStore::new(),
            SchedulerConfig::default(),
        );
        s.run_schedule(date()).unwrap();

        let err = s.run_schedule(date()).unwrap_err();
        assert!(matches!(err, ScheduleError::Store(StoreError::Unavailable(_))));

        let day = s.daily_schedule(date()).unwrap();
        assert_eq!(day.len(), 1);
        assert_eq!(day[0].case_number, "B");
        let inner = &s.case_store().inner;
        assert!(inner.get("A").unwrap().is_pending());
        assert_eq!(inner.get("B").unwrap().status, CaseStatus::Scheduled);
        assert_eq!(inner.get("B").unwrap().hearing_date, Some(date()));
    }

    /// Adjudicator store that cannot be reached.
    struct Offline;

    impl AdjudicatorStore for Offline {
        fn available_adjudicators(&self) -> Result<Vec<Adjudicator>, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
    }

    #[test]
    fn test_store_read_failure() {
        let mut s = DailyScheduler::new(
            InMemoryCaseStore::new(vec![Case::new("A", "Civil")]),
            Offline,
            InMemoryScheduleStore::new(),
            SchedulerConfig::default(),
        );
        let err = s.run_schedule(date()).unwrap_err();
        assert!(matches!(err, ScheduleError::Store(StoreError::Unavailable(_))));
        assert!(s.case_store().get("A").unwrap().is_pending());
    }

    proptest! {
        #[test]
        fn prop_rerun_is_idempotent(
            witnesses in prop::collection::vec(0u32..13, 0..30),
            judge_count in 1usize..4,
        ) {
            let cases: Vec<Case> = witnesses
                .iter()
                .enumerate()
                .map(|(i, &w)| {
                    let kind = if i % 3 == 0 { "Criminal" } else { "Civil" };
                    Case::new(format!("C{i}"), kind).with_witnesses(w)
                })
                .collect();
            let judges: Vec<Adjudicator> = (0..judge_count)
                .map(|j| {
                    let tag = if j == 0 { "criminal" } else { "civil" };
                    Adjudicator::new(format!("J{j}"), "N").with_specialization(tag)
                })
                .collect();

            let mut s = scheduler(cases, judges);
            let first = s.run_schedule(date()).unwrap();
            let second = s.run_schedule(date()).unwrap();

            prop_assert_eq!(first.scheduled_count(), second.scheduled_count());
            prop_assert_eq!(triples(&first.entries), triples(&second.entries));
            prop_assert_eq!(s.schedule_store().len(), second.scheduled_count());
        }
    }
}
