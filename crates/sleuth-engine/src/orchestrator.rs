//! The investigation loop.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

use sleuth_causal::Resolver;
use sleuth_core::errors::{SleuthError, SleuthResult};
use sleuth_core::models::{
    AnalysisResult, Category, InvestigationOutcome, Narrative, Phase, RecoveredError,
    RecoveredErrorKind, SpecialistTask, Symptoms,
};
use sleuth_core::traits::{DependencyGraphProvider, HypothesisNarrator, SnapshotSink};
use sleuth_core::{InvestigationState, SleuthConfig};
use sleuth_dispatch::{Dispatcher, SpecialistRegistry};
use sleuth_observability::trace::ORCHESTRATOR;
use sleuth_observability::tracing_setup::events;
use sleuth_observability::{investigation_span, route_span, InteractionTrace};
use sleuth_router::{route, triage, RouteDecision, TerminationReason};

use crate::builder::OrchestratorBuilder;

/// Drives investigations. Holds only immutable collaborators, so one
/// orchestrator can run any number of investigations, each with its own
/// exclusively owned state.
pub struct Orchestrator {
    pub(crate) config: SleuthConfig,
    pub(crate) registry: Arc<SpecialistRegistry>,
    pub(crate) dispatcher: Dispatcher,
    pub(crate) resolver: Resolver,
    pub(crate) graph: Option<Arc<dyn DependencyGraphProvider>>,
    pub(crate) narrator: Option<Arc<dyn HypothesisNarrator>>,
    pub(crate) sink: Option<Arc<dyn SnapshotSink>>,
}

/// Per-run bookkeeping that lives beside the state.
struct Run {
    state: InvestigationState,
    trace: InteractionTrace,
    narrative: Option<Narrative>,
    deadline: Instant,
    started_at: DateTime<Utc>,
}

impl Orchestrator {
    pub fn builder(config: SleuthConfig) -> OrchestratorBuilder {
        OrchestratorBuilder::new(config)
    }

    pub fn config(&self) -> &SleuthConfig {
        &self.config
    }

    pub fn registry(&self) -> &SpecialistRegistry {
        &self.registry
    }

    /// Investigate `symptoms` until done.
    ///
    /// Recovered errors (specialist failures, deadline, missing dependency
    /// graph, narrator and sink failures) end up in the phase history and
    /// set `degraded`. Only router invariant violations and the iteration
    /// limit are returned as errors.
    pub async fn run_investigation(&self, symptoms: impl Into<String>) -> SleuthResult<AnalysisResult> {
        self.run(symptoms.into(), None).await
    }

    /// Start over for a prior result. The new investigation is a fresh
    /// state linked to the prior one, which is the only way back to an
    /// earlier phase.
    pub async fn reinvestigate(
        &self,
        prior: &AnalysisResult,
        symptoms: impl Into<String>,
    ) -> SleuthResult<AnalysisResult> {
        let parent = Uuid::parse_str(&prior.investigation_id)
            .map_err(|e| SleuthError::Serialization(format!("invalid investigation id: {e}")))?;
        self.run(symptoms.into(), Some(parent)).await
    }

    async fn run(&self, description: String, parent: Option<Uuid>) -> SleuthResult<AnalysisResult> {
        let started_at = Utc::now();
        let profile = triage(&description);
        let symptoms = Symptoms::new(description).with_profile(profile);
        let mut state = InvestigationState::new(
            symptoms,
            self.registry.categories(),
            self.config.confidence.clone(),
            started_at,
        );
        if let Some(parent) = parent {
            state = state.with_parent(parent);
        }

        let span = investigation_span!(state.id());
        let run = Run {
            state,
            trace: InteractionTrace::new(),
            narrative: None,
            deadline: Instant::now()
                + Duration::from_secs(self.config.orchestrator.investigation_deadline_secs),
            started_at,
        };
        self.drive(run).instrument(span).await
    }

    async fn drive(&self, mut run: Run) -> SleuthResult<AnalysisResult> {
        events::investigation_started(&run.state.id().to_string(), self.registry.len());

        loop {
            let iteration = run
                .state
                .begin_iteration(self.config.orchestrator.max_iterations)
                .inspect_err(|err| {
                    tracing::error!(error = %err, state = %run.state.diagnostic_json(), "investigation aborted");
                })?;

            if run.state.phase().allows_dispatch() && Instant::now() >= run.deadline {
                self.force_root_cause(&mut run);
            }

            let decision = {
                let _guard = route_span!(run.state.phase(), iteration).entered();
                route(&run.state, &self.config.router).inspect_err(|err| {
                    tracing::error!(error = %err, "router invariant violated");
                })?
            };
            tracing::debug!(decision = %decision, "routed");

            match decision {
                RouteDecision::Dispatch { tasks } => self.dispatch(&mut run, tasks).await,
                RouteDecision::AdvancePhase { from, to } => {
                    if from == Phase::RootCauseDetermination {
                        self.resolve(&mut run)?;
                    }
                    run.state.advance_phase(to, Utc::now())?;
                    events::phase_advanced(from, to, false);
                    run.trace
                        .action(ORCHESTRATOR, "advance_phase", format!("{from} -> {to}"), Utc::now());
                    self.emit_snapshot(&mut run.state);
                }
                RouteDecision::Terminate { reason } => {
                    self.terminate(&mut run, reason).await?;
                    break;
                }
            }
        }

        Ok(self.finish(run))
    }

    /// One batch: dispatch, record the interaction, merge as a single
    /// transition. Completed results are merged even when the deadline cut
    /// the batch short.
    async fn dispatch(&self, run: &mut Run, tasks: Vec<SpecialistTask>) {
        let phase = run.state.phase();
        let categories: Vec<Category> = tasks.iter().map(|t| t.category.clone()).collect();
        events::batch_dispatched(phase, &categories);
        let now = Utc::now();
        for task in &tasks {
            run.trace.dispatched(task, now);
        }

        let batch = self.dispatcher.dispatch(tasks, Some(run.deadline)).await;

        let now = Utc::now();
        for outcome in &batch.outcomes {
            run.trace.returned(outcome, now);
        }
        let cut_short = batch.deadline_exceeded() || Instant::now() >= run.deadline;
        let report = run.state.merge_batch(batch, now);
        events::batch_merged(
            run.state.round(),
            report.findings_recorded,
            report.evidence_added,
            report.degraded,
        );

        if cut_short {
            self.force_root_cause(run);
        }
    }

    /// Deadline hit: keep whatever evidence exists and jump to root-cause
    /// determination.
    fn force_root_cause(&self, run: &mut Run) {
        let from = run.state.phase();
        let budget = self.config.orchestrator.investigation_deadline_secs;
        let now = Utc::now();
        run.state.record_recovered(RecoveredError::new(
            RecoveredErrorKind::DeadlineExceeded,
            format!("investigation deadline of {budget}s exceeded during {from}"),
            now,
        ));
        events::deadline_exceeded(from, budget);
        if run.state.force_phase(Phase::RootCauseDetermination, now) {
            events::phase_advanced(from, Phase::RootCauseDetermination, true);
            run.trace.action(
                ORCHESTRATOR,
                "force_phase",
                format!("{from} -> {}", Phase::RootCauseDetermination),
                now,
            );
            self.emit_snapshot(&mut run.state);
        }
    }

    fn resolve(&self, run: &mut Run) -> SleuthResult<()> {
        let findings = run.state.current_findings();
        let resolution = self.resolver.resolve(
            run.state.evidence(),
            &findings,
            self.graph.as_deref(),
        );
        let now = Utc::now();
        if let Some(err) = &resolution.graph_error {
            let recovered =
                RecoveredError::new(RecoveredErrorKind::DependencyGraphUnavailable, err.to_string(), now);
            events::error_recovered(&recovered);
            run.state.record_recovered(recovered);
        }
        run.trace.action(
            ORCHESTRATOR,
            "resolve",
            format!(
                "{} hypotheses, primary: {}",
                resolution.hypotheses.len(),
                resolution.primary().map_or("none", |h| h.description.as_str())
            ),
            now,
        );
        run.state.set_hypotheses(resolution.hypotheses)?;
        Ok(())
    }

    async fn terminate(&self, run: &mut Run, reason: TerminationReason) -> SleuthResult<()> {
        let from = run.state.phase();
        let now = Utc::now();
        match reason {
            TerminationReason::Completed => {
                run.narrative = self.narrate(&mut run.state).await;
                run.state.advance_phase(Phase::Done, now)?;
                events::phase_advanced(from, Phase::Done, false);
            }
            TerminationReason::NoSpecialists => {
                tracing::warn!("no specialists registered");
                if run.state.force_phase(Phase::Done, now) {
                    events::phase_advanced(from, Phase::Done, true);
                }
            }
        }
        run.trace
            .action(ORCHESTRATOR, "terminate", reason.to_string(), Utc::now());
        self.emit_snapshot(&mut run.state);
        Ok(())
    }

    async fn narrate(&self, state: &mut InvestigationState) -> Option<Narrative> {
        let narrator = self.narrator.as_ref()?;
        let hypotheses = state.hypotheses().filter(|h| !h.is_empty())?;
        let result = narrator.narrate(state.symptoms(), hypotheses).await;
        match result {
            Ok(narrative) => Some(narrative),
            Err(err) => {
                let recovered =
                    RecoveredError::new(RecoveredErrorKind::NarratorFailed, err.to_string(), Utc::now());
                events::error_recovered(&recovered);
                state.record_recovered(recovered);
                None
            }
        }
    }

    fn emit_snapshot(&self, state: &mut InvestigationState) {
        if !self.config.orchestrator.emit_snapshots {
            return;
        }
        let Some(sink) = &self.sink else {
            return;
        };
        if let Err(err) = sink.emit(state) {
            let recovered =
                RecoveredError::new(RecoveredErrorKind::SnapshotSinkFailed, err.to_string(), Utc::now());
            events::error_recovered(&recovered);
            state.record_recovered(recovered);
        }
    }

    fn finish(&self, run: Run) -> AnalysisResult {
        let Run {
            state,
            trace,
            narrative,
            started_at,
            ..
        } = run;

        let hypotheses = state.hypotheses().map(<[_]>::to_vec).unwrap_or_default();
        let outcome = if state.evidence().is_empty() {
            InvestigationOutcome::InsufficientEvidence {
                reason: "no evidence was collected from any specialist".to_string(),
            }
        } else {
            InvestigationOutcome::Resolved
        };
        let degraded = state.has_degradation();
        events::investigation_completed(&state.id().to_string(), state.iteration_count(), degraded);

        AnalysisResult {
            investigation_id: state.id().to_string(),
            parent_id: state.parent_id().map(|id| id.to_string()),
            symptoms: state.symptoms().description.clone(),
            outcome,
            phase_history: state.phase_history().to_vec(),
            confidence_history: state.confidence().history().to_vec(),
            final_confidence: state.confidence().snapshot(),
            primary_identified: hypotheses.iter().any(|h| h.is_primary()),
            hypotheses,
            degraded,
            evidence_count: state.evidence().len(),
            iterations: state.iteration_count(),
            narrative,
            trace: trace.into_records(),
            started_at,
            finished_at: Utc::now(),
        }
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("registry", &self.registry)
            .field("graph", &self.graph.is_some())
            .field("narrator", &self.narrator.is_some())
            .field("sink", &self.sink.is_some())
            .finish()
    }
}
