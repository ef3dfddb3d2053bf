use std::sync::Arc;

use sleuth_causal::Resolver;
use sleuth_core::errors::SleuthResult;
use sleuth_core::traits::{DependencyGraphProvider, HypothesisNarrator, SnapshotSink, Specialist};
use sleuth_core::SleuthConfig;
use sleuth_dispatch::{Dispatcher, SpecialistRegistry};

use crate::orchestrator::Orchestrator;

/// Assembles an [`Orchestrator`] from its collaborators.
#[derive(Default)]
pub struct OrchestratorBuilder {
    config: SleuthConfig,
    registry: SpecialistRegistry,
    graph: Option<Arc<dyn DependencyGraphProvider>>,
    narrator: Option<Arc<dyn HypothesisNarrator>>,
    sink: Option<Arc<dyn SnapshotSink>>,
}

impl OrchestratorBuilder {
    pub fn new(config: SleuthConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Register a specialist. A later one for the same category replaces
    /// the earlier one.
    pub fn specialist(mut self, specialist: Arc<dyn Specialist>) -> Self {
        if let Some(replaced) = self.registry.register(specialist) {
            tracing::warn!(category = %replaced.category(), "specialist replaced");
        }
        self
    }

    pub fn specialists(self, specialists: impl IntoIterator<Item = Arc<dyn Specialist>>) -> Self {
        specialists.into_iter().fold(self, Self::specialist)
    }

    pub fn dependency_graph(mut self, provider: Arc<dyn DependencyGraphProvider>) -> Self {
        self.graph = Some(provider);
        self
    }

    pub fn narrator(mut self, narrator: Arc<dyn HypothesisNarrator>) -> Self {
        self.narrator = Some(narrator);
        self
    }

    pub fn snapshot_sink(mut self, sink: Arc<dyn SnapshotSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Validate the config and build.
    pub fn build(self) -> SleuthResult<Orchestrator> {
        self.config.validate()?;
        let registry = Arc::new(self.registry);
        let dispatcher = Dispatcher::new(Arc::clone(&registry), self.config.dispatch.clone());
        let resolver = Resolver::new(self.config.resolver.clone());
        Ok(Orchestrator {
            config: self.config,
            registry,
            dispatcher,
            resolver,
            graph: self.graph,
            narrator: self.narrator,
            sink: self.sink,
        })
    }
}
