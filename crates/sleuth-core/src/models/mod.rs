mod analysis_result;
mod category;
mod confidence_history;
mod evidence;
mod finding;
mod hypothesis;
mod interaction;
mod narrative;
mod outcome;
mod phase;
mod phase_history;
mod symptoms;
mod task;

pub use analysis_result::{AnalysisResult, InvestigationOutcome};
pub use category::{well_known, Category};
pub use confidence_history::{ConfidenceSnapshot, ConfidenceSource};
pub use evidence::{Evidence, EvidenceRef, Observation};
pub use finding::{Finding, FindingStatus, FindingSummary, SpecialistReport};
pub use hypothesis::{HypothesisFlag, HypothesisId, HypothesisRole, RootCauseHypothesis};
pub use interaction::InteractionRecord;
pub use narrative::{Narrative, Recommendation, RecommendationPriority};
pub use outcome::{BatchOutcome, Interruption, TaskOutcome};
pub use phase::Phase;
pub use phase_history::{PhaseRecord, RecoveredError, RecoveredErrorKind};
pub use symptoms::{SymptomHints, SymptomProfile, Symptoms};
pub use task::{HypothesisFocus, SpecialistTask, TaskContext, TaskKey, TaskKind, TimeRange};
