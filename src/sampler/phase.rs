use crate::models::RouletteWheel;
use serde::{Deserialize, Serialize};

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Termination {
    /// The evaluation budget was used up.
    BudgetExhausted { evaluations: usize },
    /// The bees collapsed onto a region narrower than the convergence threshold.
    Converged { spread: f64 },
}

/// Steps of a run.
///
/// ```text
/// Initialize ──► Employed ──► Scale ──► Onlooker ──► Scout ──► ConvergenceCheck ──► Terminate
///                   ▲                                                 │
///                   └─────────────────────────────────────────────────┘
/// ```
///
/// Convergence is only checked once a full generation has completed.
///
/// Scaling sorts the population and hands the resulting wheel to the
/// onlooker phase, whose guide indices refer to that sorted order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Phase {
    Initialize,
    Employed,
    Scale,
    Onlooker(RouletteWheel),
    Scout,
    ConvergenceCheck,
    Terminate(Termination),
}

impl Phase {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Phase::Initialize => "initialize",
            Phase::Employed => "employed",
            Phase::Scale => "scale",
            Phase::Onlooker(_) => "onlooker",
            Phase::Scout => "scout",
            Phase::ConvergenceCheck => "convergence_check",
            Phase::Terminate(_) => "terminate",
        }
    }
}
