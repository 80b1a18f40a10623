//! AI workflow state machine, its side effects, the run gate and the
//! time-based run simulator

mod apply;
mod gate;
mod machine;
mod simulator;
mod transition;

pub use apply::{apply_event, TransitionContext};
pub use gate::can_run;
pub use machine::{next_state, AiEvent, RefusalReason, TransitionOutcome};
pub use simulator::{
    retry_run, schedule_completion, start_run, SharedStore, SimulatedCompletion, SimulatedRun,
};
pub use transition::TransitionTask;
