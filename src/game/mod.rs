//! Game layer
//!
//! Sessions, the coordinator that arbitrates between remote and local
//! scoring, the daily challenge, and player persistence.

pub mod config;
pub mod coordinator;
pub mod daily;
pub mod registry;
pub mod remote;
pub mod session;
pub mod store;
pub mod summary;
pub mod validator;

pub use config::GameConfig;
pub use coordinator::{
    Authority, Collaborators, SessionCoordinator, SessionSnapshot, StartError, SubmitError,
    TurnOutcome,
};
pub use daily::{
    DailyPuzzle, DailyPuzzleSelector, can_play_today, date_key, date_seed, next_rollover,
    record_completion, share_text, time_until_next, today,
};
pub use registry::SessionRegistry;
pub use remote::{
    DailyServerStats, HttpEvaluator, RemoteError, RemoteEvaluator, ServerStats, StartRequest,
};
pub use session::{DEFAULT_MAX_ATTEMPTS, GameError, GameSession, GameStatus, GuessRow};
pub use store::{DailyRecord, FileStore, History, MemoryStore, StateStore, StoreError};
pub use summary::{GameSummary, PersonalStats, SummarySource};
pub use validator::{AcceptAll, Dictionary, Validity, WordValidator};
