//! Session coordinator
//!
//! Wraps one `GameSession` and decides who scores each guess. While a remote
//! authority is reachable it scores every turn; the first failure degrades the
//! session to local scoring against a stand-in target for the rest of the
//! round. Input is validated before anything leaves the process, and only one
//! submission may be in flight at a time.

use super::config::GameConfig;
use super::daily::{DailyPuzzle, DailyPuzzleSelector};
use super::remote::{RemoteError, RemoteEvaluator, RemoteGuess, RemoteSession, StartRequest};
use super::session::{DEFAULT_MAX_ATTEMPTS, GameError, GameSession, GameStatus, GuessRow};
use super::summary::{GameSummary, SummarySource};
use super::validator::{Validity, WordValidator};
use crate::core::{Difficulty, KeyboardStatus, Word, WordError, all_exact};
use crate::wordlists::{PoolError, WordPool, placeholder_text};
use chrono::NaiveDate;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use thiserror::Error;
use tracing::{info, warn};

/// Who is scoring the session's guesses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authority {
    /// A remote evaluator that alone knows the target
    Remote,
    /// Played locally from the start
    Local,
    /// Started remote, fell back to local scoring
    Degraded,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("A guess is already being evaluated")]
    Busy,
    #[error(transparent)]
    Input(#[from] WordError),
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("{reason}")]
    Rejected { reason: String },
    /// The remote failed and no local word can stand in; retrying is safe
    #[error("Remote evaluator unavailable and no local word to fall back on: {0}")]
    NoFallback(#[from] PoolError),
}

#[derive(Debug, Error)]
pub enum StartError {
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error(transparent)]
    Game(#[from] GameError),
}

/// Services a coordinator relies on, shared between sessions
#[derive(Clone)]
pub struct Collaborators {
    pub pool: Arc<WordPool>,
    pub remote: Option<Arc<dyn RemoteEvaluator>>,
    pub validator: Arc<dyn WordValidator>,
}

/// Result of one accepted guess
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    pub row: GuessRow,
    /// Who scored this turn
    pub authority: Authority,
    pub status: GameStatus,
    pub attempts_left: usize,
    /// Present once the round is over
    pub summary: Option<GameSummary>,
}

/// Read-only view of a session for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub rows: Vec<GuessRow>,
    pub keyboard: KeyboardStatus,
    pub status: GameStatus,
    pub current_turn: usize,
    pub max_attempts: usize,
    pub word_length: usize,
    pub first_letter: Option<char>,
    pub authority: Authority,
    pub difficulty: Difficulty,
    pub summary: Option<GameSummary>,
}

#[derive(Debug, Clone)]
enum Puzzle {
    Classic,
    Daily(DailyPuzzle),
}

#[derive(Clone)]
struct RemoteHandle {
    evaluator: Arc<dyn RemoteEvaluator>,
    session_id: String,
}

struct State {
    session: GameSession,
    authority: Authority,
    remote: Option<RemoteHandle>,
    /// Letter revealed up front by the remote mask
    hint: Option<char>,
    summary: Option<GameSummary>,
}

/// Coordinates one round between the player, the session and the remote
pub struct SessionCoordinator {
    state: Mutex<State>,
    busy: AtomicBool,
    validator: Arc<dyn WordValidator>,
    pool: Arc<WordPool>,
    difficulty: Difficulty,
    puzzle: Puzzle,
    started: Instant,
}

/// Clears the busy flag when a submission ends, however it ends
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl SessionCoordinator {
    /// Start a classic round
    ///
    /// An override target is always played locally. Otherwise the remote is
    /// asked for a session; without one, a random word of the chosen tier is
    /// drawn from the pool.
    ///
    /// # Errors
    /// `StartError::Pool` if no suitable word exists locally, `StartError::Game`
    /// if the configured attempt count is zero.
    pub fn start_classic<R: Rng + ?Sized>(
        config: &GameConfig,
        collaborators: &Collaborators,
        rng: &mut R,
    ) -> Result<Self, StartError> {
        let difficulty = config.effective_difficulty();

        if let Some(target) = &config.override_target {
            let session = GameSession::new(target.clone(), config.max_attempts)?;
            return Ok(Self::local(
                session,
                Authority::Local,
                difficulty,
                Puzzle::Classic,
                collaborators,
            ));
        }

        if let Some(evaluator) = &collaborators.remote {
            let request = StartRequest::Classic {
                difficulty,
                max_attempts: config.max_attempts,
            };
            match evaluator.start_session(&request) {
                Ok(remote) => {
                    return Self::remote(
                        remote,
                        evaluator,
                        difficulty,
                        Puzzle::Classic,
                        collaborators,
                    );
                }
                Err(err) => {
                    warn!(error = %err, "remote start failed, playing locally");
                    let target = Word::new(placeholder_text(difficulty))
                        .map_err(|_| PoolError::NoWordsAvailable(Some(difficulty)))?;
                    let session = GameSession::new(target, config.max_attempts)?;
                    return Ok(Self::local(
                        session,
                        Authority::Degraded,
                        difficulty,
                        Puzzle::Classic,
                        collaborators,
                    ));
                }
            }
        }

        let target = collaborators.pool.random(difficulty, rng)?.clone();
        let session = GameSession::new(target, config.max_attempts)?;
        Ok(Self::local(
            session,
            Authority::Local,
            difficulty,
            Puzzle::Classic,
            collaborators,
        ))
    }

    /// Start the daily challenge for `date`
    ///
    /// # Errors
    /// `StartError::Pool` if the pool is empty.
    pub fn start_daily(date: NaiveDate, collaborators: &Collaborators) -> Result<Self, StartError> {
        let puzzle =
            DailyPuzzleSelector::new(Arc::clone(&collaborators.pool)).select_for_date(date)?;
        let difficulty = puzzle.difficulty;

        let authority = if let Some(evaluator) = &collaborators.remote {
            match evaluator.start_session(&StartRequest::Daily { date }) {
                Ok(remote) => {
                    return Self::remote(
                        remote,
                        evaluator,
                        difficulty,
                        Puzzle::Daily(puzzle),
                        collaborators,
                    );
                }
                Err(err) => {
                    warn!(error = %err, %date, "remote daily start failed, playing locally");
                    Authority::Degraded
                }
            }
        } else {
            Authority::Local
        };

        let session = GameSession::new(puzzle.target.clone(), DEFAULT_MAX_ATTEMPTS)?;
        Ok(Self::local(
            session,
            authority,
            difficulty,
            Puzzle::Daily(puzzle),
            collaborators,
        ))
    }

    fn local(
        session: GameSession,
        authority: Authority,
        difficulty: Difficulty,
        puzzle: Puzzle,
        collaborators: &Collaborators,
    ) -> Self {
        info!(?authority, %difficulty, length = session.word_length(), "session started");
        Self::build(
            State {
                session,
                authority,
                remote: None,
                hint: None,
                summary: None,
            },
            difficulty,
            puzzle,
            collaborators,
        )
    }

    fn remote(
        remote: RemoteSession,
        evaluator: &Arc<dyn RemoteEvaluator>,
        difficulty: Difficulty,
        puzzle: Puzzle,
        collaborators: &Collaborators,
    ) -> Result<Self, StartError> {
        let session = GameSession::hidden(remote.word_length, remote.max_attempts)?;
        let difficulty = remote.difficulty.unwrap_or(difficulty);
        info!(
            session_id = %remote.session_id,
            %difficulty,
            length = remote.word_length,
            "remote session started"
        );

        Ok(Self::build(
            State {
                session,
                authority: Authority::Remote,
                remote: Some(RemoteHandle {
                    evaluator: Arc::clone(evaluator),
                    session_id: remote.session_id,
                }),
                hint: remote.masked_word.chars().next().filter(|c| c.is_alphabetic()),
                summary: None,
            },
            difficulty,
            puzzle,
            collaborators,
        ))
    }

    fn build(
        state: State,
        difficulty: Difficulty,
        puzzle: Puzzle,
        collaborators: &Collaborators,
    ) -> Self {
        Self {
            state: Mutex::new(state),
            busy: AtomicBool::new(false),
            validator: Arc::clone(&collaborators.validator),
            pool: Arc::clone(&collaborators.pool),
            difficulty,
            puzzle,
            started: Instant::now(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Submit a guess
    ///
    /// Returns immediately with `SubmitError::Busy` if another submission is
    /// still being evaluated. Malformed input, wrong length and finished
    /// sessions are rejected before any remote call. The lock is not held
    /// while the remote is consulted, so snapshots stay available.
    ///
    /// # Errors
    /// See `SubmitError`. No error consumes a turn.
    pub fn submit(&self, text: &str) -> Result<TurnOutcome, SubmitError> {
        let _guard = BusyGuard::acquire(&self.busy).ok_or(SubmitError::Busy)?;

        let guess = Word::new(text)?;
        let (remote, turn, max_attempts) = {
            let state = self.lock();
            state.session.ensure_accepts(&guess)?;
            (
                state.remote.clone(),
                state.session.current_turn(),
                state.session.max_attempts(),
            )
        };

        if let Some(handle) = remote {
            match Self::remote_turn(&handle, &guess, turn, max_attempts) {
                Ok(scored) => return self.apply_remote(&handle, guess, scored),
                Err(err) => self.degrade(&err)?,
            }
        }

        self.local_turn(guess)
    }

    /// Ask the remote to score `guess` as turn `turn + 1` and check its answer
    /// agrees with the local session
    fn remote_turn(
        handle: &RemoteHandle,
        guess: &Word,
        turn: usize,
        max_attempts: usize,
    ) -> Result<RemoteGuess, RemoteError> {
        let scored = handle.evaluator.submit_guess(&handle.session_id, guess)?;

        if scored.verdicts.len() != guess.len() {
            return Err(RemoteError::Malformed(format!(
                "{} verdicts for a {}-letter guess",
                scored.verdicts.len(),
                guess.len()
            )));
        }
        if scored.is_won && !all_exact(&scored.verdicts) {
            return Err(RemoteError::Malformed(
                "won without every letter exact".to_string(),
            ));
        }
        if scored.attempts_used != turn + 1 {
            return Err(RemoteError::Malformed(format!(
                "remote counts {} attempts, expected {}",
                scored.attempts_used,
                turn + 1
            )));
        }

        let completes = all_exact(&scored.verdicts) || turn + 1 == max_attempts;
        if scored.is_completed != completes {
            return Err(RemoteError::Malformed(format!(
                "remote says completed={} on turn {} of {max_attempts}",
                scored.is_completed,
                turn + 1
            )));
        }

        Ok(scored)
    }

    fn apply_remote(
        &self,
        handle: &RemoteHandle,
        guess: Word,
        scored: RemoteGuess,
    ) -> Result<TurnOutcome, SubmitError> {
        let (row, status) = {
            let mut state = self.lock();
            let row = state.session.submit_scored(guess, scored.verdicts)?.clone();
            let status = state.session.status();

            if let Some(answer) = scored.revealed.as_deref() {
                match Word::new(answer).map(|word| state.session.bind_target(word)) {
                    Ok(Ok(())) => {}
                    Ok(Err(err)) => warn!(error = %err, "revealed answer does not fit the session"),
                    Err(err) => warn!(error = %err, "revealed answer is not a word"),
                }
            }
            (row, status)
        };

        if status.is_over() {
            let summary = match handle.evaluator.end_session(&handle.session_id) {
                Ok(remote) => {
                    let mut summary = GameSummary::from(remote);
                    summary.difficulty.get_or_insert(self.difficulty);
                    summary
                }
                Err(err) => {
                    warn!(error = %err, "remote summary unavailable, summarizing locally");
                    let mut summary =
                        self.local_summary(&self.lock().session, SummarySource::Synthesized);
                    summary.session_id = Some(handle.session_id.clone());
                    summary
                }
            };
            info!(won = summary.won, attempts = summary.attempts, "session ended");
            self.lock().summary = Some(summary);
        }

        Ok(self.outcome(row, Authority::Remote))
    }

    /// Switch to local scoring after a remote failure
    ///
    /// Nothing changes unless a stand-in target can be bound; the remote
    /// handle is then kept so the next guess tries the remote again.
    fn degrade(&self, err: &RemoteError) -> Result<(), SubmitError> {
        let mut state = self.lock();

        if state.session.target().is_none() {
            let length = state.session.word_length();
            let target = match &self.puzzle {
                Puzzle::Daily(puzzle) if puzzle.target.len() == length => puzzle.target.clone(),
                _ => self.pool.placeholder(self.difficulty, length).inspect_err(|pool_err| {
                    warn!(error = %err, %pool_err, "remote evaluator failed, no local stand-in");
                })?,
            };
            state.session.bind_target(target)?;
        }

        warn!(error = %err, "remote evaluator failed, continuing locally");
        state.authority = Authority::Degraded;
        state.remote = None;
        Ok(())
    }

    fn local_turn(&self, guess: Word) -> Result<TurnOutcome, SubmitError> {
        if let Validity::Invalid { reason } = self.validator.validate(&guess) {
            return Err(SubmitError::Rejected { reason });
        }

        let mut state = self.lock();
        let row = state.session.submit_guess(guess)?.clone();
        let authority = state.authority;

        if state.session.status().is_over() {
            let source = match authority {
                Authority::Local => SummarySource::Local,
                Authority::Remote | Authority::Degraded => SummarySource::Synthesized,
            };
            let summary = self.local_summary(&state.session, source);
            info!(won = summary.won, attempts = summary.attempts, ?source, "session ended");
            state.summary = Some(summary);
        }
        drop(state);

        Ok(self.outcome(row, authority))
    }

    fn local_summary(&self, session: &GameSession, source: SummarySource) -> GameSummary {
        let mut summary = GameSummary::local(
            source,
            session.status() == GameStatus::Won,
            session.current_turn(),
            self.started.elapsed(),
            session.target(),
        );
        summary.difficulty = Some(self.difficulty);
        if let Puzzle::Daily(puzzle) = &self.puzzle {
            summary.session_id = Some(puzzle.session_id.clone());
        }
        summary
    }

    fn outcome(&self, row: GuessRow, authority: Authority) -> TurnOutcome {
        let state = self.lock();
        TurnOutcome {
            row,
            authority,
            status: state.session.status(),
            attempts_left: state.session.attempts_left(),
            summary: state.summary.clone(),
        }
    }

    /// Current state for rendering
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.lock();
        let session = &state.session;
        SessionSnapshot {
            rows: session.rows().to_vec(),
            keyboard: session.keyboard().clone(),
            status: session.status(),
            current_turn: session.current_turn(),
            max_attempts: session.max_attempts(),
            word_length: session.word_length(),
            first_letter: session.target().map(Word::first_letter).or(state.hint),
            authority: state.authority,
            difficulty: self.difficulty,
            summary: state.summary.clone(),
        }
    }

    #[must_use]
    pub fn authority(&self) -> Authority {
        self.lock().authority
    }

    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// The daily puzzle this round plays, if it is one
    #[must_use]
    pub const fn daily_puzzle(&self) -> Option<&DailyPuzzle> {
        match &self.puzzle {
            Puzzle::Daily(puzzle) => Some(puzzle),
            Puzzle::Classic => None,
        }
    }

    /// Whether a submission is being evaluated right now
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Verdict, score};
    use crate::game::remote::RemoteSummary;
    use crate::game::validator::{AcceptAll, Dictionary};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::sync::atomic::AtomicUsize;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    /// Remote authority that scores against a target it keeps to itself
    struct FakeRemote {
        target: Word,
        max_attempts: usize,
        fail_start: bool,
        fail_guess_from: Option<usize>,
        /// Fail this many guess calls before scoring any
        fail_first: usize,
        fail_end: bool,
        short_verdicts: bool,
        /// Report a lost round after the first miss
        end_early: bool,
        /// Report one attempt more than played
        skew_attempts: bool,
        guess_calls: AtomicUsize,
        scored: AtomicUsize,
        end_calls: AtomicUsize,
        won: AtomicBool,
        gate: Option<(Mutex<mpsc::Sender<()>>, Mutex<mpsc::Receiver<()>>)>,
    }

    impl FakeRemote {
        fn new(target: &str) -> Self {
            Self {
                target: Word::new(target).unwrap(),
                max_attempts: 6,
                fail_start: false,
                fail_guess_from: None,
                fail_first: 0,
                fail_end: false,
                short_verdicts: false,
                end_early: false,
                skew_attempts: false,
                guess_calls: AtomicUsize::new(0),
                scored: AtomicUsize::new(0),
                end_calls: AtomicUsize::new(0),
                won: AtomicBool::new(false),
                gate: None,
            }
        }
    }

    impl RemoteEvaluator for FakeRemote {
        fn start_session(&self, _request: &StartRequest) -> Result<RemoteSession, RemoteError> {
            if self.fail_start {
                return Err(RemoteError::Timeout);
            }
            let mut masked = self.target.first_letter().to_string();
            masked.push_str(&".".repeat(self.target.len() - 1));
            Ok(RemoteSession {
                session_id: "remote-1".to_string(),
                masked_word: masked,
                word_length: self.target.len(),
                max_attempts: self.max_attempts,
                difficulty: None,
            })
        }

        fn submit_guess(
            &self,
            _session_id: &str,
            guess: &Word,
        ) -> Result<RemoteGuess, RemoteError> {
            let call = self.guess_calls.fetch_add(1, Ordering::SeqCst);

            if let Some((entered, release)) = &self.gate {
                entered.lock().unwrap().send(()).unwrap();
                release.lock().unwrap().recv().unwrap();
            }

            if call < self.fail_first || self.fail_guess_from.is_some_and(|from| call >= from) {
                return Err(RemoteError::Status(503));
            }

            let attempts = self.scored.fetch_add(1, Ordering::SeqCst) + 1;
            let mut verdicts = score(guess, &self.target).unwrap();
            if self.short_verdicts {
                verdicts.pop();
            }
            let is_won = all_exact(&verdicts);
            self.won.store(is_won, Ordering::SeqCst);
            let is_completed = is_won || self.end_early || attempts == self.max_attempts;
            Ok(RemoteGuess {
                verdicts,
                attempts_used: attempts + usize::from(self.skew_attempts),
                is_completed,
                is_won,
                revealed: is_completed.then(|| self.target.text().to_string()),
                game_time: None,
            })
        }

        fn end_session(&self, session_id: &str) -> Result<RemoteSummary, RemoteError> {
            self.end_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_end {
                return Err(RemoteError::Rejected("gone".to_string()));
            }
            Ok(RemoteSummary {
                session_id: session_id.to_string(),
                won: self.won.load(Ordering::SeqCst),
                attempts: self.guess_calls.load(Ordering::SeqCst),
                game_time: Duration::from_secs(42),
                word: self.target.text().to_string(),
                difficulty: None,
                definition: Some("Mélange de sons discordants".to_string()),
                word_stats: None,
            })
        }
    }

    fn collaborators(remote: Option<Arc<FakeRemote>>) -> Collaborators {
        let pool = Arc::new(WordPool::embedded());
        Collaborators {
            validator: Arc::new(Dictionary::from_pool(&pool)),
            pool,
            remote: remote.map(|r| r as Arc<dyn RemoteEvaluator>),
        }
    }

    fn medium() -> GameConfig {
        GameConfig::with_difficulty(Difficulty::Medium)
    }

    fn remote_classic(fake: &Arc<FakeRemote>) -> SessionCoordinator {
        let mut rng = StdRng::seed_from_u64(0);
        let collaborators = collaborators(Some(Arc::clone(fake)));
        SessionCoordinator::start_classic(&medium(), &collaborators, &mut rng).unwrap()
    }

    #[test]
    fn override_target_plays_locally() {
        let config = GameConfig {
            override_target: Some(Word::new("jardin").unwrap()),
            ..GameConfig::default()
        };
        let fake = Arc::new(FakeRemote::new("cacophonie"));
        let coordinator = SessionCoordinator::start_classic(
            &config,
            &collaborators(Some(Arc::clone(&fake))),
            &mut StdRng::seed_from_u64(0),
        )
        .unwrap();

        let outcome = coordinator.submit("jardin").unwrap();
        assert_eq!(outcome.authority, Authority::Local);
        assert_eq!(outcome.status, GameStatus::Won);
        let summary = outcome.summary.unwrap();
        assert_eq!(summary.source, SummarySource::Local);
        assert_eq!(summary.word.as_deref(), Some("jardin"));
        assert_eq!(fake.guess_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn offline_classic_draws_from_tier() {
        let coordinator = SessionCoordinator::start_classic(
            &GameConfig::with_difficulty(Difficulty::Easy),
            &collaborators(None),
            &mut StdRng::seed_from_u64(3),
        )
        .unwrap();

        let snapshot = coordinator.snapshot();
        assert_eq!(snapshot.authority, Authority::Local);
        assert_eq!(snapshot.difficulty, Difficulty::Easy);
        assert!(snapshot.first_letter.is_some());
        assert_eq!(snapshot.max_attempts, 6);
    }

    #[test]
    fn remote_round_to_victory() {
        let fake = Arc::new(FakeRemote::new("cacophonie"));
        let coordinator = remote_classic(&fake);

        let snapshot = coordinator.snapshot();
        assert_eq!(snapshot.authority, Authority::Remote);
        assert_eq!(snapshot.word_length, 10);
        assert_eq!(snapshot.first_letter, Some('c'));

        let first = coordinator.submit("dramatique").unwrap();
        assert_eq!(first.authority, Authority::Remote);
        assert_eq!(first.status, GameStatus::Playing);
        assert_eq!(first.attempts_left, 5);
        assert!(first.summary.is_none());

        let last = coordinator.submit("CACOPHONIE").unwrap();
        assert_eq!(last.status, GameStatus::Won);
        let summary = last.summary.unwrap();
        assert_eq!(summary.source, SummarySource::Remote);
        assert_eq!(summary.word.as_deref(), Some("cacophonie"));
        assert_eq!(summary.difficulty, Some(Difficulty::Medium));
        assert_eq!(fake.end_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn remote_mode_skips_local_dictionary() {
        let fake = Arc::new(FakeRemote::new("cacophonie"));
        let coordinator = remote_classic(&fake);

        let outcome = coordinator.submit("zzzzzzzzzz").unwrap();
        assert_eq!(outcome.row.verdicts, vec![Verdict::Absent; 10]);
    }

    #[test]
    fn input_checked_before_remote_call() {
        let fake = Arc::new(FakeRemote::new("cacophonie"));
        let coordinator = remote_classic(&fake);

        assert!(matches!(
            coordinator.submit("chat"),
            Err(SubmitError::Game(GameError::LengthMismatch {
                expected: 10,
                actual: 4
            }))
        ));
        assert!(matches!(
            coordinator.submit("cacoph0nie"),
            Err(SubmitError::Input(WordError::InvalidCharacter { .. }))
        ));
        assert!(matches!(coordinator.submit(""), Err(SubmitError::Input(WordError::Empty))));
        assert_eq!(fake.guess_calls.load(Ordering::SeqCst), 0);
        assert_eq!(coordinator.snapshot().current_turn, 0);
    }

    #[test]
    fn remote_failure_degrades_for_rest_of_round() {
        let mut fake = FakeRemote::new("cacophonie");
        fake.fail_guess_from = Some(1);
        let fake = Arc::new(fake);
        let coordinator = remote_classic(&fake);

        let first = coordinator.submit("romantique").unwrap();
        assert_eq!(first.authority, Authority::Remote);

        // Remote fails; the turn is scored against the medium placeholder
        let second = coordinator.submit("restaurant").unwrap();
        assert_eq!(second.authority, Authority::Degraded);
        assert_eq!(coordinator.authority(), Authority::Degraded);
        assert_eq!(coordinator.snapshot().current_turn, 2);

        // No further remote traffic
        let third = coordinator.submit("ordinateur").unwrap();
        assert_eq!(third.authority, Authority::Degraded);
        assert_eq!(third.status, GameStatus::Won);
        assert_eq!(fake.guess_calls.load(Ordering::SeqCst), 2);
        assert_eq!(fake.end_calls.load(Ordering::SeqCst), 0);

        let summary = third.summary.unwrap();
        assert_eq!(summary.source, SummarySource::Synthesized);
        assert_eq!(summary.attempts, 3);
        assert_eq!(summary.word.as_deref(), Some("ordinateur"));
    }

    #[test]
    fn keyboard_survives_degradation() {
        let mut fake = FakeRemote::new("cacophonie");
        fake.fail_guess_from = Some(1);
        let coordinator = remote_classic(&Arc::new(fake));

        coordinator.submit("dramatique").unwrap();
        let after_remote = coordinator.snapshot().keyboard;
        assert!(!after_remote.is_empty());

        coordinator.submit("restaurant").unwrap();
        let after_local = coordinator.snapshot().keyboard;

        for (letter, status) in after_remote.entries() {
            assert!(after_local.status_of(letter) >= status);
        }
    }

    #[test]
    fn malformed_response_degrades() {
        let mut fake = FakeRemote::new("cacophonie");
        fake.short_verdicts = true;
        let fake = Arc::new(fake);
        let coordinator = remote_classic(&fake);

        let outcome = coordinator.submit("dramatique").unwrap();
        assert_eq!(outcome.authority, Authority::Degraded);
        assert_eq!(outcome.row.verdicts.len(), 10);
    }

    #[test]
    fn remote_failure_without_stand_in_keeps_remote() {
        // No two-letter word in the pool to fall back on
        let mut fake = FakeRemote::new("zo");
        fake.fail_first = 1;
        let fake = Arc::new(fake);
        let pool = Arc::new(WordPool::embedded());
        assert!(pool.placeholder(Difficulty::Medium, 2).is_err());
        let collaborators = Collaborators {
            pool,
            remote: Some(Arc::clone(&fake) as Arc<dyn RemoteEvaluator>),
            validator: Arc::new(AcceptAll),
        };
        let mut rng = StdRng::seed_from_u64(0);
        let coordinator =
            SessionCoordinator::start_classic(&medium(), &collaborators, &mut rng).unwrap();

        assert!(matches!(coordinator.submit("za"), Err(SubmitError::NoFallback(_))));
        assert_eq!(coordinator.authority(), Authority::Remote);
        assert_eq!(coordinator.snapshot().current_turn, 0);

        // The server is back: the same round carries on remotely
        let outcome = coordinator.submit("zo").unwrap();
        assert_eq!(outcome.authority, Authority::Remote);
        assert_eq!(outcome.status, GameStatus::Won);
        assert_eq!(fake.guess_calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn early_completion_from_remote_degrades() {
        let mut fake = FakeRemote::new("cacophonie");
        fake.end_early = true;
        let fake = Arc::new(fake);
        let coordinator = remote_classic(&fake);

        let outcome = coordinator.submit("dramatique").unwrap();
        assert_eq!(outcome.authority, Authority::Degraded);
        assert_eq!(outcome.status, GameStatus::Playing);

        coordinator.submit("romantique").unwrap();
        assert_eq!(fake.guess_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn attempt_count_mismatch_degrades() {
        let mut fake = FakeRemote::new("cacophonie");
        fake.skew_attempts = true;
        let coordinator = remote_classic(&Arc::new(fake));

        let outcome = coordinator.submit("dramatique").unwrap();
        assert_eq!(outcome.authority, Authority::Degraded);
        assert_eq!(coordinator.snapshot().current_turn, 1);
    }

    #[test]
    fn remote_start_failure_plays_placeholder() {
        let mut fake = FakeRemote::new("cacophonie");
        fake.fail_start = true;
        let fake = Arc::new(fake);
        let coordinator = remote_classic(&fake);

        assert_eq!(coordinator.authority(), Authority::Degraded);
        let outcome = coordinator.submit("ordinateur").unwrap();
        assert_eq!(outcome.status, GameStatus::Won);
        assert_eq!(fake.guess_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn end_failure_synthesizes_summary() {
        let mut fake = FakeRemote::new("cacophonie");
        fake.fail_end = true;
        let fake = Arc::new(fake);
        let coordinator = remote_classic(&fake);

        let outcome = coordinator.submit("cacophonie").unwrap();
        let summary = outcome.summary.unwrap();
        assert_eq!(summary.source, SummarySource::Synthesized);
        assert!(summary.won);
        assert_eq!(summary.attempts, 1);
        assert_eq!(summary.word.as_deref(), Some("cacophonie"));
        assert_eq!(summary.session_id.as_deref(), Some("remote-1"));
    }

    #[test]
    fn remote_loss_reveals_answer() {
        let fake = Arc::new(FakeRemote::new("cacophonie"));
        let coordinator = remote_classic(&fake);

        for _ in 0..6 {
            coordinator.submit("dramatique").unwrap();
        }
        let snapshot = coordinator.snapshot();
        assert_eq!(snapshot.status, GameStatus::Lost);
        assert!(!snapshot.summary.unwrap().won);
        assert!(matches!(
            coordinator.submit("dramatique"),
            Err(SubmitError::Game(GameError::Finished(GameStatus::Lost)))
        ));
        assert_eq!(fake.guess_calls.load(Ordering::SeqCst), 6);
    }

    #[test]
    fn local_dictionary_rejects_without_consuming_turn() {
        let config = GameConfig {
            override_target: Some(Word::new("jardin").unwrap()),
            ..GameConfig::default()
        };
        let coordinator = SessionCoordinator::start_classic(
            &config,
            &collaborators(None),
            &mut StdRng::seed_from_u64(0),
        )
        .unwrap();

        assert!(matches!(
            coordinator.submit("xyzxyz"),
            Err(SubmitError::Rejected { .. })
        ));
        assert_eq!(coordinator.snapshot().current_turn, 0);
    }

    #[test]
    fn concurrent_submission_is_busy() {
        let mut fake = FakeRemote::new("cacophonie");
        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        fake.gate = Some((Mutex::new(entered_tx), Mutex::new(release_rx)));
        let coordinator = Arc::new(remote_classic(&Arc::new(fake)));

        let worker = {
            let coordinator = Arc::clone(&coordinator);
            thread::spawn(move || coordinator.submit("dramatique"))
        };

        entered_rx.recv().unwrap();
        assert!(coordinator.is_busy());
        assert!(matches!(coordinator.submit("romantique"), Err(SubmitError::Busy)));
        // Snapshots stay available mid-flight
        assert_eq!(coordinator.snapshot().current_turn, 0);

        release_tx.send(()).unwrap();
        worker.join().unwrap().unwrap();
        assert!(!coordinator.is_busy());
        assert_eq!(coordinator.snapshot().current_turn, 1);
    }

    #[test]
    fn daily_offline_uses_selector_word() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let coordinator = SessionCoordinator::start_daily(date, &collaborators(None)).unwrap();

        assert_eq!(coordinator.authority(), Authority::Local);
        let puzzle = coordinator.daily_puzzle().unwrap();
        assert_eq!(puzzle.target.text(), "haut");

        let outcome = coordinator.submit("haut").unwrap();
        let summary = outcome.summary.unwrap();
        assert!(summary.won);
        assert_eq!(summary.session_id.as_deref(), Some("daily-20261017"));
    }

    #[test]
    fn daily_remote_failure_falls_back_to_selector_word() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let mut fake = FakeRemote::new("cacophonie");
        fake.fail_start = true;
        let coordinator =
            SessionCoordinator::start_daily(date, &collaborators(Some(Arc::new(fake)))).unwrap();

        assert_eq!(coordinator.authority(), Authority::Degraded);
        assert_eq!(coordinator.submit("haut").unwrap().status, GameStatus::Won);
    }

    #[test]
    fn accept_all_validator_lets_anything_through() {
        let pool = Arc::new(WordPool::embedded());
        let collaborators = Collaborators {
            pool,
            remote: None,
            validator: Arc::new(AcceptAll),
        };
        let config = GameConfig {
            override_target: Some(Word::new("jardin").unwrap()),
            ..GameConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        let coordinator =
            SessionCoordinator::start_classic(&config, &collaborators, &mut rng).unwrap();
        assert!(coordinator.submit("xyzxyz").is_ok());
    }
}
