//! Remote evaluator collaborator
//!
//! The remote authority knows the real target and scores guesses without
//! revealing it until the round ends. `RemoteEvaluator` is the seam the
//! coordinator talks through; `HttpEvaluator` speaks the game-session JSON API.

use crate::core::{Difficulty, Verdict, Word};
use chrono::NaiveDate;
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Failure talking to the remote evaluator
///
/// Every variant is recoverable: the coordinator falls back to local play.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Remote evaluator timed out")]
    Timeout,
    #[error("Remote evaluator unreachable: {0}")]
    Http(#[source] reqwest::Error),
    #[error("Remote evaluator answered HTTP {0}")]
    Status(u16),
    #[error("Remote evaluator refused the request: {0}")]
    Rejected(String),
    #[error("Malformed remote response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Malformed(err.to_string())
        } else {
            Self::Http(err)
        }
    }
}

/// How a remote session should be started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartRequest {
    Classic {
        difficulty: Difficulty,
        max_attempts: usize,
    },
    Daily {
        date: NaiveDate,
    },
}

/// Handle on a session held by the remote authority
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSession {
    pub session_id: String,
    /// Target with unrevealed letters masked, e.g. "c........."
    pub masked_word: String,
    pub word_length: usize,
    pub max_attempts: usize,
    pub difficulty: Option<Difficulty>,
}

/// Remote verdict for one guess
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteGuess {
    pub verdicts: Vec<Verdict>,
    pub attempts_used: usize,
    pub is_completed: bool,
    pub is_won: bool,
    /// The answer, only once the round is completed
    pub revealed: Option<String>,
    pub game_time: Option<Duration>,
}

/// Aggregate statistics the remote keeps per word
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordStats {
    pub total_attempts: u64,
    pub total_successes: u64,
    pub success_rate: f64,
    #[serde(alias = "averageAttemptsToWin")]
    pub average_attempts: f64,
    pub average_game_time: f64,
    pub perceived_difficulty: f64,
    #[serde(default)]
    pub sample_size: Option<u64>,
}

/// End-of-round summary from the remote authority
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteSummary {
    pub session_id: String,
    pub won: bool,
    pub attempts: usize,
    pub game_time: Duration,
    pub word: String,
    pub difficulty: Option<Difficulty>,
    pub definition: Option<String>,
    pub word_stats: Option<WordStats>,
}

/// Totals across every player and round the server has seen
#[derive(Debug, Clone, PartialEq)]
pub struct ServerStats {
    pub total_sessions: u64,
    pub completed_sessions: u64,
    pub won_sessions: u64,
    pub win_rate: f64,
    pub average_attempts: f64,
    pub average_game_time: f64,
    /// Daily-challenge rounds among `total_sessions`, when reported
    pub daily_sessions: Option<u64>,
}

/// Server-side results of one day's challenge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyServerStats {
    pub total_participants: u64,
    pub total_completed: u64,
    pub total_won: u64,
    pub win_rate: f64,
    pub completion_rate: f64,
    pub average_attempts: f64,
    /// Milliseconds
    pub average_game_time: f64,
    /// Wins by attempt count, first entry for one attempt
    #[serde(default)]
    pub attempts_distribution: Vec<u64>,
    #[serde(default)]
    pub is_active: bool,
}

/// The operations a remote authority offers
///
/// Implementations must be safe to share across threads; each call is a
/// single blocking request-response.
pub trait RemoteEvaluator: Send + Sync {
    /// Open a session
    ///
    /// # Errors
    /// Any `RemoteError`; callers fall back to local play.
    fn start_session(&self, request: &StartRequest) -> Result<RemoteSession, RemoteError>;

    /// Score a guess in an open session
    ///
    /// # Errors
    /// Any `RemoteError`; callers fall back to local play.
    fn submit_guess(&self, session_id: &str, guess: &Word) -> Result<RemoteGuess, RemoteError>;

    /// Close a session and fetch its summary
    ///
    /// # Errors
    /// Any `RemoteError`; callers synthesize a summary locally.
    fn end_session(&self, session_id: &str) -> Result<RemoteSummary, RemoteError>;

    /// Fetch server-wide statistics
    ///
    /// # Errors
    /// Any `RemoteError`; callers show personal statistics only.
    fn server_stats(&self) -> Result<ServerStats, RemoteError> {
        Err(RemoteError::Rejected("statistics not offered".to_string()))
    }

    /// Fetch server-side results of the daily challenge on `date`
    ///
    /// # Errors
    /// Any `RemoteError`; callers show personal statistics only.
    fn daily_stats(&self, date: NaiveDate) -> Result<DailyServerStats, RemoteError> {
        Err(RemoteError::Rejected(format!("no statistics for {date}")))
    }
}

// Wire format ---------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(default)]
    message: String,
    data: Option<T>,
    #[serde(default)]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn into_data(self) -> Result<T, RemoteError> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(RemoteError::Rejected(self.error.unwrap_or(self.message))),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StartGameBody {
    difficulty: Difficulty,
    max_attempts: usize,
}

#[derive(Debug, Serialize)]
struct StartDailyBody {
    date: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GuessBody<'a> {
    session_id: &'a str,
    guess: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StartData {
    session_id: String,
    word_data: WordData,
    game_info: GameInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WordData {
    masked_word: String,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    length: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GameInfo {
    max_attempts: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GuessData {
    attempts: usize,
    is_completed: bool,
    is_won: bool,
    #[serde(default)]
    correct_answer: Option<String>,
    #[serde(default)]
    game_time: Option<u64>,
    letter_analysis: Vec<LetterAnalysis>,
}

#[derive(Debug, Deserialize)]
struct LetterAnalysis {
    status: String,
    position: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EndData {
    session_id: String,
    is_won: bool,
    attempts: usize,
    game_time: u64,
    word_info: WordInfo,
    #[serde(default)]
    word_stats: Option<WordStats>,
}

#[derive(Debug, Deserialize)]
struct WordInfo {
    word: String,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    definition: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatsData {
    overall: OverallData,
    #[serde(default)]
    daily_challenge: Option<DailyChallengeData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OverallData {
    total_sessions: u64,
    completed_sessions: u64,
    won_sessions: u64,
    win_rate: f64,
    average_attempts: f64,
    average_game_time: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DailyChallengeData {
    total_sessions: u64,
}

#[derive(Debug, Deserialize)]
struct DailyStatsData {
    server: DailyServerStats,
}

impl From<StatsData> for ServerStats {
    fn from(data: StatsData) -> Self {
        let overall = data.overall;
        Self {
            total_sessions: overall.total_sessions,
            completed_sessions: overall.completed_sessions,
            won_sessions: overall.won_sessions,
            win_rate: overall.win_rate,
            average_attempts: overall.average_attempts,
            average_game_time: overall.average_game_time,
            daily_sessions: data.daily_challenge.map(|daily| daily.total_sessions),
        }
    }
}

impl TryFrom<StartData> for RemoteSession {
    type Error = RemoteError;

    fn try_from(data: StartData) -> Result<Self, Self::Error> {
        let word_length = data
            .word_data
            .length
            .unwrap_or_else(|| data.word_data.masked_word.chars().count());

        if word_length == 0 {
            return Err(RemoteError::Malformed("empty masked word".to_string()));
        }
        if data.game_info.max_attempts == 0 {
            return Err(RemoteError::Malformed("maxAttempts is zero".to_string()));
        }

        Ok(Self {
            session_id: data.session_id,
            masked_word: data.word_data.masked_word,
            word_length,
            max_attempts: data.game_info.max_attempts,
            difficulty: data.word_data.difficulty.and_then(|d| d.parse().ok()),
        })
    }
}

impl TryFrom<GuessData> for RemoteGuess {
    type Error = RemoteError;

    fn try_from(mut data: GuessData) -> Result<Self, Self::Error> {
        data.letter_analysis.sort_by_key(|analysis| analysis.position);

        let verdicts = data
            .letter_analysis
            .iter()
            .enumerate()
            .map(|(index, analysis)| {
                if analysis.position != index {
                    return Err(RemoteError::Malformed(format!(
                        "letter positions are not contiguous at {index}"
                    )));
                }
                Verdict::from_code(&analysis.status).ok_or_else(|| {
                    RemoteError::Malformed(format!("unknown letter status '{}'", analysis.status))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            verdicts,
            attempts_used: data.attempts,
            is_completed: data.is_completed,
            is_won: data.is_won,
            revealed: data.correct_answer,
            game_time: data.game_time.map(Duration::from_secs),
        })
    }
}

impl From<EndData> for RemoteSummary {
    fn from(data: EndData) -> Self {
        Self {
            session_id: data.session_id,
            won: data.is_won,
            attempts: data.attempts,
            game_time: Duration::from_secs(data.game_time),
            word: data.word_info.word,
            difficulty: data.word_info.difficulty.and_then(|d| d.parse().ok()),
            definition: data.word_info.definition,
            word_stats: data.word_stats,
        }
    }
}

// HTTP client ---------------------------------------------------------------

/// Remote evaluator over the game-session HTTP API
#[derive(Debug, Clone)]
pub struct HttpEvaluator {
    client: Client,
    base_url: String,
}

impl HttpEvaluator {
    /// Build a client for the server at `server`; every call gives up after `timeout`
    ///
    /// # Errors
    /// Returns `RemoteError::Http` if the HTTP client cannot be built.
    pub fn new(server: &str, timeout: Duration) -> Result<Self, RemoteError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: format!("{}/api/sutom/game-session", server.trim_end_matches('/')),
        })
    }

    fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, RemoteError> {
        let url = format!("{}{path}", self.base_url);
        debug!(%url, "remote request");

        let mut request = self.client.post(&url);
        if let Some(body) = body {
            request = request.json(body);
        }
        Self::send(request)
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, RemoteError> {
        let url = format!("{}{path}", self.base_url);
        debug!(%url, "remote request");
        Self::send(self.client.get(&url))
    }

    fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, RemoteError> {
        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status.as_u16()));
        }

        response.json::<ApiResponse<T>>()?.into_data()
    }
}

impl RemoteEvaluator for HttpEvaluator {
    fn start_session(&self, request: &StartRequest) -> Result<RemoteSession, RemoteError> {
        let data: StartData = match *request {
            StartRequest::Classic {
                difficulty,
                max_attempts,
            } => self.post(
                "/start",
                Some(&StartGameBody {
                    difficulty,
                    max_attempts,
                }),
            )?,
            StartRequest::Daily { date } => self.post(
                "/daily",
                Some(&StartDailyBody {
                    date: date.format("%Y%m%d").to_string(),
                }),
            )?,
        };
        data.try_into()
    }

    fn submit_guess(&self, session_id: &str, guess: &Word) -> Result<RemoteGuess, RemoteError> {
        let data: GuessData = self.post(
            "/guess",
            Some(&GuessBody {
                session_id,
                guess: guess.text(),
            }),
        )?;
        data.try_into()
    }

    fn end_session(&self, session_id: &str) -> Result<RemoteSummary, RemoteError> {
        let data: EndData = self.post::<(), _>(&format!("/{session_id}/end"), None)?;
        Ok(data.into())
    }

    fn server_stats(&self) -> Result<ServerStats, RemoteError> {
        let data: StatsData = self.get("/stats")?;
        Ok(data.into())
    }

    fn daily_stats(&self, date: NaiveDate) -> Result<DailyServerStats, RemoteError> {
        let data: DailyStatsData = self.get(&format!("/daily-stats/{}", date.format("%Y%m%d")))?;
        Ok(data.server)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    fn parse<T: DeserializeOwned>(json: &str) -> Result<T, RemoteError> {
        serde_json::from_str::<ApiResponse<T>>(json)
            .unwrap()
            .into_data()
    }

    #[test]
    fn start_response_maps_to_session() {
        let json = r#"{
            "success": true,
            "message": "ok",
            "data": {
                "sessionId": "abc",
                "wordData": { "maskedWord": "c.........", "difficulty": "hard" },
                "gameInfo": { "attempts": 0, "maxAttempts": 6, "startTime": 1700000000 }
            }
        }"#;

        let session = RemoteSession::try_from(parse::<StartData>(json).unwrap()).unwrap();
        assert_eq!(session.session_id, "abc");
        assert_eq!(session.word_length, 10);
        assert_eq!(session.max_attempts, 6);
        assert_eq!(session.difficulty, Some(Difficulty::Hard));
    }

    #[test]
    fn unsuccessful_envelope_is_rejected() {
        let json = r#"{ "success": false, "message": "session expired", "data": null }"#;
        let err = parse::<StartData>(json).unwrap_err();
        assert!(matches!(err, RemoteError::Rejected(msg) if msg == "session expired"));
    }

    #[test]
    fn guess_response_maps_codes_in_position_order() {
        let json = r#"{
            "success": true,
            "message": "",
            "data": {
                "isCorrect": false,
                "attempts": 2,
                "maxAttempts": 6,
                "isCompleted": false,
                "isWon": false,
                "letterAnalysis": [
                    { "letter": "t", "status": "incorrect", "position": 3 },
                    { "letter": "c", "status": "correct", "position": 0 },
                    { "letter": "h", "status": "correct", "position": 1 },
                    { "letter": "u", "status": "wrong-position", "position": 2 }
                ]
            }
        }"#;

        let guess = RemoteGuess::try_from(parse::<GuessData>(json).unwrap()).unwrap();
        assert_eq!(
            guess.verdicts,
            vec![
                Verdict::Exact,
                Verdict::Exact,
                Verdict::Present,
                Verdict::Absent
            ]
        );
        assert_eq!(guess.attempts_used, 2);
        assert!(!guess.is_completed);
        assert_eq!(guess.revealed, None);
    }

    #[test]
    fn unknown_status_code_is_malformed() {
        let json = r#"{
            "success": true,
            "data": {
                "attempts": 1, "isCompleted": false, "isWon": false,
                "letterAnalysis": [ { "status": "bogus", "position": 0 } ]
            }
        }"#;
        let err = RemoteGuess::try_from(parse::<GuessData>(json).unwrap()).unwrap_err();
        assert!(matches!(err, RemoteError::Malformed(_)));
    }

    #[test]
    fn gap_in_positions_is_malformed() {
        let json = r#"{
            "success": true,
            "data": {
                "attempts": 1, "isCompleted": false, "isWon": false,
                "letterAnalysis": [
                    { "status": "correct", "position": 0 },
                    { "status": "correct", "position": 2 }
                ]
            }
        }"#;
        let err = RemoteGuess::try_from(parse::<GuessData>(json).unwrap()).unwrap_err();
        assert!(matches!(err, RemoteError::Malformed(_)));
    }

    #[test]
    fn end_response_maps_to_summary() {
        let json = r#"{
            "success": true,
            "data": {
                "sessionId": "abc",
                "isWon": true,
                "attempts": 3,
                "gameTime": 95,
                "wordInfo": { "word": "cacophonie", "difficulty": "hard", "length": 10 },
                "wordStats": {
                    "totalAttempts": 40, "totalSuccesses": 12, "successRate": 30.0,
                    "averageAttemptsToWin": 4.5, "averageGameTime": 120.0,
                    "perceivedDifficulty": 7.0, "sampleSize": 40
                }
            }
        }"#;

        let summary = RemoteSummary::from(parse::<EndData>(json).unwrap());
        assert!(summary.won);
        assert_eq!(summary.attempts, 3);
        assert_eq!(summary.game_time, Duration::from_secs(95));
        assert_eq!(summary.word, "cacophonie");
        assert!((summary.word_stats.unwrap().average_attempts - 4.5).abs() < f64::EPSILON);
    }

    /// Serve one canned HTTP response on a local port, reporting the request line
    fn serve_recording(
        status: &'static str,
        body: &'static str,
    ) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let request_line = String::from_utf8_lossy(&request)
                .lines()
                .next()
                .unwrap_or_default()
                .to_string();
            let _ = tx.send(request_line);

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
        });

        (format!("http://{addr}"), rx)
    }

    fn serve_once(status: &'static str, body: &'static str) -> String {
        serve_recording(status, body).0
    }

    #[test]
    fn http_server_stats() {
        let (server, requests) = serve_recording(
            "200 OK",
            r#"{"success":true,"data":{"overall":{"totalSessions":1200,"completedSessions":1000,"wonSessions":640,"winRate":64.0,"averageAttempts":4.2,"averageGameTime":95.5},"dailyChallenge":{"totalSessions":300}}}"#,
        );
        let evaluator = HttpEvaluator::new(&server, Duration::from_secs(5)).unwrap();

        let stats = evaluator.server_stats().unwrap();
        assert_eq!(
            requests.recv().unwrap(),
            "GET /api/sutom/game-session/stats HTTP/1.1"
        );
        assert_eq!(stats.total_sessions, 1200);
        assert_eq!(stats.won_sessions, 640);
        assert!((stats.win_rate - 64.0).abs() < f64::EPSILON);
        assert_eq!(stats.daily_sessions, Some(300));
    }

    #[test]
    fn http_daily_stats_for_date() {
        let (server, requests) = serve_recording(
            "200 OK",
            r#"{"success":true,"data":{"server":{"totalParticipants":80,"totalCompleted":75,"totalWon":60,"winRate":80.0,"completionRate":93.75,"averageAttempts":3.9,"averageGameTime":120000,"attemptsDistribution":[2,10,20,15,8,5],"topPerformers":[],"recentActivity":[],"isActive":true}}}"#,
        );
        let evaluator = HttpEvaluator::new(&server, Duration::from_secs(5)).unwrap();

        let stats = evaluator
            .daily_stats(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap())
            .unwrap();
        assert_eq!(
            requests.recv().unwrap(),
            "GET /api/sutom/game-session/daily-stats/20261017 HTTP/1.1"
        );
        assert_eq!(stats.total_participants, 80);
        assert_eq!(stats.total_won, 60);
        assert_eq!(stats.attempts_distribution, vec![2, 10, 20, 15, 8, 5]);
        assert!(stats.is_active);
    }

    #[test]
    fn http_daily_stats_refused() {
        let server = serve_once(
            "200 OK",
            r#"{"success":false,"message":"no challenge that day","data":null}"#,
        );
        let evaluator = HttpEvaluator::new(&server, Duration::from_secs(5)).unwrap();

        let err = evaluator
            .daily_stats(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap())
            .unwrap_err();
        assert!(matches!(err, RemoteError::Rejected(msg) if msg == "no challenge that day"));
    }

    #[test]
    fn http_guess_round_trip() {
        let server = serve_once(
            "200 OK",
            r#"{"success":true,"data":{"attempts":1,"isCompleted":true,"isWon":true,"correctAnswer":"chat","letterAnalysis":[{"status":"correct","position":0},{"status":"correct","position":1},{"status":"correct","position":2},{"status":"correct","position":3}]}}"#,
        );
        let evaluator = HttpEvaluator::new(&server, Duration::from_secs(5)).unwrap();

        let guess = evaluator
            .submit_guess("abc", &Word::new("chat").unwrap())
            .unwrap();
        assert_eq!(guess.verdicts, vec![Verdict::Exact; 4]);
        assert!(guess.is_won);
        assert_eq!(guess.revealed.as_deref(), Some("chat"));
    }

    #[test]
    fn http_error_status_reported() {
        let server = serve_once("503 Service Unavailable", "{}");
        let evaluator = HttpEvaluator::new(&server, Duration::from_secs(5)).unwrap();

        let err = evaluator.end_session("abc").unwrap_err();
        assert!(matches!(err, RemoteError::Status(503)));
    }

    #[test]
    fn http_silent_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let server = format!("http://{}", listener.local_addr().unwrap());
        let evaluator = HttpEvaluator::new(&server, Duration::from_millis(200)).unwrap();

        let err = evaluator
            .start_session(&StartRequest::Daily {
                date: NaiveDate::from_ymd_opt(2026, 10, 17).unwrap(),
            })
            .unwrap_err();
        assert!(matches!(err, RemoteError::Timeout | RemoteError::Http(_)));
        drop(listener);
    }

    #[test]
    fn unreachable_server_is_an_error() {
        // Bind then drop to get a port nobody listens on
        let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
        let evaluator =
            HttpEvaluator::new(&format!("http://{addr}"), Duration::from_secs(1)).unwrap();

        let err = evaluator.end_session("abc").unwrap_err();
        assert!(matches!(err, RemoteError::Http(_) | RemoteError::Timeout));
    }
}
