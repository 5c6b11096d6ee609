//! Game sessions.
//!
//! A `GameSession` is the explicit owner of one game: there is no global
//! state. Renderers plug in through the `GameObserver` trait and feed input
//! back with `select` and `reset`.
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use memory_match::core::{CardId, GameConfig};
//! use memory_match::session::GameSession;
//!
//! let config = GameConfig::new().with_symbols(["anchor", "bolt"]);
//! let mut session = GameSession::with_event_log(config, 42).unwrap();
//!
//! // Cards 0 and 2 carry "anchor", 1 and 3 carry "bolt".
//! session.select(CardId::new(0)).unwrap();
//! session.select(CardId::new(2)).unwrap();
//! session.select(CardId::new(1)).unwrap();
//! session.select(CardId::new(3)).unwrap();
//!
//! assert!(session.is_game_over());
//! assert_eq!(session.summary().unwrap().moves, 2);
//!
//! // The clock is stopped.
//! session.advance(Duration::from_secs(5)).unwrap();
//! assert_eq!(session.scoreboard().elapsed_seconds(), 0);
//! ```

mod game;
mod observer;
mod summary;

pub use game::GameSession;
pub use observer::{EventLog, GameObserver, SessionEvent};
pub use summary::{GameSnapshot, GameSummary};
