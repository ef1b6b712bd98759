//! Best-score record
//!
//! A single integer persisted under [`HIGH_SCORE_KEY`]. Missing or garbled
//! values read as zero; the record only ever goes up.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::consts::HIGH_SCORE_KEY;

/// Durable key/value storage for the record
pub trait ScoreStore {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&mut self, key: &str, value: &str);
}

/// In-process store (native runs and tests)
///
/// Clones share the same map, so a test can keep a handle while the
/// session owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }
}

impl ScoreStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.get(key)
    }

    fn write(&mut self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

/// The persisted best score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Parse a stored value; anything unusable reads as zero
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if let Ok(best) = raw.parse::<u64>() {
            return Self { best };
        }
        // Older saves may hold a float ("12.0")
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => Self {
                best: v.floor() as u64,
            },
            _ => {
                log::warn!("Ignoring unreadable high score {:?}", raw);
                Self::default()
            }
        }
    }

    pub fn load(store: &impl ScoreStore) -> Self {
        match store.read(HIGH_SCORE_KEY) {
            Some(raw) => {
                let record = Self::parse(&raw);
                log::info!("Loaded high score {}", record.best);
                record
            }
            None => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut impl ScoreStore) {
        store.write(HIGH_SCORE_KEY, &self.best.to_string());
        log::info!("High score saved ({})", self.best);
    }

    /// Take `score` if it beats the record. Returns `true` on a new record.
    pub fn submit(&mut self, score: u64) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }
}
