use serde::Serialize;
use tokio::sync::RwLock;

/// Discrete observable events, appended by each mutation and consumed by
/// polling subscribers. An explicit ordered log, not a listener registry,
/// keeps the core free of control-flow coupling to the UI.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    MatchCreated {
        match_id: u64,
        creator: String,
    },
    OpponentJoined {
        match_id: u64,
        opponent: String,
    },
    BoardPlaced {
        match_id: u64,
        player: String,
    },
    AttackResult {
        match_id: u64,
        attacker: String,
        x: usize,
        y: usize,
        hit: bool,
    },
    MatchOver {
        match_id: u64,
        winner: String,
    },
}

impl GameEvent {
    pub fn match_id(&self) -> u64 {
        match self {
            GameEvent::MatchCreated { match_id, .. }
            | GameEvent::OpponentJoined { match_id, .. }
            | GameEvent::BoardPlaced { match_id, .. }
            | GameEvent::AttackResult { match_id, .. }
            | GameEvent::MatchOver { match_id, .. } => *match_id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EventRecord {
    pub seq: u64,
    pub timestamp: i64,
    #[serde(flatten)]
    pub event: GameEvent,
}

/// Append-only log with a global 1-based sequence.
#[derive(Default)]
pub struct EventLog {
    records: RwLock<Vec<EventRecord>>,
}

impl EventLog {
    pub async fn append(&self, event: GameEvent, timestamp: i64) -> u64 {
        let mut records = self.records.write().await;
        let seq = records.len() as u64 + 1;
        records.push(EventRecord {
            seq,
            timestamp,
            event,
        });
        seq
    }

    /// Records with `seq > since`, oldest first, optionally filtered to a
    /// single match. `since = 0` replays the whole log.
    pub async fn since(&self, since: u64, match_id: Option<u64>) -> Vec<EventRecord> {
        let records = self.records.read().await;
        records
            .iter()
            .filter(|record| record.seq > since)
            .filter(|record| match_id.map_or(true, |id| record.event.match_id() == id))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn append_assigns_increasing_seq() {
        let log = EventLog::default();
        let first = log
            .append(
                GameEvent::MatchCreated {
                    match_id: 1,
                    creator: "0xa".into(),
                },
                10,
            )
            .await;
        let second = log
            .append(
                GameEvent::OpponentJoined {
                    match_id: 1,
                    opponent: "0xb".into(),
                },
                11,
            )
            .await;
        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[tokio::test]
    async fn since_cursor_is_exclusive() {
        let log = EventLog::default();
        for id in 1..=3 {
            log.append(
                GameEvent::MatchCreated {
                    match_id: id,
                    creator: "0xa".into(),
                },
                0,
            )
            .await;
        }

        let all = log.since(0, None).await;
        assert_eq!(all.len(), 3);

        let tail = log.since(2, None).await;
        assert_eq!(tail.len(), 1);
        assert_eq!(tail[0].seq, 3);
    }

    #[tokio::test]
    async fn match_filter_applies() {
        let log = EventLog::default();
        log.append(
            GameEvent::MatchCreated {
                match_id: 1,
                creator: "0xa".into(),
            },
            0,
        )
        .await;
        log.append(
            GameEvent::MatchCreated {
                match_id: 2,
                creator: "0xb".into(),
            },
            0,
        )
        .await;
        log.append(
            GameEvent::BoardPlaced {
                match_id: 2,
                player: "0xb".into(),
            },
            0,
        )
        .await;

        let match_two = log.since(0, Some(2)).await;
        assert_eq!(match_two.len(), 2);
        assert!(match_two.iter().all(|r| r.event.match_id() == 2));
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let record = EventRecord {
            seq: 7,
            timestamp: 42,
            event: GameEvent::AttackResult {
                match_id: 1,
                attacker: "0xa".into(),
                x: 2,
                y: 3,
                hit: true,
            },
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "attack_result");
        assert_eq!(json["seq"], 7);
        assert_eq!(json["hit"], true);
    }
}
