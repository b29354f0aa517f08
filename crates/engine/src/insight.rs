//! Builds the bounded prompt handed to the external assistant.
//!
//! The full history is slimmed to the most recent records and serialized
//! under a hard character budget; records that would overflow the budget are
//! dropped whole, so the payload is always well-formed JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, MoneyCents, ResultEngine, Transaction, TransactionKind};

/// Most-recent records retained in the prompt payload.
pub const HISTORY_LIMIT: usize = 100;
/// Maximum note length carried per record, in chars.
pub const NOTE_LIMIT: usize = 80;
/// Maximum serialized payload length, in chars.
pub const PAYLOAD_LIMIT: usize = 12_000;

const SYSTEM_INSTRUCTION: &str = "You are a concise, upbeat financial assistant. \
Be specific and actionable, and quote amounts in the user's currency. \
If data is limited, say so and suggest next steps.";

/// Field-reduced projection of a transaction for the assistant payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlimTransaction {
    pub id: Uuid,
    /// Major units; display value for the assistant, not stored money.
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub note: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Transaction> for SlimTransaction {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: tx.id,
            amount: MoneyCents::new(tx.amount_minor).to_major(),
            kind: tx.kind,
            category: tx.category.clone(),
            note: tx
                .note
                .as_deref()
                .map(|note| note.chars().take(NOTE_LIMIT).collect())
                .unwrap_or_default(),
            created_at: tx.created_at,
        }
    }
}

/// Projects the [`HISTORY_LIMIT`] most-recently-created transactions, newest
/// first, regardless of input order.
pub fn slim_history(transactions: &[Transaction]) -> Vec<SlimTransaction> {
    let mut recent: Vec<&Transaction> = transactions.iter().collect();
    recent.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    recent
        .into_iter()
        .take(HISTORY_LIMIT)
        .map(SlimTransaction::from)
        .collect()
}

/// Serializes slimmed records as a JSON array of at most [`PAYLOAD_LIMIT`]
/// chars, dropping trailing whole records rather than slicing mid-record.
pub fn render_history(records: &[SlimTransaction]) -> ResultEngine<String> {
    let mut out = String::from("[");
    for record in records {
        let json = serde_json::to_string(record)
            .map_err(|err| EngineError::Serialization(err.to_string()))?;
        let separator = if out.len() > 1 { 1 } else { 0 };
        // Project the final length including the closing bracket.
        if out.len() + separator + json.len() + 1 > PAYLOAD_LIMIT {
            break;
        }
        if separator == 1 {
            out.push(',');
        }
        out.push_str(&json);
    }
    out.push(']');
    Ok(out)
}

/// Composes the full prompt: system instruction, user question, slimmed
/// history.
pub fn compose_prompt(question: &str, transactions: &[Transaction]) -> ResultEngine<String> {
    let slim = slim_history(transactions);
    let history = render_history(&slim)?;

    Ok(format!(
        "{SYSTEM_INSTRUCTION}\n\n\
        User: {question}\n\n\
        Here are the most recent transactions (latest {HISTORY_LIMIT}, slimmed):\n\
        {history}\n"
    ))
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    fn tx(index: i64, note: Option<&str>) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            user_id: "alice".to_string(),
            kind: TransactionKind::Expense,
            amount_minor: 100 + index,
            category: "Food".to_string(),
            note: note.map(ToString::to_string),
            created_at: Utc::now() - Duration::minutes(index),
        }
    }

    #[test]
    fn keeps_only_the_latest_hundred() {
        // index 0 is the newest.
        let history: Vec<Transaction> = (0..150).map(|i| tx(i, None)).collect();
        let slim = slim_history(&history);

        assert_eq!(slim.len(), HISTORY_LIMIT);
        let newest: Vec<Uuid> = history.iter().take(HISTORY_LIMIT).map(|t| t.id).collect();
        let kept: Vec<Uuid> = slim.iter().map(|s| s.id).collect();
        assert_eq!(kept, newest);
    }

    #[test]
    fn newest_first_even_from_unordered_input() {
        let mut history: Vec<Transaction> = (0..10).map(|i| tx(i, None)).collect();
        history.reverse();
        let slim = slim_history(&history);

        let mut stamps: Vec<_> = slim.iter().map(|s| s.created_at).collect();
        let sorted = {
            let mut s = stamps.clone();
            s.sort_by(|a, b| b.cmp(a));
            s
        };
        assert_eq!(stamps.len(), 10);
        assert_eq!(stamps, sorted);
        stamps.dedup();
        assert_eq!(stamps.len(), 10);
    }

    #[test]
    fn notes_are_truncated_on_char_boundaries() {
        let long = "é".repeat(200);
        let slim = slim_history(&[tx(0, Some(&long))]);

        assert_eq!(slim[0].note.chars().count(), NOTE_LIMIT);
    }

    #[test]
    fn payload_stays_within_budget_and_valid() {
        let long_note = "x".repeat(79);
        let history: Vec<Transaction> = (0..150).map(|i| tx(i, Some(&long_note))).collect();
        let slim = slim_history(&history);
        let payload = render_history(&slim).unwrap();

        assert!(payload.len() <= PAYLOAD_LIMIT);
        // Whole records were dropped, never sliced: the payload still parses.
        let parsed: Vec<SlimTransaction> = serde_json::from_str(&payload).unwrap();
        assert!(!parsed.is_empty());
        assert!(parsed.len() < slim.len());
        assert_eq!(parsed[0].id, slim[0].id);
    }

    #[test]
    fn small_histories_render_in_full() {
        let history: Vec<Transaction> = (0..3).map(|i| tx(i, None)).collect();
        let slim = slim_history(&history);
        let payload = render_history(&slim).unwrap();

        let parsed: Vec<SlimTransaction> = serde_json::from_str(&payload).unwrap();
        assert_eq!(parsed, slim);
    }

    #[test]
    fn empty_history_renders_an_empty_array() {
        assert_eq!(render_history(&[]).unwrap(), "[]");
    }

    #[test]
    fn prompt_carries_question_and_history() {
        let history = vec![tx(0, Some("groceries"))];
        let prompt = compose_prompt("Where does my money go?", &history).unwrap();

        assert!(prompt.contains("Where does my money go?"));
        assert!(prompt.contains("groceries"));
        assert!(prompt.contains("financial assistant"));
    }
}
