//! Normalization and validation of client-submitted transaction payloads.
//!
//! A [`TransactionDraft`] is the raw, untrusted shape. [`TransactionDraft::validate`]
//! either produces a [`NewTransaction`] ready for persistence or the first
//! validation failure, without side effects.

use crate::{EngineError, MoneyCents, ResultEngine, TransactionKind};

/// Amount as it arrives from a client, before coercion.
#[derive(Clone, Debug, PartialEq)]
pub enum AmountField {
    /// JSON number in major units.
    Major(f64),
    /// Decimal string, e.g. `"12.50"`.
    Text(String),
}

/// Raw transaction payload.
#[derive(Clone, Debug, Default)]
pub struct TransactionDraft {
    pub amount: Option<AmountField>,
    pub kind: Option<String>,
    pub category: Option<String>,
    pub note: Option<String>,
}

/// Validated fields for a create or update, amount already in cents.
#[derive(Clone, Debug, PartialEq)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub amount: MoneyCents,
    pub category: String,
    pub note: Option<String>,
}

fn normalize_required_text(value: Option<&str>, label: &str) -> ResultEngine<String> {
    let trimmed = value.unwrap_or_default().trim();
    if trimmed.is_empty() {
        return Err(EngineError::MissingField(label.to_string()));
    }
    Ok(trimmed.to_string())
}

fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

impl TransactionDraft {
    /// Validates and normalizes the draft.
    ///
    /// - `amount` is coerced to cents; non-numeric, non-finite, zero and
    ///   negative values are [`EngineError::InvalidAmount`].
    /// - `kind` must be `income` or `expense` ([`EngineError::InvalidKind`]),
    ///   and must be present ([`EngineError::MissingField`]).
    /// - `category` must be non-empty after trimming.
    /// - blank `note` normalizes to `None`.
    pub fn validate(self) -> ResultEngine<NewTransaction> {
        let amount = match self.amount {
            None => return Err(EngineError::MissingField("amount".to_string())),
            Some(AmountField::Major(value)) => MoneyCents::try_from_major(value)?,
            Some(AmountField::Text(text)) => text.parse::<MoneyCents>()?,
        };
        if !amount.is_positive() {
            return Err(EngineError::InvalidAmount(
                "amount must be > 0".to_string(),
            ));
        }

        let kind = normalize_required_text(self.kind.as_deref(), "type")?;
        let kind = TransactionKind::try_from(kind.as_str())?;

        let category = normalize_required_text(self.category.as_deref(), "category")?;
        let note = normalize_optional_text(self.note.as_deref());

        Ok(NewTransaction {
            kind,
            amount,
            category,
            note,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(amount: AmountField, kind: &str, category: &str) -> TransactionDraft {
        TransactionDraft {
            amount: Some(amount),
            kind: Some(kind.to_string()),
            category: Some(category.to_string()),
            note: None,
        }
    }

    #[test]
    fn accepts_numeric_and_text_amounts() {
        let new = draft(AmountField::Major(12.5), "income", "Pay")
            .validate()
            .unwrap();
        assert_eq!(new.amount.cents(), 1250);
        assert_eq!(new.kind, TransactionKind::Income);

        let new = draft(AmountField::Text("40".to_string()), "expense", "Food")
            .validate()
            .unwrap();
        assert_eq!(new.amount.cents(), 4000);
        assert_eq!(new.kind, TransactionKind::Expense);
    }

    #[test]
    fn rejects_non_numeric_amount() {
        let err = draft(AmountField::Text("abc".to_string()), "income", "Pay")
            .validate()
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidAmount(_)));
    }

    #[test]
    fn rejects_zero_and_negative_amounts() {
        for amount in [
            AmountField::Major(0.0),
            AmountField::Major(-3.0),
            AmountField::Text("0".to_string()),
            AmountField::Text("-5.00".to_string()),
        ] {
            let err = draft(amount, "expense", "Food").validate().unwrap_err();
            assert!(matches!(err, EngineError::InvalidAmount(_)));
        }
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = draft(AmountField::Major(10.0), "bonus", "Pay")
            .validate()
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidKind(_)));
    }

    #[test]
    fn missing_fields_are_reported() {
        let err = TransactionDraft {
            amount: None,
            kind: Some("income".to_string()),
            category: Some("Pay".to_string()),
            note: None,
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, EngineError::MissingField("amount".to_string()));

        let err = draft(AmountField::Major(10.0), "income", "   ")
            .validate()
            .unwrap_err();
        assert_eq!(err, EngineError::MissingField("category".to_string()));

        let err = TransactionDraft {
            amount: Some(AmountField::Major(10.0)),
            kind: None,
            category: Some("Pay".to_string()),
            note: None,
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, EngineError::MissingField("type".to_string()));
    }

    #[test]
    fn note_normalizes_to_none_when_blank() {
        let mut d = draft(AmountField::Major(10.0), "income", "Pay");
        d.note = Some("  ".to_string());
        assert_eq!(d.validate().unwrap().note, None);

        let mut d = draft(AmountField::Major(10.0), "income", "Pay");
        d.note = Some(" lunch with team ".to_string());
        assert_eq!(d.validate().unwrap().note.as_deref(), Some("lunch with team"));
    }

    #[test]
    fn category_is_trimmed() {
        let new = draft(AmountField::Major(10.0), "income", "  Salary  ")
            .validate()
            .unwrap();
        assert_eq!(new.category, "Salary");
    }
}
