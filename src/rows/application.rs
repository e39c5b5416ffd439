//! Per-document extraction context shared by every column rule.

use crate::clock::Clock;
use crate::dates;
use crate::extractor::{self, Address};
use crate::types::SqlValue;
use chrono::NaiveDate;
use serde_json::Value;

/// Income sources kept per application
pub const INCOME_SOURCE_SLOTS: usize = 7;

/// Investment objectives kept per application
pub const OBJECTIVE_SLOTS: usize = 8;

const REDEMPTION_ACCOUNTS: &str = "data.otherAccountInfo.redemptionBankAccounts";

/// One application document with the pieces several columns share
/// (addresses, bank account, tags) pulled out once.
pub struct Application<'a> {
    root: &'a Value,
    bank_account: &'a Value,
    types: Vec<String>,
    income_sources: Vec<String>,
    objectives: Vec<String>,
    today: NaiveDate,

    pub residence: Address,
    pub mailing: Address,
    pub contact: Address,
    pub work: Address,
}

impl<'a> Application<'a> {
    pub fn new(root: &'a Value, clock: &dyn Clock) -> Self {
        let address = |name: &str| Address::from_value(extractor::lookup(root, name));

        Application {
            root,
            bank_account: extractor::first_entry(root, REDEMPTION_ACCOUNTS),
            types: extractor::tags(root, "types"),
            income_sources: extractor::repeating_group(root, "data.incomeSources", INCOME_SOURCE_SLOTS),
            objectives: extractor::repeating_group(root, "data.investmentObjectives", OBJECTIVE_SLOTS),
            today: clock.today(),
            residence: address("data.residence"),
            mailing: address("data.mailing"),
            contact: address("data.contact"),
            work: address("data.work"),
        }
    }

    pub fn root(&self) -> &'a Value {
        self.root
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn app_id(&self) -> i64 {
        extractor::integer(self.root, "applicationId")
    }

    pub fn text(&self, path: &str) -> SqlValue {
        SqlValue::Text(extractor::text(self.root, path))
    }

    pub fn integer(&self, path: &str) -> SqlValue {
        SqlValue::Int(extractor::integer(self.root, path))
    }

    pub fn decimal(&self, path: &str) -> SqlValue {
        extractor::decimal(self.root, path).map_or(SqlValue::Null, SqlValue::Decimal)
    }

    /// Enum key of a tagged field
    pub fn key(&self, path: &str) -> SqlValue {
        SqlValue::Text(extractor::enum_key(self.root, path))
    }

    /// Single-character code taken from an enum key
    pub fn code(&self, path: &str) -> SqlValue {
        SqlValue::Text(extractor::first_char(&extractor::enum_key(self.root, path)))
    }

    /// Like [`code`](Self::code) but with a fallback when the key is empty
    pub fn code_or(&self, path: &str, fallback: &str) -> SqlValue {
        let code = extractor::first_char(&extractor::enum_key(self.root, path));
        SqlValue::Text(if code.is_empty() { fallback.to_string() } else { code })
    }

    pub fn date(&self, path: &str) -> SqlValue {
        dates::normalize(&extractor::date_text(self.root, path)).into_value()
    }

    pub fn yes_no(&self, path: &str) -> SqlValue {
        SqlValue::yes_no(extractor::flag(self.root, path))
    }

    /// `'Y'` when the application was opened with the given account type
    pub fn has_type(&self, tag: &str) -> SqlValue {
        SqlValue::yes_no(self.types.iter().any(|t| t == tag))
    }

    pub fn types_joined(&self) -> SqlValue {
        SqlValue::Text(self.types.join(","))
    }

    /// Field of the first redemption bank account
    pub fn bank(&self, field: &str) -> SqlValue {
        SqlValue::Text(extractor::text(self.bank_account, field))
    }

    pub fn bank_code(&self, field: &str) -> SqlValue {
        SqlValue::Text(extractor::first_char(&extractor::enum_key(self.bank_account, field)))
    }

    /// Income source in slot `idx` (0-based), `""` when unused
    pub fn income_source(&self, idx: usize) -> SqlValue {
        slot(&self.income_sources, idx)
    }

    pub fn objective(&self, idx: usize) -> SqlValue {
        slot(&self.objectives, idx)
    }
}

fn slot(items: &[String], idx: usize) -> SqlValue {
    SqlValue::Text(items.get(idx).cloned().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use serde_json::json;

    fn clock() -> FixedClock {
        FixedClock(
            NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        )
    }

    #[test]
    fn test_feature_flags() {
        let doc = json!({"types": ["EQUITY", "BOND"]});
        let app = Application::new(&doc, &clock());

        assert_eq!(app.has_type("EQUITY"), SqlValue::text("Y"));
        assert_eq!(app.has_type("BOND"), SqlValue::text("Y"));
        for tag in ["CREDIT_BALANCE", "TFEX", "FUND", "OFFSHORE"] {
            assert_eq!(app.has_type(tag), SqlValue::text("N"), "{tag}");
        }
        assert_eq!(app.types_joined(), SqlValue::text("EQUITY,BOND"));
    }

    #[test]
    fn test_empty_document() {
        let doc = json!({});
        let app = Application::new(&doc, &clock());

        assert_eq!(app.app_id(), 0);
        assert_eq!(app.text("data.thFirstName"), SqlValue::text(""));
        assert_eq!(app.code("data.gender"), SqlValue::text(""));
        assert_eq!(app.code_or("data.serviceType", "N"), SqlValue::text("N"));
        assert_eq!(app.date("data.birthDate"), SqlValue::Null);
        assert_eq!(app.decimal("data.monthlyIncomeAmount"), SqlValue::Null);
        assert_eq!(app.bank("bankCode"), SqlValue::text(""));
        assert_eq!(app.income_source(6), SqlValue::text(""));
        assert_eq!(app.objective(7), SqlValue::text(""));
        assert_eq!(app.types_joined(), SqlValue::text(""));
        assert_eq!(app.residence, Address::default());
        assert_eq!(app.today(), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    }

    #[test]
    fn test_first_bank_account_only() {
        let doc = json!({"data": {"otherAccountInfo": {"redemptionBankAccounts": [
            {"bankCode": "004", "bankAccountType": {"key": "SAVING"}},
            {"bankCode": "014", "bankAccountType": {"key": "CURRENT"}}
        ]}}});
        let app = Application::new(&doc, &clock());

        assert_eq!(app.bank("bankCode"), SqlValue::text("004"));
        assert_eq!(app.bank_code("bankAccountType"), SqlValue::text("S"));
    }

    #[test]
    fn test_codes_and_dates() {
        let doc = json!({"data": {
            "gender": {"key": "MALE"},
            "serviceType": {"key": "ONLINE"},
            "birthDate": {"formatted": "15/01/1990"}
        }});
        let app = Application::new(&doc, &clock());

        assert_eq!(app.code("data.gender"), SqlValue::text("M"));
        assert_eq!(app.code_or("data.serviceType", "N"), SqlValue::text("O"));
        assert_eq!(
            app.date("data.birthDate"),
            SqlValue::Date(NaiveDate::from_ymd_opt(1990, 1, 15).unwrap())
        );
    }
}
