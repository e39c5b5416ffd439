//! `eopen_sba`: account-opening record sent to the back office.

use crate::rows::plan::{ColumnPlan, TablePlan};
use crate::types::{ColumnType, SqlValue};
use once_cell::sync::Lazy;

pub const TABLE: &str = "eopen_sba";

pub static PLAN: Lazy<TablePlan> = Lazy::new(|| {
    TablePlan::new(
        TABLE,
        vec![
            ColumnPlan::today("trans_date"),
            ColumnPlan::expression("request_time", ColumnType::Numeric, "EXTRACT(epoch FROM now())"),
            ColumnPlan::integer("app_id", |app| app.integer("applicationId")),
            ColumnPlan::constant("custtype", SqlValue::text("I")),
            ColumnPlan::text("accounttype", 100, |app| app.types_joined()),
            // names
            ColumnPlan::text("ttitle", 20, |app| app.key("data.title")),
            ColumnPlan::text("tname", 100, |app| app.text("data.thFirstName")),
            ColumnPlan::text("tsurname", 100, |app| app.text("data.thLastName")),
            ColumnPlan::constant("etitle", SqlValue::text("")),
            ColumnPlan::text("ename", 100, |app| app.text("data.enFirstName")),
            ColumnPlan::text("esurname", 100, |app| app.text("data.enLastName")),
            // identity card
            ColumnPlan::text("cardidtype", 1, |app| app.code("data.cardIdType")),
            ColumnPlan::text("cardid", 20, |app| app.text("data.cardNumber")),
            ColumnPlan::date("cardissue", |app| app.date("data.cardIssueDate")),
            ColumnPlan::date("cardexpire", |app| app.date("data.cardExpiryDate")),
            ColumnPlan::text("sex", 1, |app| app.code("data.gender")),
            ColumnPlan::date("birthday", |app| app.date("data.birthDate")),
            // residence
            ColumnPlan::text("firstaddr1", 120, |app| SqlValue::Text(app.residence.line1())),
            ColumnPlan::text("firstaddr2", 120, |app| SqlValue::Text(app.residence.line2())),
            ColumnPlan::text("firstaddr3", 120, |app| SqlValue::Text(app.residence.line3())),
            ColumnPlan::text("firstzipcode", 10, |app| SqlValue::text(app.residence.postal_code.trim())),
            ColumnPlan::text("firstctycode", 3, |app| SqlValue::text(app.residence.country.trim())),
            // contact
            ColumnPlan::text("firsttelno1", 20, |app| app.text("data.telephoneNumber")),
            ColumnPlan::text("firsttelno2", 20, |app| app.text("data.officeTelephoneNumber")),
            ColumnPlan::text("firstfaxno1", 20, |app| app.text("data.faxNumber")),
            ColumnPlan::text("email1", 100, |app| app.text("data.email")),
            // redemption account
            ColumnPlan::text("bankcode", 3, |app| app.bank("bankCode")),
            ColumnPlan::text("bankbranchcode", 5, |app| app.bank("bankBranchCode")),
            ColumnPlan::text("bankacctype", 1, |app| app.bank_code("bankAccountType")),
            ColumnPlan::text("bankaccno", 20, |app| app.bank("bankAccountNo")),
            // services
            ColumnPlan::text("receivetype", 20, |app| app.key("data.receiveType")),
            ColumnPlan::text("paymenttype", 20, |app| app.key("data.paymentType")),
            ColumnPlan::text("servicetype", 1, |app| app.code_or("data.serviceType", "N")),
            ColumnPlan::text("mktid", 20, |app| app.text("data.referralId")),
            // account features
            ColumnPlan::text("cash_type", 1, |app| app.has_type("EQUITY")),
            ColumnPlan::text("credit_bal_type", 1, |app| app.has_type("CREDIT_BALANCE")),
            ColumnPlan::text("tfex_type", 1, |app| app.has_type("TFEX")),
            ColumnPlan::text("bond_type", 1, |app| app.has_type("BOND")),
            ColumnPlan::text("fund_type", 1, |app| app.has_type("FUND")),
            ColumnPlan::text("offshore_type", 1, |app| app.has_type("OFFSHORE")),
            // audit
            ColumnPlan::constant("is_active", SqlValue::Int(1)),
            ColumnPlan::constant("entry_user", SqlValue::text("SYSTEM")),
            ColumnPlan::expression("entry_datetime", ColumnType::Text, "now()"),
        ],
    )
});
