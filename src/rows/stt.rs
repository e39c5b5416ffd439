//! `eopen_stt`: status and tracking record holding the whole application.

use crate::rows::plan::{ColumnPlan, TablePlan};
use crate::types::{ColumnType, SqlValue};
use once_cell::sync::Lazy;

pub const TABLE: &str = "eopen_stt";

/// `<prefix>_addr1..3`, `<prefix>_zipcode` and `<prefix>_ctycode` for one address block
macro_rules! address_lines {
    ($block:ident, $prefix:literal) => {
        [
            ColumnPlan::text(concat!($prefix, "_addr1"), 120, |app| {
                SqlValue::Text(app.$block.line1())
            }),
            ColumnPlan::text(concat!($prefix, "_addr2"), 120, |app| {
                SqlValue::Text(app.$block.line2())
            }),
            ColumnPlan::text(concat!($prefix, "_addr3"), 120, |app| {
                SqlValue::Text(app.$block.line3())
            }),
            ColumnPlan::text(concat!($prefix, "_zipcode"), 10, |app| {
                SqlValue::text(app.$block.postal_code.trim())
            }),
            ColumnPlan::text(concat!($prefix, "_ctycode"), 3, |app| {
                SqlValue::text(app.$block.country.trim())
            }),
        ]
    };
}

pub static PLAN: Lazy<TablePlan> = Lazy::new(|| {
    let mut columns = vec![
        ColumnPlan::today("trans_date"),
        ColumnPlan::expression("request_time", ColumnType::Numeric, "EXTRACT(epoch FROM now())"),
        ColumnPlan::constant("flag_process", SqlValue::text("N")),
        ColumnPlan::integer("app_id", |app| app.integer("applicationId")),
        ColumnPlan::text("status", 30, |app| app.text("status")),
        ColumnPlan::text("types", 100, |app| app.types_joined()),
        // submitter
        ColumnPlan::text("user_id", 50, |app| app.text("user.id")),
        ColumnPlan::text("user_name", 100, |app| app.text("user.username")),
        ColumnPlan::text("user_email", 100, |app| app.text("user.email")),
        ColumnPlan::text("user_mobile", 20, |app| app.text("user.mobileNumber")),
        // personal
        ColumnPlan::text("t_title", 20, |app| app.key("data.title")),
        ColumnPlan::text("t_fname", 100, |app| app.text("data.thFirstName")),
        ColumnPlan::text("t_lname", 100, |app| app.text("data.thLastName")),
        ColumnPlan::text("e_title", 20, |app| app.key("data.titleEn")),
        ColumnPlan::text("e_fname", 100, |app| app.text("data.enFirstName")),
        ColumnPlan::text("e_lname", 100, |app| app.text("data.enLastName")),
        ColumnPlan::text("gender", 1, |app| app.code("data.gender")),
        ColumnPlan::date("birth_date", |app| app.date("data.birthDate")),
        ColumnPlan::text("nationality", 20, |app| app.key("data.nationality")),
        ColumnPlan::text("marital_status", 20, |app| app.key("data.maritalStatus")),
        ColumnPlan::text("mobile", 20, |app| app.text("data.mobileNumber")),
        ColumnPlan::text("email", 100, |app| app.text("data.email")),
        ColumnPlan::text("telephone", 20, |app| app.text("data.telephoneNumber")),
        ColumnPlan::text("office_telephone", 20, |app| app.text("data.officeTelephoneNumber")),
        ColumnPlan::text("fax", 20, |app| app.text("data.faxNumber")),
        // identity card
        ColumnPlan::text("id_card_type", 30, |app| app.key("data.cardIdType")),
        ColumnPlan::text("card_no", 20, |app| app.text("data.cardNumber")),
        ColumnPlan::date("card_issue_date", |app| app.date("data.cardIssueDate")),
        ColumnPlan::date("card_expiry_date", |app| app.date("data.cardExpiryDate")),
        // lifecycle, kept as sent
        ColumnPlan::text("created_time", 40, |app| app.text("createdTime")),
        ColumnPlan::text("last_updated_time", 40, |app| app.text("lastUpdatedTime")),
        ColumnPlan::text("submitted_time", 40, |app| app.text("submittedTime")),
        // residence, one column per leaf
        ColumnPlan::text("res_no", 30, |app| SqlValue::text(&app.residence.no)),
        ColumnPlan::text("res_moo", 10, |app| SqlValue::text(&app.residence.moo)),
        ColumnPlan::text("res_village", 100, |app| SqlValue::text(&app.residence.village)),
        ColumnPlan::text("res_building", 100, |app| SqlValue::text(&app.residence.building)),
        ColumnPlan::text("res_floor", 10, |app| SqlValue::text(&app.residence.floor)),
        ColumnPlan::text("res_soi", 100, |app| SqlValue::text(&app.residence.soi)),
        ColumnPlan::text("res_road", 100, |app| SqlValue::text(&app.residence.road)),
        ColumnPlan::text("res_sub_district", 100, |app| SqlValue::text(&app.residence.sub_district)),
        ColumnPlan::text("res_district", 100, |app| SqlValue::text(&app.residence.district)),
        ColumnPlan::text("res_province", 100, |app| SqlValue::text(&app.residence.province)),
        ColumnPlan::text("res_country", 3, |app| SqlValue::text(&app.residence.country)),
        ColumnPlan::text("res_postal_code", 10, |app| SqlValue::text(&app.residence.postal_code)),
    ];

    columns.extend(address_lines!(residence, "res"));
    columns.push(ColumnPlan::text("mailing_addr_type", 20, |app| app.key("data.mailingAddressType")));
    columns.extend(address_lines!(mailing, "mail"));
    columns.extend(address_lines!(contact, "contact"));
    columns.extend(address_lines!(work, "work"));

    columns.extend([
        // occupation
        ColumnPlan::text("occupation", 30, |app| app.key("data.occupation")),
        ColumnPlan::text("occupation_other", 100, |app| app.text("data.occupationOther")),
        ColumnPlan::text("business_type", 30, |app| app.key("data.businessType")),
        ColumnPlan::text("business_type_other", 100, |app| app.text("data.businessTypeOther")),
        ColumnPlan::text("company_name", 150, |app| app.text("data.companyName")),
        ColumnPlan::text("position", 100, |app| app.text("data.position")),
        // financial
        ColumnPlan::text("monthly_income", 30, |app| app.key("data.monthlyIncome")),
        ColumnPlan::numeric("monthly_income_amount", |app| app.decimal("data.monthlyIncomeAmount")),
        ColumnPlan::text("asset_value", 30, |app| app.key("data.assetValue")),
        ColumnPlan::text("income_country", 30, |app| app.key("data.incomeSourceCountry")),
        ColumnPlan::text("income_source1", 30, |app| app.income_source(0)),
        ColumnPlan::text("income_source2", 30, |app| app.income_source(1)),
        ColumnPlan::text("income_source3", 30, |app| app.income_source(2)),
        ColumnPlan::text("income_source4", 30, |app| app.income_source(3)),
        ColumnPlan::text("income_source5", 30, |app| app.income_source(4)),
        ColumnPlan::text("income_source6", 30, |app| app.income_source(5)),
        ColumnPlan::text("income_source7", 30, |app| app.income_source(6)),
        ColumnPlan::text("income_source_other", 100, |app| app.text("data.incomeSourceOther")),
        // family
        ColumnPlan::text("spouse_title", 20, |app| app.key("data.spouse.title")),
        ColumnPlan::text("spouse_fname", 100, |app| app.text("data.spouse.thFirstName")),
        ColumnPlan::text("spouse_lname", 100, |app| app.text("data.spouse.thLastName")),
        ColumnPlan::text("spouse_card_no", 20, |app| app.text("data.spouse.cardNumber")),
        ColumnPlan::text("spouse_mobile", 20, |app| app.text("data.spouse.mobileNumber")),
        ColumnPlan::integer("children_count", |app| app.integer("data.numberOfChildren")),
        // suitability
        ColumnPlan::numeric("suit_score", |app| app.decimal("data.suitabilityTest.totalScore")),
        ColumnPlan::text("suit_risk_level", 20, |app| app.key("data.suitabilityTest.riskLevel")),
        ColumnPlan::date("suit_eval_date", |app| app.date("data.suitabilityTest.evaluatedDate")),
        ColumnPlan::text("fatca_flag", 1, |app| app.yes_no("data.fatca.isUsPerson")),
        ColumnPlan::text("pep_flag", 1, |app| app.yes_no("data.politicalPerson")),
        // investment
        ColumnPlan::text("invest_obj1", 30, |app| app.objective(0)),
        ColumnPlan::text("invest_obj2", 30, |app| app.objective(1)),
        ColumnPlan::text("invest_obj3", 30, |app| app.objective(2)),
        ColumnPlan::text("invest_obj4", 30, |app| app.objective(3)),
        ColumnPlan::text("invest_obj5", 30, |app| app.objective(4)),
        ColumnPlan::text("invest_obj6", 30, |app| app.objective(5)),
        ColumnPlan::text("invest_obj7", 30, |app| app.objective(6)),
        ColumnPlan::text("invest_obj8", 30, |app| app.objective(7)),
        ColumnPlan::text("invest_obj_other", 100, |app| app.text("data.investmentObjectiveOther")),
        ColumnPlan::integer("invest_experience", |app| app.integer("data.investmentExperience")),
        // redemption account
        ColumnPlan::text("bank_code", 3, |app| app.bank("bankCode")),
        ColumnPlan::text("bank_branch_code", 5, |app| app.bank("bankBranchCode")),
        ColumnPlan::text("bank_acc_type", 1, |app| app.bank_code("bankAccountType")),
        ColumnPlan::text("bank_acc_no", 20, |app| app.bank("bankAccountNo")),
        ColumnPlan::text("bank_acc_name", 150, |app| app.bank("bankAccountName")),
        // services
        ColumnPlan::text("receive_type", 20, |app| app.key("data.receiveType")),
        ColumnPlan::text("payment_type", 20, |app| app.key("data.paymentType")),
        ColumnPlan::text("service_type", 1, |app| app.code_or("data.serviceType", "N")),
        ColumnPlan::text("mkt_id", 20, |app| app.text("data.referralId")),
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
    ]);

    TablePlan::new(TABLE, columns)
});
