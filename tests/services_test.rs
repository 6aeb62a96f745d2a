///! Service-level tests against SeaORM's `MockDatabase`.
///!
///! Each test queues the rows the service will read, in query order, and then
///! checks the outcome. No running Postgres is needed.
///!
///! Run with: `cargo test --test services_test`
use chrono::Utc;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};

use sunsu_backend::AppError;
use sunsu_backend::auth::Identity;
use sunsu_backend::models::Patch;
use sunsu_backend::models::matches::{self, MatchStatus};
use sunsu_backend::models::portfolio::{
    self, ConfirmedPriceStats, CreatePortfolio, PriceItemInput, UpdatePortfolio,
};
use sunsu_backend::models::quotations::{self, CreateQuotation, QuotationStatus, UpdateQuotation};
use sunsu_backend::models::reviews::{self as review_model, CreateReview, UpdateReview};
use sunsu_backend::models::{price_items, users};
use sunsu_backend::models::users::Role;
use sunsu_backend::services::{matches as match_service, portfolios, quotations as quotation_service, reviews};

const COUPLE: Identity = Identity { role: Role::Couple, id: 1 };
const PLANNER: Identity = Identity { role: Role::Planner, id: 2 };

fn chat(status: MatchStatus) -> matches::Model {
    matches::Model {
        id: 10,
        couple_id: COUPLE.id,
        planner_id: PLANNER.id,
        status,
        confirmed_price: 0,
        confirmed_at: None,
        created_at: Utc::now(),
    }
}

fn confirmed_chat(price: i64) -> matches::Model {
    matches::Model {
        status: MatchStatus::Confirmed,
        confirmed_price: price,
        confirmed_at: Some(Utc::now()),
        ..chat(MatchStatus::Unconfirmed)
    }
}

fn quotation(id: i64, price: i64, status: QuotationStatus) -> quotations::Model {
    quotations::Model {
        id,
        match_id: 10,
        title: "Studio".into(),
        price,
        company: "Photo Co".into(),
        description: "Full day".into(),
        status,
        modified_at: Utc::now(),
    }
}

fn planner_user() -> users::Model {
    users::Model {
        id: PLANNER.id,
        email: "planner@example.com".into(),
        name: "Planner Park".into(),
        role: Role::Planner,
        created_at: Utc::now(),
    }
}

fn planner_portfolio() -> portfolio::Model {
    portfolio::Model {
        id: 20,
        planner_id: PLANNER.id,
        title: "Classic weddings".into(),
        description: "Ten years of receptions".into(),
        location: "Seoul".into(),
        career: "Hotel coordinator".into(),
        partner_company: "Grand Hall".into(),
        total_price: 5000,
        contract_count: 0,
        avg_price: 0,
        min_price: 0,
        max_price: 0,
        created_at: Utc::now(),
    }
}

fn review(couple_id: i64) -> review_model::Model {
    review_model::Model {
        id: 5,
        couple_id,
        planner_id: PLANNER.id,
        match_id: Some(10),
        content: "Wonderful day".into(),
        created_at: Utc::now(),
        updated_at: None,
    }
}

fn item(item_title: &str, item_price: i64) -> PriceItemInput {
    PriceItemInput {
        item_title: item_title.into(),
        item_price,
    }
}

fn deleted(rows_affected: u64) -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected,
    }
}

/// Debug text of every logged statement that updates `table`.
fn updates_of(log: &str, table: &str) -> Vec<String> {
    log.split("Statement {")
        .filter(|stmt| stmt.contains("UPDATE") && stmt.contains(table))
        .map(str::to_string)
        .collect()
}

fn mock() -> MockDatabase {
    MockDatabase::new(DatabaseBackend::Postgres)
}

fn empty() -> DatabaseConnection {
    mock().into_connection()
}

#[tokio::test]
async fn test_confirm_all_stores_summed_price() {
    let db = mock()
        .append_query_results([vec![chat(MatchStatus::Unconfirmed)]])
        .append_query_results([vec![
            quotation(1, 500, QuotationStatus::Confirmed),
            quotation(2, 700, QuotationStatus::Confirmed),
        ]])
        // UPDATE ... RETURNING, then the planner's confirmed prices.
        .append_query_results([vec![confirmed_chat(1200)]])
        .append_query_results([vec![confirmed_chat(1200)]])
        // Planner has no portfolio yet.
        .append_query_results([Vec::<portfolio::Model>::new()])
        .into_connection();

    let confirmed = match_service::confirm_all(&db, COUPLE, 10).await.unwrap();
    assert_eq!(confirmed.status, MatchStatus::Confirmed);
    assert_eq!(confirmed.confirmed_price, 1200);

    let log = format!("{:?}", db.into_transaction_log());
    assert!(log.contains("UPDATE"));
    assert!(log.contains("1200"));
}

#[tokio::test]
async fn test_confirm_all_rejects_pending_quotations() {
    let db = mock()
        .append_query_results([vec![chat(MatchStatus::Unconfirmed)]])
        .append_query_results([vec![
            quotation(1, 500, QuotationStatus::Confirmed),
            quotation(2, 700, QuotationStatus::Pending),
        ]])
        .into_connection();

    let err = match_service::confirm_all(&db, PLANNER, 10).await.unwrap_err();
    match err {
        AppError::Validation(msg) => assert_eq!(msg, "Not all quotations have been confirmed"),
        other => panic!("expected validation error, got {other:?}"),
    }

    let log = format!("{:?}", db.into_transaction_log());
    assert!(!log.contains("UPDATE"));
}

#[tokio::test]
async fn test_confirm_all_refreshes_portfolio_statistics() {
    let earlier = matches::Model {
        id: 11,
        ..confirmed_chat(800)
    };
    let db = mock()
        .append_query_results([vec![chat(MatchStatus::Unconfirmed)]])
        .append_query_results([vec![
            quotation(1, 500, QuotationStatus::Confirmed),
            quotation(2, 700, QuotationStatus::Confirmed),
        ]])
        .append_query_results([vec![confirmed_chat(1200)]])
        .append_query_results([vec![confirmed_chat(1200), earlier]])
        .append_query_results([vec![planner_portfolio()]])
        .append_query_results([vec![portfolio::Model {
            contract_count: 2,
            avg_price: 1000,
            min_price: 800,
            max_price: 1200,
            ..planner_portfolio()
        }]])
        .into_connection();

    match_service::confirm_all(&db, COUPLE, 10).await.unwrap();

    let log = format!("{:?}", db.into_transaction_log());
    let portfolio_updates = updates_of(&log, "portfolios");
    assert_eq!(portfolio_updates.len(), 1);
    let stmt = &portfolio_updates[0];
    for column in ["contract_count", "avg_price", "min_price", "max_price"] {
        assert!(stmt.contains(column), "missing {column} in {stmt}");
    }
    for value in ["(2)", "(1000)", "(800)", "(1200)"] {
        assert!(stmt.contains(value), "missing {value} in {stmt}");
    }
}

#[tokio::test]
async fn test_confirm_all_without_quotations() {
    let db = mock()
        .append_query_results([vec![chat(MatchStatus::Unconfirmed)]])
        .append_query_results([Vec::<quotations::Model>::new()])
        .into_connection();

    let err = match_service::confirm_all(&db, COUPLE, 10).await.unwrap_err();
    match err {
        AppError::Validation(msg) => assert_eq!(msg, "There are no quotations to confirm"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_confirm_all_on_confirmed_match_is_unchanged() {
    let db = mock()
        .append_query_results([vec![confirmed_chat(900)]])
        .append_query_results([vec![quotation(1, 900, QuotationStatus::Confirmed)]])
        .into_connection();

    let result = match_service::confirm_all(&db, COUPLE, 10).await.unwrap();
    assert_eq!(result.confirmed_price, 900);

    let log = format!("{:?}", db.into_transaction_log());
    assert!(!log.contains("UPDATE"));
}

#[tokio::test]
async fn test_confirm_all_missing_match() {
    let db = mock()
        .append_query_results([Vec::<matches::Model>::new()])
        .into_connection();

    let err = match_service::confirm_all(&db, COUPLE, 99).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_outsider_cannot_confirm() {
    let db = mock()
        .append_query_results([vec![chat(MatchStatus::Unconfirmed)]])
        .into_connection();

    let outsider = Identity { role: Role::Couple, id: 3 };
    let err = match_service::confirm_all(&db, outsider, 10).await.unwrap_err();
    assert!(matches!(err, AppError::PermissionDenied(_)));
}

#[tokio::test]
async fn test_delete_chat_without_quotations() {
    let db = mock()
        .append_query_results([vec![chat(MatchStatus::Unconfirmed)]])
        .append_query_results([Vec::<quotations::Model>::new()])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    match_service::delete_chat(&db, COUPLE, 10).await.unwrap();
}

#[tokio::test]
async fn test_delete_unconfirmed_chat_with_quotations_is_blocked() {
    let db = mock()
        .append_query_results([vec![chat(MatchStatus::Unconfirmed)]])
        .append_query_results([vec![quotation(1, 500, QuotationStatus::Pending)]])
        .into_connection();

    let err = match_service::delete_chat(&db, PLANNER, 10).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_delete_confirmed_chat_with_quotations() {
    let db = mock()
        .append_query_results([vec![confirmed_chat(500)]])
        .append_query_results([vec![quotation(1, 500, QuotationStatus::Confirmed)]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    match_service::delete_chat(&db, COUPLE, 10).await.unwrap();
}

#[tokio::test]
async fn test_couple_cannot_add_quotation() {
    let input = CreateQuotation {
        title: "Dress".into(),
        price: 300,
        company: "Atelier".into(),
        description: String::new(),
    };

    let err = quotation_service::add_quotation(&empty(), COUPLE, 10, input)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::PermissionDenied(_)));
}

#[tokio::test]
async fn test_quotation_cannot_be_added_to_confirmed_match() {
    let db = mock()
        .append_query_results([vec![confirmed_chat(500)]])
        .into_connection();
    let input = CreateQuotation {
        title: "Dress".into(),
        price: 300,
        company: "Atelier".into(),
        description: String::new(),
    };

    let err = quotation_service::add_quotation(&db, PLANNER, 10, input)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_review_requires_confirmed_match() {
    let db = mock()
        .append_query_results([vec![chat(MatchStatus::Unconfirmed)]])
        .into_connection();
    let input = CreateReview {
        content: "Lovely".into(),
    };

    let err = reviews::add_review(&db, COUPLE, 10, input).await.unwrap_err();
    match err {
        AppError::Validation(msg) => assert_eq!(msg, "Not all quotations have been confirmed"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_planner_cannot_write_review() {
    let db = mock()
        .append_query_results([vec![confirmed_chat(500)]])
        .into_connection();
    let input = CreateReview {
        content: "Self praise".into(),
    };

    let err = reviews::add_review(&db, PLANNER, 10, input).await.unwrap_err();
    assert!(matches!(err, AppError::PermissionDenied(_)));
}

#[tokio::test]
async fn test_couple_cannot_delete_portfolio() {
    let err = portfolios::delete_portfolio(&empty(), COUPLE).await.unwrap_err();
    assert!(matches!(err, AppError::PermissionDenied(_)));
}

#[tokio::test]
async fn test_delete_missing_portfolio() {
    let db = mock()
        .append_query_results([Vec::<portfolio::Model>::new()])
        .into_connection();

    let err = portfolios::delete_portfolio(&db, PLANNER).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_second_portfolio_is_rejected() {
    let db = mock()
        .append_query_results([vec![planner_user()]])
        .append_query_results([vec![planner_portfolio()]])
        .into_connection();
    let input = CreatePortfolio {
        title: "Another one".into(),
        description: String::new(),
        location: "Busan".into(),
        career: String::new(),
        partner_company: String::new(),
        items: vec![item("Hall", 1000)],
        images: Vec::new(),
    };

    let err = portfolios::add_portfolio(&db, PLANNER, input).await.unwrap_err();
    match err {
        AppError::Validation(msg) => assert_eq!(msg, "A portfolio already exists for this planner"),
        other => panic!("expected validation error, got {other:?}"),
    }

    let log = format!("{:?}", db.into_transaction_log());
    assert!(!log.contains("INSERT"));
}

#[tokio::test]
async fn test_title_only_update_recomputes_total() {
    let updated = portfolio::Model {
        title: "Modern weddings".into(),
        total_price: 600,
        ..planner_portfolio()
    };
    let db = mock()
        .append_query_results([vec![planner_user()]])
        .append_query_results([vec![planner_portfolio()]])
        .append_query_results([vec![updated]])
        .append_query_results([vec![
            price_items::Model {
                id: 1,
                portfolio_id: 20,
                item_title: "Studio".into(),
                item_price: 200,
            },
            price_items::Model {
                id: 2,
                portfolio_id: 20,
                item_title: "Dress".into(),
                item_price: 400,
            },
        ]])
        .append_exec_results([deleted(3), deleted(2)])
        .into_connection();
    let input = UpdatePortfolio {
        title: Patch::Set("Modern weddings".into()),
        description: Patch::Unchanged,
        location: Patch::Unchanged,
        career: Patch::Unchanged,
        partner_company: Patch::Unchanged,
        items: vec![item("Studio", 200), item("Dress", 400)],
        images: Patch::Unchanged,
    };

    let result = portfolios::update_portfolio(&db, PLANNER, input).await.unwrap();
    assert_eq!(result.total_price, 600);
    assert_eq!(result.location, "Seoul");

    let log = format!("{:?}", db.into_transaction_log());
    let portfolio_updates = updates_of(&log, "portfolios");
    assert_eq!(portfolio_updates.len(), 1);
    let set_clause = portfolio_updates[0]
        .split("WHERE")
        .next()
        .unwrap_or_default();
    assert!(set_clause.contains("title"));
    assert!(set_clause.contains("total_price"));
    for untouched in ["description", "location", "career", "partner_company"] {
        assert!(!set_clause.contains(untouched), "{untouched} was rewritten");
    }
    assert!(portfolio_updates[0].contains("(600)"));
}

#[tokio::test]
async fn test_overflowing_portfolio_total_is_rejected() {
    let input = CreatePortfolio {
        title: "Overpriced".into(),
        description: String::new(),
        location: String::new(),
        career: String::new(),
        partner_company: String::new(),
        items: vec![item("Hall", i64::MAX), item("Dress", 1)],
        images: Vec::new(),
    };

    let err = portfolios::add_portfolio(&empty(), PLANNER, input).await.unwrap_err();
    match err {
        AppError::Validation(msg) => assert_eq!(msg, "price total out of range"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_negative_prices_are_rejected() {
    let input = CreateQuotation {
        title: "Refund".into(),
        price: -100,
        company: "Atelier".into(),
        description: String::new(),
    };
    let err = quotation_service::add_quotation(&empty(), PLANNER, 10, input)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let patch = UpdateQuotation {
        price: Patch::Set(-1),
        ..Default::default()
    };
    let err = quotation_service::update_quotation(&empty(), PLANNER, 1, patch)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let input = UpdatePortfolio {
        title: Patch::Unchanged,
        description: Patch::Unchanged,
        location: Patch::Unchanged,
        career: Patch::Unchanged,
        partner_company: Patch::Unchanged,
        items: vec![item("Hall", -5)],
        images: Patch::Unchanged,
    };
    let err = portfolios::update_portfolio(&empty(), PLANNER, input)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_other_couple_cannot_touch_review() {
    let other_couple = Identity { role: Role::Couple, id: 3 };

    let db = mock()
        .append_query_results([vec![review(COUPLE.id)]])
        .into_connection();
    let input = UpdateReview {
        content: "Edited by someone else".into(),
    };
    let err = reviews::update_review(&db, other_couple, 5, input).await.unwrap_err();
    assert!(matches!(err, AppError::PermissionDenied(_)));

    let db = mock()
        .append_query_results([vec![review(COUPLE.id)]])
        .into_connection();
    let err = reviews::delete_review(&db, other_couple, 5).await.unwrap_err();
    assert!(matches!(err, AppError::PermissionDenied(_)));

    let log = format!("{:?}", db.into_transaction_log());
    assert!(!log.contains("DELETE"));
}

#[tokio::test]
async fn test_missing_review() {
    let db = mock()
        .append_query_results([Vec::<review_model::Model>::new()])
        .into_connection();
    let input = UpdateReview {
        content: "Too late".into(),
    };
    match reviews::update_review(&db, COUPLE, 5, input).await.unwrap_err() {
        AppError::NotFound(msg) => assert_eq!(msg, "Review 5 has been deleted or does not exist"),
        other => panic!("expected not found, got {other:?}"),
    }

    let db = mock()
        .append_query_results([Vec::<review_model::Model>::new()])
        .into_connection();
    match reviews::delete_review(&db, COUPLE, 5).await.unwrap_err() {
        AppError::NotFound(msg) => assert_eq!(msg, "Review 5 has been deleted or does not exist"),
        other => panic!("expected not found, got {other:?}"),
    }
}

#[tokio::test]
async fn test_confirmed_quotation_is_frozen() {
    let db = mock()
        .append_query_results([vec![quotation(1, 500, QuotationStatus::Confirmed)]])
        .append_query_results([vec![chat(MatchStatus::Unconfirmed)]])
        .into_connection();
    let patch = UpdateQuotation {
        price: Patch::Set(900),
        ..Default::default()
    };
    let err = quotation_service::update_quotation(&db, PLANNER, 1, patch)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let db = mock()
        .append_query_results([vec![quotation(1, 500, QuotationStatus::Confirmed)]])
        .append_query_results([vec![chat(MatchStatus::Unconfirmed)]])
        .into_connection();
    let err = quotation_service::confirm_quotation(&db, PLANNER, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let log = format!("{:?}", db.into_transaction_log());
    assert!(!log.contains("UPDATE"));
}

#[tokio::test]
async fn test_quotation_totals_split_by_status() {
    let db = mock()
        .append_query_results([vec![chat(MatchStatus::Unconfirmed)]])
        .append_query_results([vec![
            quotation(1, 500, QuotationStatus::Confirmed),
            quotation(2, 700, QuotationStatus::Pending),
            quotation(3, 300, QuotationStatus::Confirmed),
        ]])
        .into_connection();

    let found = quotation_service::find_by_match(&db, COUPLE, 10).await.unwrap();
    assert_eq!(found.status, MatchStatus::Unconfirmed);
    assert_eq!(found.total_price, 1500);
    assert_eq!(found.confirmed_price, 800);
    assert_eq!(found.quotations.len(), 3);
}

#[tokio::test]
async fn test_update_confirmed_prices_needs_a_portfolio() {
    let db = mock()
        .append_query_results([Vec::<portfolio::Model>::new()])
        .into_connection();
    let stats = ConfirmedPriceStats {
        contract_count: 1,
        avg_price: 900,
        min_price: 900,
        max_price: 900,
    };

    let err = portfolios::update_confirmed_prices(&db, PLANNER.id, stats)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
