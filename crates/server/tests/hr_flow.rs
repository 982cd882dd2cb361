mod support;

use std::str::FromStr;

use axum::http::StatusCode;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use support::{approved_company, build_app, create_sector, employee, login, send, ADMIN_EMAIL, ADMIN_PASSWORD};

// 2030-01-07 is a Monday
const MONDAY: &str = "2030-01-07";
const FRIDAY: &str = "2030-01-11";

fn amount(v: &Value) -> Decimal {
    v.as_str().and_then(|s| Decimal::from_str(s).ok()).unwrap_or_default()
}

#[tokio::test]
async fn test_leave_request_approval_flow() -> anyhow::Result<()> {
    let (app, _db) = build_app().await?;
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await?;
    let sector = create_sector(&app, &admin, "Manufacturing").await?;
    let boss = approved_company(&app, &admin, &sector, "Acme", "boss@acme.com").await?;
    let (_, worker) = employee(&app, &boss, "grace@acme.com").await?;

    let leave = json!({"leave_type": "annual", "description": "Ski trip", "start_date": MONDAY, "end_date": FRIDAY});
    let (status, body) = send(&app, "POST", "/leaves", Some(&worker), Some(leave)).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["number_of_days"], 5);
    assert_eq!(body["data"]["status"], "passive");
    assert_eq!(body["data"]["personal_name"], "Grace Hopper");
    let leave_id = body["data"]["id"].as_str().unwrap().to_string();

    // Still pending, so the employee may edit it
    let edit = json!({"leave_type": "annual", "start_date": MONDAY, "end_date": "2030-01-09"});
    let (status, body) = send(&app, "PUT", &format!("/leaves/{leave_id}"), Some(&worker), Some(edit)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["number_of_days"], 3);
    assert_eq!(body["data"]["status"], "passive");

    let (_, requests) = send(&app, "GET", "/company/leave-requests", Some(&boss), None).await?;
    assert_eq!(requests.as_array().unwrap().len(), 1);

    let (status, body) = send(&app, "POST", &format!("/company/leaves/{leave_id}/approve"), Some(&boss), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "active");
    assert_eq!(body["data"]["director_name"], "Ada Lovelace");

    let (_, requests) = send(&app, "GET", "/company/leave-requests", Some(&boss), None).await?;
    assert!(requests.as_array().unwrap().is_empty());
    let (_, approved) = send(&app, "GET", "/company/leaves", Some(&boss), None).await?;
    assert_eq!(approved.as_array().unwrap().len(), 1);

    // Answered requests are frozen
    let edit = json!({"leave_type": "sick", "start_date": MONDAY, "end_date": FRIDAY});
    let (status, _) = send(&app, "PUT", &format!("/leaves/{leave_id}"), Some(&worker), Some(edit)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // A rejected request stays visible to its owner
    let weekend = json!({"leave_type": "unpaid", "start_date": "2030-01-12", "end_date": "2030-01-13"});
    let (status, _) = send(&app, "POST", "/leaves", Some(&worker), Some(weekend)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let second = json!({"leave_type": "unpaid", "start_date": "2030-02-04", "end_date": "2030-02-04"});
    let (_, body) = send(&app, "POST", "/leaves", Some(&worker), Some(second)).await?;
    let second_id = body["data"]["id"].as_str().unwrap().to_string();
    let (status, _) = send(&app, "POST", &format!("/company/leaves/{second_id}/reject"), Some(&boss), None).await?;
    assert_eq!(status, StatusCode::OK);
    let (_, mine) = send(&app, "GET", &format!("/leaves/{second_id}"), Some(&worker), None).await?;
    assert_eq!(mine["status"], "deleted");
    let (_, all_mine) = send(&app, "GET", "/leaves", Some(&worker), None).await?;
    assert_eq!(all_mine.as_array().unwrap().len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_cash_advance_flow() -> anyhow::Result<()> {
    let (app, _db) = build_app().await?;
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await?;
    let sector = create_sector(&app, &admin, "Logistics").await?;
    let boss = approved_company(&app, &admin, &sector, "Umbrella", "boss@umbrella.com").await?;
    let (_, worker) = employee(&app, &boss, "chris@umbrella.com").await?;

    let (status, _) = send(&app, "POST", "/cash-advances", Some(&worker), Some(json!({"description": "Rent", "requested_amount": "0"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let request = json!({"description": "Laptop repair", "requested_amount": "1500.00", "final_date_request": "2030-03-01"});
    let (status, body) = send(&app, "POST", "/cash-advances", Some(&worker), Some(request)).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["is_payment_processed"], "pending");
    assert_eq!(amount(&body["data"]["requested_amount"]), Decimal::from_str("1500")?);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (_, queue) = send(&app, "GET", "/company/cash-advance-requests", Some(&boss), None).await?;
    assert_eq!(queue.as_array().unwrap().len(), 1);

    // Paying before approval is refused
    let (status, _) = send(&app, "POST", &format!("/company/cash-advances/{id}/pay"), Some(&boss), None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let too_much = json!({"approved_amount": "2000.00"});
    let (status, _) = send(&app, "POST", &format!("/company/cash-advances/{id}/approve"), Some(&boss), Some(too_much)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let partial = json!({"approved_amount": "1200.50"});
    let (status, body) = send(&app, "POST", &format!("/company/cash-advances/{id}/approve"), Some(&boss), Some(partial)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_payment_processed"], "approved");
    assert_eq!(amount(&body["data"]["approved_amount"]), Decimal::from_str("1200.5")?);

    let (status, body) = send(&app, "POST", &format!("/company/cash-advances/{id}/pay"), Some(&boss), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_payment_processed"], "paid");

    let (_, approved) = send(&app, "GET", "/company/cash-advances", Some(&boss), None).await?;
    assert_eq!(approved.as_array().unwrap().len(), 1);

    // Withdrawn requests vanish for the owner
    let (_, body) = send(&app, "POST", "/cash-advances", Some(&worker), Some(json!({"description": "Course fee", "requested_amount": "300"}))).await?;
    let second = body["data"]["id"].as_str().unwrap().to_string();
    let (status, _) = send(&app, "DELETE", &format!("/cash-advances/{second}"), Some(&worker), None).await?;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "GET", &format!("/cash-advances/{second}"), Some(&worker), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, mine) = send(&app, "GET", "/cash-advances", Some(&worker), None).await?;
    assert_eq!(mine.as_array().unwrap().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_records_scoped_to_company_and_owner() -> anyhow::Result<()> {
    let (app, _db) = build_app().await?;
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await?;
    let sector = create_sector(&app, &admin, "Healthcare").await?;
    let boss_a = approved_company(&app, &admin, &sector, "Alpha", "boss@alpha.com").await?;
    let boss_b = approved_company(&app, &admin, &sector, "Beta", "boss@beta.com").await?;
    let (worker_a_id, worker_a) = employee(&app, &boss_a, "ann@alpha.com").await?;
    let (_, worker_b) = employee(&app, &boss_b, "bob@beta.com").await?;

    let leave = json!({"leave_type": "sick", "start_date": MONDAY, "end_date": MONDAY});
    let (_, body) = send(&app, "POST", "/leaves", Some(&worker_a), Some(leave)).await?;
    let leave_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = send(&app, "POST", &format!("/company/leaves/{leave_id}/approve"), Some(&boss_b), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "GET", &format!("/leaves/{leave_id}"), Some(&worker_b), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "DELETE", &format!("/leaves/{leave_id}"), Some(&worker_b), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "DELETE", &format!("/company/employees/{worker_a_id}"), Some(&boss_b), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, staff_b) = send(&app, "GET", "/company/employees", Some(&boss_b), None).await?;
    let names: Vec<&str> = staff_b.as_array().unwrap().iter().filter_map(|u| u["user_name"].as_str()).collect();
    assert_eq!(names.len(), 2);
    assert!(!names.contains(&"ann@alpha.com"));

    // Employees cannot reach company screens
    let (status, _) = send(&app, "GET", "/company/leave-requests", Some(&worker_a), None).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, "DELETE", &format!("/company/employees/{worker_a_id}"), Some(&boss_a), None).await?;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "POST", "/auth/login", None, Some(json!({"user_name": "ann@alpha.com", "password": "Employee123"}))).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn test_profile_and_company_updates() -> anyhow::Result<()> {
    let (app, _db) = build_app().await?;
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await?;
    let sector = create_sector(&app, &admin, "Education").await?;
    let other_sector = create_sector(&app, &admin, "Construction").await?;
    let boss = approved_company(&app, &admin, &sector, "Hooli", "gavin@hooli.com").await?;
    let (worker_id, worker) = employee(&app, &boss, "richard@hooli.com").await?;

    let (status, mut profile) = send(&app, "GET", "/profile", Some(&worker), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["id"], worker_id.as_str());
    assert!(profile.get("password").is_none());

    profile["title"] = json!("Lead Engineer");
    profile["birth_date"] = json!("1990-05-17");
    profile["password"] = json!("NewSecret99");
    let (status, body) = send(&app, "PUT", "/profile", Some(&worker), Some(profile)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "modified");
    assert_eq!(body["data"]["title"], "Lead Engineer");
    login(&app, "richard@hooli.com", "NewSecret99").await?;

    let (_, mut company) = send(&app, "GET", "/company", Some(&boss), None).await?;
    assert_eq!(company["name"], "Hooli");
    company["sector_id"] = json!(other_sector);
    company["number_of_employees"] = json!(250);
    let (status, body) = send(&app, "PUT", "/company", Some(&boss), Some(company.clone())).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["sector_name"], "Construction");
    assert_eq!(body["data"]["status"], "modified");

    company["number_of_employees"] = json!(-1);
    let (status, _) = send(&app, "PUT", "/company", Some(&boss), Some(company)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_admin_sector_and_company_management() -> anyhow::Result<()> {
    let (app, _db) = build_app().await?;
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await?;
    let sector = create_sector(&app, &admin, "Retail").await?;

    let (status, _) = send(&app, "POST", "/admin/sectors", Some(&admin), Some(json!({"name": "Retail"}))).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    let (status, body) = send(&app, "PUT", &format!("/admin/sectors/{sector}"), Some(&admin), Some(json!({"name": "Retail & Wholesale"}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Sector updated");

    let boss = approved_company(&app, &admin, &sector, "Vandelay", "art@vandelay.com").await?;
    let (status, _) = send(&app, "POST", "/admin/sectors", Some(&boss), Some(json!({"name": "Imports"}))).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    employee(&app, &boss, "george@vandelay.com").await?;

    let (_, users) = send(&app, "GET", "/admin/users?page=1&per_page=2", Some(&admin), None).await?;
    assert_eq!(users.as_array().unwrap().len(), 2);
    let (_, users) = send(&app, "GET", "/admin/users", Some(&admin), None).await?;
    assert_eq!(users.as_array().unwrap().len(), 3);

    let (_, companies) = send(&app, "GET", "/admin/companies?per_page=10", Some(&admin), None).await?;
    let company_id = companies[0]["id"].as_str().unwrap().to_string();
    let (status, _) = send(&app, "DELETE", &format!("/admin/companies/{company_id}"), Some(&admin), None).await?;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "DELETE", &format!("/admin/companies/{company_id}"), Some(&admin), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Staff of a deleted company can no longer sign in
    let (status, _) = send(&app, "POST", "/auth/login", None, Some(json!({"user_name": "george@vandelay.com", "password": "Employee123"}))).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (_, users) = send(&app, "GET", "/admin/users", Some(&admin), None).await?;
    assert_eq!(users.as_array().unwrap().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_deleted_accounts_lose_their_sessions() -> anyhow::Result<()> {
    let (app, _db) = build_app().await?;
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await?;
    let sector = create_sector(&app, &admin, "Finance").await?;
    let boss = approved_company(&app, &admin, &sector, "Initech", "bill@initech.com").await?;
    let (worker_id, worker) = employee(&app, &boss, "peter@initech.com").await?;

    let leave = json!({"leave_type": "annual", "start_date": MONDAY, "end_date": FRIDAY});
    let (_, body) = send(&app, "POST", "/leaves", Some(&worker), Some(leave.clone())).await?;
    let leave_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = send(&app, "DELETE", &format!("/company/employees/{worker_id}"), Some(&boss), None).await?;
    assert_eq!(status, StatusCode::OK);

    // The token is still well-formed, but its account is gone
    let (status, _) = send(&app, "PUT", &format!("/leaves/{leave_id}"), Some(&worker), Some(leave)).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = send(&app, "GET", "/leaves", Some(&worker), None).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, company) = send(&app, "GET", "/company", Some(&boss), None).await?;
    let company_id = company["id"].as_str().unwrap().to_string();
    let (status, _) = send(&app, "DELETE", &format!("/admin/companies/{company_id}"), Some(&admin), None).await?;
    assert_eq!(status, StatusCode::OK);

    let hire = json!({"email": "milton@initech.com", "name": "Milton", "surname": "Waddams", "password": "Stapler123"});
    let (status, _) = send(&app, "POST", "/company/employees", Some(&boss), Some(hire)).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = send(&app, "POST", "/auth/login", None, Some(json!({"user_name": "milton@initech.com", "password": "Stapler123"}))).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // The site administrator cannot lock themselves out
    let (_, me) = send(&app, "GET", "/auth/me", Some(&admin), None).await?;
    let admin_id = me["id"].as_str().unwrap().to_string();
    let (status, _) = send(&app, "DELETE", &format!("/admin/users/{admin_id}"), Some(&admin), None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, "GET", "/admin/users", Some(&admin), None).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn test_leave_input_limits_and_withdrawal() -> anyhow::Result<()> {
    let (app, _db) = build_app().await?;
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await?;
    let sector = create_sector(&app, &admin, "Retail").await?;
    let boss = approved_company(&app, &admin, &sector, "Kwik", "apu@kwik.com").await?;
    let (_, worker) = employee(&app, &boss, "sanjay@kwik.com").await?;

    let long = "x".repeat(5000);
    let (status, _) = send(&app, "POST", "/leaves", Some(&worker), Some(json!({"leave_type": "annual", "description": long, "start_date": MONDAY, "end_date": FRIDAY}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "POST", "/leaves", Some(&worker), Some(json!({"leave_type": "annual", "description": "Trip", "start_date": MONDAY, "end_date": FRIDAY}))).await?;
    assert_eq!(status, StatusCode::CREATED);
    let leave_id = body["data"]["id"].as_str().unwrap().to_string();

    let edit = json!({"leave_type": "annual", "description": long, "start_date": MONDAY, "end_date": FRIDAY});
    let (status, _) = send(&app, "PUT", &format!("/leaves/{leave_id}"), Some(&worker), Some(edit)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (_, mine) = send(&app, "GET", &format!("/leaves/{leave_id}"), Some(&worker), None).await?;
    assert_eq!(mine["description"], "Trip");

    // Periods longer than a year are refused
    let (status, _) = send(&app, "POST", "/leaves", Some(&worker), Some(json!({"leave_type": "unpaid", "start_date": MONDAY, "end_date": "2032-01-07"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let edit = json!({"leave_type": "annual", "start_date": MONDAY, "end_date": "2032-01-07"});
    let (status, _) = send(&app, "PUT", &format!("/leaves/{leave_id}"), Some(&worker), Some(edit)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Approved records cannot be withdrawn by their owner
    let (status, _) = send(&app, "POST", &format!("/company/leaves/{leave_id}/approve"), Some(&boss), None).await?;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "DELETE", &format!("/leaves/{leave_id}"), Some(&worker), None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (_, approved) = send(&app, "GET", "/company/leaves", Some(&boss), None).await?;
    assert_eq!(approved.as_array().unwrap().len(), 1);

    let (_, body) = send(&app, "POST", "/cash-advances", Some(&worker), Some(json!({"description": "Uniform", "requested_amount": "80"}))).await?;
    let advance_id = body["data"]["id"].as_str().unwrap().to_string();
    let (status, _) = send(&app, "POST", &format!("/company/cash-advances/{advance_id}/approve"), Some(&boss), Some(json!({}))).await?;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "DELETE", &format!("/cash-advances/{advance_id}"), Some(&worker), None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (_, all) = send(&app, "GET", "/company/cash-advances", Some(&boss), None).await?;
    assert_eq!(all.as_array().unwrap().len(), 1);
    Ok(())
}
