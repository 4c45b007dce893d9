mod common;

use axum::http::{Method, StatusCode};
use common::{RecordingMailer, TestApp};
use regex::Regex;
use serde_json::json;

fn last_code(app: &TestApp) -> String {
    let re = Regex::new(r#"class="highlight">(\d{6})<"#).unwrap();
    let sent = app.mailer.messages();
    let html = &sent.last().expect("an OTP email").html;
    re.captures(html).expect("code in email")[1].to_string()
}

#[tokio::test]
async fn send_otp_validates_email_and_user() {
    let app = TestApp::new().await;

    let (status, body) = app.call(Method::POST, "/otp/sendOtp", Some(json!({})), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Email is required");

    let (status, body) = app.call(Method::POST, "/otp/sendOtp", Some(json!({ "email": "nobody@example.com" })), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "User not found");
}

#[tokio::test]
async fn reset_password_with_emailed_code() {
    let app = TestApp::new().await;
    app.signup("user", "asha@example.com", "old-pass").await;

    let (status, body) = app.call(Method::POST, "/otp/sendOtp", Some(json!({ "email": "asha@example.com" })), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "OTP sent successfully");
    assert_eq!(app.mailer.messages().last().unwrap().subject, "Password Reset - WorkWave");
    let code = last_code(&app);

    let wrong = if code == "123456" { "654321" } else { "123456" };
    let (status, body) = app.call(
        Method::POST,
        "/otp/verify",
        Some(json!({ "getotp": wrong, "email": "asha@example.com", "newPassword": "new-pass", "confirmPassword": "new-pass" })),
        None,
    ).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Invalid OTP");

    // The code survives a mismatch.
    let (status, body) = app.call(
        Method::POST,
        "/otp/verify",
        Some(json!({ "getotp": code, "email": "asha@example.com", "newPassword": "new-pass", "confirmPassword": "new-pass" })),
        None,
    ).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "Password Updated Successfully");
    assert_eq!(body["nextPage"], true);

    // Single use.
    let (status, body) = app.call(
        Method::POST,
        "/otp/verify",
        Some(json!({ "getotp": code, "email": "asha@example.com", "newPassword": "new-pass" })),
        None,
    ).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "No OTP found or expired");

    let (status, _) = app.call(
        Method::POST,
        "/user/login",
        Some(json!({ "email": "asha@example.com", "password": "new-pass" })),
        None,
    ).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn verify_checks_user_and_password_confirmation() {
    let app = TestApp::new().await;
    app.signup("user", "asha@example.com", "old-pass").await;

    let (status, body) = app.call(
        Method::POST,
        "/otp/verify",
        Some(json!({ "getotp": "123456", "email": "ghost@example.com", "newPassword": "new-pass" })),
        None,
    ).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "User Not Found");

    app.call(Method::POST, "/otp/sendOtp", Some(json!({ "email": "asha@example.com" })), None).await;
    let code = last_code(&app);
    let (status, _) = app.call(
        Method::POST,
        "/otp/verify",
        Some(json!({ "getotp": code, "email": "asha@example.com", "newPassword": "new-pass", "confirmPassword": "other" })),
        None,
    ).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn admin_codes_are_separate_from_user_codes() {
    let app = TestApp::new().await;
    app.signup("user", "same@example.com", "user-pass").await;
    app.signup("admin", "same@example.com", "admin-pass").await;

    app.call(Method::POST, "/otp/sendOtp", Some(json!({ "email": "same@example.com" })), None).await;
    let user_code = last_code(&app);

    let (status, body) = app.call(
        Method::POST,
        "/otp/verifyAdmin",
        Some(json!({ "getotp": user_code, "email": "same@example.com", "newPassword": "new-admin" })),
        None,
    ).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "No OTP found or expired");

    let (status, _) = app.call(Method::POST, "/otp/sendOtpAdmin", Some(json!({ "email": "same@example.com" })), None).await;
    assert_eq!(status, StatusCode::OK);
    let admin_code = last_code(&app);

    let (status, body) = app.call(
        Method::POST,
        "/otp/verifyAdmin",
        Some(json!({ "getotp": admin_code, "email": "same@example.com", "newPassword": "new-admin" })),
        None,
    ).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "Admin Password Updated Successfully");
}

#[tokio::test]
async fn mail_failure_is_reported() {
    let app = TestApp::with(RecordingMailer::failing(), Default::default()).await;
    app.signup("user", "asha@example.com", "old-pass").await;

    let (status, body) = app.call(Method::POST, "/otp/sendOtp", Some(json!({ "email": "asha@example.com" })), None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["msg"], "Failed to send email");
}

#[tokio::test]
async fn code_is_checked_before_passwords() {
    let app = TestApp::new().await;
    app.signup("user", "asha@example.com", "old-pass").await;

    let (status, body) = app.call(
        Method::POST,
        "/otp/verify",
        Some(json!({ "getotp": "123456", "email": "asha@example.com", "newPassword": "a", "confirmPassword": "b" })),
        None,
    ).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "No OTP found or expired");

    app.call(Method::POST, "/otp/sendOtp", Some(json!({ "email": "asha@example.com" })), None).await;
    let code = last_code(&app);

    // A confirmation mismatch leaves the code usable.
    let (status, body) = app.call(
        Method::POST,
        "/otp/verify",
        Some(json!({ "getotp": code, "email": "asha@example.com", "newPassword": "abcd", "confirmPassword": "abce" })),
        None,
    ).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Passwords do not match");

    // Resets take any password length.
    let (status, body) = app.call(
        Method::POST,
        "/otp/verify",
        Some(json!({ "getotp": code, "email": "asha@example.com", "newPassword": "abcd", "confirmPassword": "abcd" })),
        None,
    ).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "Password Updated Successfully");
}
