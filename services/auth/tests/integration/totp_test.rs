use std::sync::Arc;

use talentgate_auth::domain::types::RequestMetadata;
use talentgate_auth::error::AuthError;
use talentgate_auth::usecase::totp::{AdminLoginInput, AdminLoginUseCase, AdminTotp};

use crate::helpers::{
    MockSessionStore, MockUserStore, TEST_TOTP_SECRET, code_outside_current_window, test_admin,
    test_totp, test_user,
};

// ── AdminTotp ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_generate_rfc6238_reference_codes() {
    // SHA-1 test vectors from RFC 6238 appendix B, truncated to 6 digits.
    let totp = test_totp();
    assert_eq!(totp.generate_at(59), "287082");
    assert_eq!(totp.generate_at(1111111111), "050471");
    assert_eq!(totp.generate_at(1234567890), "005924");
}

#[tokio::test]
async fn should_accept_code_within_one_step_of_skew() {
    let totp = test_totp();
    let code = totp.generate_at(1111111111); // step covers 1111111110..=1111111139

    assert!(totp.verify_at(&code, 1111111111));
    assert!(totp.verify_at(&code, 1111111109), "previous step");
    assert!(totp.verify_at(&code, 1111111140), "next step");
}

#[tokio::test]
async fn should_reject_code_outside_skew_window() {
    let totp = test_totp();
    let code = totp.generate_at(1111111111);

    assert!(!totp.verify_at(&code, 1111111171), "two steps ahead");
    assert!(!totp.verify_at(&code, 1111111050), "two steps behind");
}

#[tokio::test]
async fn should_reject_malformed_codes_without_checking() {
    let totp = test_totp();

    assert!(!totp.is_well_formed("05047"));
    assert!(!totp.is_well_formed("0504711"));
    assert!(!totp.is_well_formed("05047a"));
    assert!(!totp.is_well_formed(""));
    assert!(totp.is_well_formed("050471"));

    assert!(!totp.verify_at("05047a", 1111111111));
    assert!(!totp.verify_at("", 1111111111));
}

#[tokio::test]
async fn should_expose_digit_count() {
    assert_eq!(test_totp().digits(), 6);
}

#[tokio::test]
async fn should_build_provisioning_url_for_enrollment() {
    let url = test_totp().provisioning_url();

    assert!(url.starts_with("otpauth://totp/"), "got {url}");
    assert!(url.contains("secret="));
    assert!(url.contains("Talentgate"));
}

#[tokio::test]
async fn should_fail_to_build_verifier_from_invalid_secret() {
    // Not base32.
    assert!(AdminTotp::new("not-a-base32-secret!", 6, 30, "Talentgate", "admin").is_err());
    // Decodes to 5 bytes, below the RFC 4226 minimum of 128 bits.
    assert!(AdminTotp::new("GEZDGNBV", 6, 30, "Talentgate", "admin").is_err());
}

#[tokio::test]
async fn should_fail_to_build_verifier_with_out_of_range_digits() {
    assert!(AdminTotp::new(TEST_TOTP_SECRET, 4, 30, "Talentgate", "admin").is_err());
    assert!(AdminTotp::new(TEST_TOTP_SECRET, 9, 30, "Talentgate", "admin").is_err());
}

// ── AdminLoginUseCase ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_log_in_admin_with_current_code() {
    let admin = test_admin();

    let session_store = MockSessionStore::empty();
    let sessions_handle = session_store.sessions_handle();
    let totp = Arc::new(test_totp());
    let code = totp.generate();

    let uc = AdminLoginUseCase {
        users: MockUserStore::new(vec![admin.clone()]),
        sessions: session_store,
        totp,
    };

    let output = uc
        .execute(AdminLoginInput {
            email: admin.email.clone(),
            code,
            metadata: RequestMetadata::default(),
        })
        .await
        .unwrap();

    assert_eq!(output.user.id, admin.id);
    assert_eq!(output.session.user_id, admin.id);

    let sessions = sessions_handle.lock().unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].token, output.session.token);
}

#[tokio::test]
async fn should_return_unauthorized_for_wrong_admin_code() {
    let admin = test_admin();

    let session_store = MockSessionStore::empty();
    let sessions_handle = session_store.sessions_handle();
    let totp = Arc::new(test_totp());
    let wrong = code_outside_current_window(&totp);

    let uc = AdminLoginUseCase {
        users: MockUserStore::new(vec![admin.clone()]),
        sessions: session_store,
        totp,
    };

    let result = uc
        .execute(AdminLoginInput {
            email: admin.email.clone(),
            code: wrong,
            metadata: RequestMetadata::default(),
        })
        .await;

    assert!(
        matches!(result, Err(AuthError::Unauthorized)),
        "expected Unauthorized, got {result:?}"
    );
    assert!(sessions_handle.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_malformed_admin_code_before_any_lookup() {
    // Empty stores: the format check must run before the user lookup.
    let uc = AdminLoginUseCase {
        users: MockUserStore::empty(),
        sessions: MockSessionStore::empty(),
        totp: Arc::new(test_totp()),
    };

    let result = uc
        .execute(AdminLoginInput {
            email: "admin@example.com".to_owned(),
            code: "12ab".to_owned(),
            metadata: RequestMetadata::default(),
        })
        .await;

    assert!(
        matches!(result, Err(AuthError::Validation(_))),
        "expected Validation, got {result:?}"
    );
}

#[tokio::test]
async fn should_return_not_found_when_admin_login_user_is_not_admin() {
    let user = test_user(); // candidate

    let totp = Arc::new(test_totp());
    let code = totp.generate();

    let uc = AdminLoginUseCase {
        users: MockUserStore::new(vec![user.clone()]),
        sessions: MockSessionStore::empty(),
        totp,
    };

    let result = uc
        .execute(AdminLoginInput {
            email: user.email.clone(),
            code,
            metadata: RequestMetadata::default(),
        })
        .await;

    // A valid code must not leak which accounts are admins.
    assert!(
        matches!(result, Err(AuthError::NotFound)),
        "expected NotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_return_not_found_when_admin_login_email_unknown() {
    let totp = Arc::new(test_totp());
    let code = totp.generate();

    let uc = AdminLoginUseCase {
        users: MockUserStore::empty(),
        sessions: MockSessionStore::empty(),
        totp,
    };

    let result = uc
        .execute(AdminLoginInput {
            email: "nobody@example.com".to_owned(),
            code,
            metadata: RequestMetadata::default(),
        })
        .await;

    assert!(
        matches!(result, Err(AuthError::NotFound)),
        "expected NotFound, got {result:?}"
    );
}
