//! Unit tests for JWT claims.

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::auth::Claims;

#[test]
fn test_claims_new_sets_correct_fields() {
    let user_id = Uuid::new_v4();
    let expires_at = Utc::now() + Duration::hours(1);

    let claims = Claims::new(user_id, "desk@institute.test", "reception", expires_at);

    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.user_id(), user_id);
    assert_eq!(claims.email, "desk@institute.test");
    assert_eq!(claims.role, "reception");
    assert!(claims.iat <= Utc::now().timestamp());
    assert_eq!(claims.exp, expires_at.timestamp());
}

#[test]
fn test_claims_with_each_role() {
    let expires_at = Utc::now() + Duration::hours(1);

    for role in ["admin", "reception", "student"] {
        let claims = Claims::new(Uuid::new_v4(), "a@b.test", role, expires_at);
        assert_eq!(claims.role, role);
    }
}
