use std::cell::RefCell;
use studyhub_core::{
    AuthProvider, AuthService, AuthUser, SignInInput, SignInRequest, SignUpInput, SignUpRequest,
    StoreError, StoreResult,
};
use uuid::Uuid;

/// Auth double keeping accounts in memory.
#[derive(Default)]
struct FakeAuth {
    accounts: RefCell<Vec<(AuthUser, String)>>,
    calls: RefCell<usize>,
}

impl AuthProvider for FakeAuth {
    fn sign_up(&self, request: &SignUpRequest) -> StoreResult<AuthUser> {
        *self.calls.borrow_mut() += 1;
        let mut accounts = self.accounts.borrow_mut();
        if accounts.iter().any(|(user, _)| user.email == request.email) {
            return Err(StoreError::Conflict("User already registered".to_string()));
        }
        let user = AuthUser {
            id: Uuid::new_v4(),
            email: request.email.clone(),
            full_name: Some(request.full_name.clone()),
            is_admin: false,
        };
        accounts.push((user.clone(), request.password.clone()));
        Ok(user)
    }

    fn sign_in(&self, request: &SignInRequest) -> StoreResult<AuthUser> {
        *self.calls.borrow_mut() += 1;
        self.accounts
            .borrow()
            .iter()
            .find(|(user, password)| user.email == request.email && *password == request.password)
            .map(|(user, _)| user.clone())
            .ok_or_else(|| StoreError::Rejected("Invalid login credentials".to_string()))
    }
}

fn sign_up_input() -> SignUpInput {
    SignUpInput {
        full_name: " Katherine Johnson ".to_string(),
        email: " katherine@example.com".to_string(),
        password: "Orb1tal!".to_string(),
    }
}

#[test]
fn sign_up_then_sign_in_with_normalized_email() {
    let auth = FakeAuth::default();
    let service = AuthService::new(&auth);

    let created = service.sign_up(&sign_up_input()).unwrap();
    assert_eq!(created.record.email, "katherine@example.com");
    assert_eq!(created.record.full_name.as_deref(), Some("Katherine Johnson"));

    let signed_in = service
        .sign_in(&SignInInput {
            email: "katherine@example.com  ".to_string(),
            password: "Orb1tal!".to_string(),
        })
        .unwrap();
    assert_eq!(signed_in.record.id, created.record.id);
    assert_eq!(signed_in.notice.title, "Welcome back!");
}

#[test]
fn weak_password_is_rejected_locally() {
    let auth = FakeAuth::default();
    let service = AuthService::new(&auth);
    let mut input = sign_up_input();
    input.password = "password".to_string();

    let err = service.sign_up(&input).unwrap_err();
    assert_eq!(
        err.field_errors().unwrap().get("password"),
        Some("Password must contain at least one uppercase letter")
    );
    assert_eq!(*auth.calls.borrow(), 0);
}

#[test]
fn provider_failures_surface_as_store_errors() {
    let auth = FakeAuth::default();
    let service = AuthService::new(&auth);
    service.sign_up(&sign_up_input()).unwrap();

    let duplicate = service.sign_up(&sign_up_input()).unwrap_err();
    assert_eq!(duplicate.notice().description, "User already registered");

    let wrong = service
        .sign_in(&SignInInput {
            email: "katherine@example.com".to_string(),
            password: "Wrong1pass".to_string(),
        })
        .unwrap_err();
    assert_eq!(wrong.notice().description, "Invalid login credentials");
}
