//! Sign-up / sign-in form controller.
//!
//! Session handling belongs to the hosted auth service; this controller only
//! guarantees that well-formed credentials are sent to it.

use crate::model::auth::{AuthUser, SignInInput, SignUpInput};
use crate::service::{field_list, FormError, Notice, Submitted};
use crate::store::AuthProvider;
use crate::validation::Validate;
use log::{info, warn};

pub struct AuthService<A: AuthProvider> {
    provider: A,
}

impl<A: AuthProvider> AuthService<A> {
    pub fn new(provider: A) -> Self {
        Self { provider }
    }

    pub fn sign_up(&self, input: &SignUpInput) -> Result<Submitted<AuthUser>, FormError> {
        let request = input.validate().map_err(|errors| {
            warn!(
                "event=auth_sign_up module=service status=rejected fields={}",
                field_list(&errors)
            );
            FormError::Invalid(errors)
        })?;

        let user = self.provider.sign_up(&request).map_err(|err| {
            warn!(
                "event=auth_sign_up module=service status=error error_code={}",
                err.code()
            );
            FormError::Store(err)
        })?;

        info!("event=auth_sign_up module=service status=ok user_id={}", user.id);
        Ok(Submitted {
            record: user,
            notice: Notice::success("Account created!", "You can now sign in."),
        })
    }

    pub fn sign_in(&self, input: &SignInInput) -> Result<Submitted<AuthUser>, FormError> {
        let request = input.validate().map_err(|errors| {
            warn!(
                "event=auth_sign_in module=service status=rejected fields={}",
                field_list(&errors)
            );
            FormError::Invalid(errors)
        })?;

        let user = self.provider.sign_in(&request).map_err(|err| {
            warn!(
                "event=auth_sign_in module=service status=error error_code={}",
                err.code()
            );
            FormError::Store(err)
        })?;

        info!("event=auth_sign_in module=service status=ok user_id={}", user.id);
        Ok(Submitted {
            record: user,
            notice: Notice::success("Welcome back!", "You have signed in successfully."),
        })
    }
}
