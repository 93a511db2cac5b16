//! Contact form controller.

use crate::model::contact::{ContactInput, ContactRecord};
use crate::service::{field_list, FormError, Notice, Submitted};
use crate::store::ContactStore;
use crate::validation::Validate;
use log::{error, info, warn};

/// Validates and stores visitor contact messages.
pub struct ContactService<S: ContactStore> {
    store: S,
}

impl<S: ContactStore> ContactService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validates `input` and, only when every field passes, stores the
    /// trimmed message.
    pub fn submit(&self, input: &ContactInput) -> Result<Submitted<ContactRecord>, FormError> {
        let message = input.validate().map_err(|errors| {
            warn!(
                "event=contact_submit module=service status=rejected fields={}",
                field_list(&errors)
            );
            FormError::Invalid(errors)
        })?;

        let record = self.store.insert_contact(&message).map_err(|err| {
            error!(
                "event=contact_submit module=service status=error error_code={}",
                err.code()
            );
            FormError::Store(err)
        })?;

        info!(
            "event=contact_submit module=service status=ok id={}",
            record.id
        );
        Ok(Submitted {
            record,
            notice: Notice::success(
                "Message sent!",
                "We'll get back to you as soon as possible.",
            ),
        })
    }
}
