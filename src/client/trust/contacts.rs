//! Writing the trust lists into a character's in-game contacts.

use dioxus_logger::tracing;

use crate::{
    client::{
        error::ContactsError,
        presentation::{NoticeLevel, PresentationAdapter},
        registry::IdentityRegistry,
        remote::RemoteAuthority,
        trust::engine::ReconciliationEngine,
    },
    model::trust::ContactsDto,
};

impl<R, P, I> ReconciliationEngine<R, P, I>
where
    R: RemoteAuthority,
    P: PresentationAdapter,
    I: IdentityRegistry,
{
    /// Adds trusted entities to the character's contacts, then deletes untrusted ones.
    ///
    /// The two steps run in order and are not rolled back: if deleting fails after adding
    /// succeeded the contacts are left half written and [`ContactsError::PartiallyApplied`] is
    /// returned.
    pub async fn write_contacts(&self, character_id: i64) -> Result<(), ContactsError> {
        if character_id <= 0 {
            let error = ContactsError::InvalidCharacterId(character_id);
            tracing::warn!("{}", error);
            self.presentation().notify(NoticeLevel::Error, &error.to_string());
            return Err(error);
        }

        let request = ContactsDto { character_id };
        let _request = self.begin_request();

        tracing::debug!("Writing contacts for character ID {}", character_id);

        if let Err(e) = self.remote().add_contacts(&request).await {
            tracing::error!(
                "Failed to add contacts for character ID {}: {}",
                character_id,
                e
            );
            self.presentation()
                .notify(NoticeLevel::Error, &format!("Error writing contacts: {}", e));
            return Err(ContactsError::AddFailed(e));
        }

        if let Err(e) = self.remote().delete_contacts(&request).await {
            tracing::error!(
                "Contacts added for character ID {} but deleting untrusted contacts failed: {}",
                character_id,
                e
            );
            self.presentation()
                .notify(NoticeLevel::Error, &format!("Error writing contacts: {}", e));
            return Err(ContactsError::PartiallyApplied(e));
        }

        self.presentation()
            .notify(NoticeLevel::Success, "Contacts updated successfully.");

        Ok(())
    }
}
