use causerie_store::{RecordKey, StatusUpdate, User, JUST_NOW};
use tracing::{info, warn};

use crate::error::{ClientError, Result};
use crate::state::{AppState, Latency};

impl AppState {
    /// Create the local profile and seed contacts, threads and call log.
    ///
    /// Callers run this once, after onboarding.  An existing profile is
    /// overwritten (with a warning) rather than refused.
    pub async fn create_profile(&self, name: &str, phone: &str, avatar_url: &str) -> Result<User> {
        let _guard = self.locks.acquire_all().await;

        let user = User::new(name, phone, avatar_url);
        self.with_db(|db| {
            if db.load_record(RecordKey::User)?.is_some() {
                warn!("overwriting an existing profile");
            }
            db.create_profile(&user)
        })
        .await?;

        Ok(user)
    }

    /// The stored profile, or `None` before onboarding.
    pub async fn get_profile(&self) -> Result<Option<User>> {
        let _guard = self.locks.acquire(&[RecordKey::User]).await;
        self.with_db(|db| db.load_user()).await
    }

    /// Replace the profile wholesale and echo it back.
    pub async fn update_profile(&self, user: User) -> Result<User> {
        let _guard = self.locks.acquire(&[RecordKey::User]).await;
        self.simulate_latency(Latency::Normal).await;

        self.with_db(|db| db.save_user(&user)).await?;
        Ok(user)
    }

    /// Record the identity handed out by a remote sync handshake.
    pub async fn assign_server_identity(&self, server_id: &str) -> Result<User> {
        let user = self
            .modify_profile(Latency::Double, |user| {
                user.server_id = Some(server_id.to_string());
                Ok(())
            })
            .await?;

        info!(server_id = %server_id, "server identity assigned");
        Ok(user)
    }

    /// Post a new status photo on the user's own feed.
    pub async fn add_status_update(&self, image_url: &str) -> Result<User> {
        let id = self.next_id();
        self.modify_profile(Latency::Normal, |user| {
            user.status_updates.push(StatusUpdate {
                id,
                image_url: image_url.to_string(),
                timestamp: JUST_NOW.to_string(),
                viewed: false,
            });
            Ok(())
        })
        .await
    }

    /// Erase the profile and every other record.  Safe to repeat.
    pub async fn delete_account(&self) -> Result<()> {
        let _guard = self.locks.acquire_all().await;
        self.with_db(|db| db.erase_account()).await
    }

    /// Read-modify-write of the profile.  Fails with
    /// [`ClientError::ProfileMissing`] before onboarding, in which case
    /// nothing is written.
    pub(crate) async fn modify_profile(
        &self,
        latency: Latency,
        edit: impl FnOnce(&mut User) -> Result<()>,
    ) -> Result<User> {
        let _guard = self.locks.acquire(&[RecordKey::User]).await;
        self.simulate_latency(latency).await;

        let mut user = self
            .with_db(|db| db.load_user())
            .await?
            .ok_or(ClientError::ProfileMissing)?;

        edit(&mut user)?;

        self.with_db(|db| db.save_user(&user)).await?;
        Ok(user)
    }
}
