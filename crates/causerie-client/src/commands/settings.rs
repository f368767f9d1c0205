//! Profile settings screens: appearance, notifications, privacy, phone
//! number and status line.

use causerie_store::{PrivacySettings, User, DEFAULT_CHAT_BACKGROUND};

use crate::error::{ClientError, Result};
use crate::state::{AppState, Latency};

impl AppState {
    pub async fn set_dark_mode(&self, enabled: bool) -> Result<User> {
        self.modify_profile(Latency::Normal, |user| {
            user.appearance_settings.dark_mode = enabled;
            Ok(())
        })
        .await
    }

    /// Set (or with `None`, remove) the chat wallpaper.
    pub async fn set_chat_background(&self, background: Option<String>) -> Result<User> {
        self.modify_profile(Latency::Normal, |user| {
            user.appearance_settings.chat_background = background;
            Ok(())
        })
        .await
    }

    pub async fn reset_chat_background(&self) -> Result<User> {
        self.set_chat_background(Some(DEFAULT_CHAT_BACKGROUND.to_string()))
            .await
    }

    pub async fn set_notifications_enabled(&self, enabled: bool) -> Result<User> {
        self.modify_profile(Latency::Normal, |user| {
            user.notification_settings.enabled = enabled;
            Ok(())
        })
        .await
    }

    pub async fn update_privacy(&self, privacy: PrivacySettings) -> Result<User> {
        self.modify_profile(Latency::Normal, |user| {
            user.privacy_settings = privacy;
            Ok(())
        })
        .await
    }

    /// Store `"{dial_code} {number}"` as the profile phone.
    pub async fn change_phone(&self, dial_code: &str, number: &str) -> Result<User> {
        let number = number.trim();
        if number.is_empty() {
            return Err(ClientError::InvalidInput("phone number must not be empty".into()));
        }
        let phone = format!("{} {}", dial_code.trim(), number);

        self.modify_profile(Latency::Normal, |user| {
            user.phone = phone;
            Ok(())
        })
        .await
    }

    pub async fn set_status_line(&self, status: &str) -> Result<User> {
        self.modify_profile(Latency::Normal, |user| {
            user.status = status.to_string();
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::{onboarded_state, test_state};
    use causerie_store::Visibility;

    #[tokio::test]
    async fn appearance_settings() {
        let (state, _dir) = onboarded_state().await;

        let user = state.set_dark_mode(false).await.unwrap();
        assert!(!user.appearance_settings.dark_mode);

        let user = state.set_chat_background(Some("wall.jpg".into())).await.unwrap();
        assert_eq!(user.appearance_settings.chat_background.as_deref(), Some("wall.jpg"));

        let user = state.reset_chat_background().await.unwrap();
        assert_eq!(
            user.appearance_settings.chat_background.as_deref(),
            Some(DEFAULT_CHAT_BACKGROUND)
        );

        let user = state.set_chat_background(None).await.unwrap();
        assert!(user.appearance_settings.chat_background.is_none());
        assert!(!state.get_profile().await.unwrap().unwrap().appearance_settings.dark_mode);
    }

    #[tokio::test]
    async fn notifications_and_privacy() {
        let (state, _dir) = onboarded_state().await;

        state.set_notifications_enabled(false).await.unwrap();
        let privacy = PrivacySettings {
            read_receipts: false,
            last_seen: Visibility::Nobody,
            profile_photo: Visibility::MyContacts,
        };
        state.update_privacy(privacy.clone()).await.unwrap();

        let user = state.get_profile().await.unwrap().unwrap();
        assert!(!user.notification_settings.enabled);
        assert_eq!(user.privacy_settings, privacy);
    }

    #[tokio::test]
    async fn change_phone_joins_dial_code() {
        let (state, _dir) = onboarded_state().await;

        let user = state.change_phone("+33", " 6 12 34 56 78 ").await.unwrap();
        assert_eq!(user.phone, "+33 6 12 34 56 78");
    }

    #[tokio::test]
    async fn change_phone_rejects_empty_number() {
        let (state, _dir) = onboarded_state().await;

        let err = state.change_phone("+33", "   ").await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidInput(_)));
        assert_eq!(
            state.get_profile().await.unwrap().unwrap().phone,
            "+222 45 25 12 34"
        );
    }

    #[tokio::test]
    async fn status_line() {
        let (state, _dir) = onboarded_state().await;
        let user = state.set_status_line("At the gym").await.unwrap();
        assert_eq!(user.status, "At the gym");
    }

    #[tokio::test]
    async fn settings_need_a_profile() {
        let (state, _dir) = test_state();
        assert!(matches!(
            state.set_dark_mode(true).await.unwrap_err(),
            ClientError::ProfileMissing
        ));
    }
}
