//! Two-step onboarding: profile details, then phone verification.
//!
//! There is no SMS gateway; verification accepts a fixed demo code.

use causerie_store::User;
use tracing::{info, warn};

use crate::error::{ClientError, Result};
use crate::state::AppState;

/// The only code the verification step accepts.
pub const DEMO_VERIFICATION_CODE: &str = "123456";

pub fn verify_code(code: &str) -> Result<()> {
    if code.trim() == DEMO_VERIFICATION_CODE {
        Ok(())
    } else {
        warn!("verification code rejected");
        Err(ClientError::InvalidVerificationCode)
    }
}

impl AppState {
    /// Verify `code`, then create the profile.  Nothing is stored when the
    /// code is wrong or the name is blank.
    pub async fn complete_onboarding(
        &self,
        name: &str,
        phone: &str,
        avatar_url: &str,
        code: &str,
    ) -> Result<User> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ClientError::InvalidInput("name must not be empty".into()));
        }
        verify_code(code)?;

        let user = self.create_profile(name, phone.trim(), avatar_url).await?;
        info!(name = %user.name, "onboarding complete");
        Ok(user)
    }
}
