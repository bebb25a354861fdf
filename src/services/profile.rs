//! Member profile read and update.

use crate::errors::AppError;
use crate::models::user::Profile;
use crate::services::validation;
use crate::store::Store;

/// Stored profile for `email`, or a blank one seeded with what the identity
/// service knows.
pub async fn get(store: &Store, email: &str, display_name: Option<&str>) -> Profile {
    let catalog = store.read().await;
    catalog.profiles.get(email).cloned().unwrap_or_else(|| Profile {
        name: display_name.unwrap_or_default().to_string(),
        email: email.to_string(),
        ..Profile::default()
    })
}

/// Validate and store the profile under the member's identity email.
pub async fn update(store: &Store, email: &str, form: Profile) -> Result<Profile, AppError> {
    validation::validate_profile(&form).into_result()?;

    let profile = Profile {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        bio: form.bio,
        url: form.url.trim().to_string(),
        location: form.location.trim().to_string(),
    };
    let mut catalog = store.write().await;
    catalog.profiles.insert(email.to_string(), profile.clone());
    tracing::info!("Profile updated");
    Ok(profile)
}
