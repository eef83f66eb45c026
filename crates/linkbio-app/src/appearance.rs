//! Appearance workflow: theme, dark mode, font, layout, background and text
//! shadow changes against the profile's settings record.

use linkbio_core::prelude::*;
use linkbio_core::{AppearanceUpdate, ProfileSettings};

use crate::services::SettingsStore;

/// Validate and persist `update`, then apply it to the local copy.
///
/// Nothing changes locally when validation or the write fails.
pub async fn update_appearance<S>(
    store: &S,
    profile_id: &str,
    settings: &mut ProfileSettings,
    update: &AppearanceUpdate,
) -> Result<()>
where
    S: SettingsStore + Sync,
{
    update.validate()?;
    if update.is_empty() {
        return Ok(());
    }

    if let Err(e) = store.update_appearance(profile_id, update).await {
        error!("Failed to update appearance for profile {}: {}", profile_id, e);
        return Err(e);
    }

    settings.apply(update);
    info!("Updated appearance for profile {}", profile_id);
    Ok(())
}
