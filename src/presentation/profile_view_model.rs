use std::sync::Mutex;

use anyhow::Result;
use chrono::NaiveTime;
use tokio::sync::watch;
use tokio::task::JoinSet;

use crate::models::Profile;
use crate::services::{GetProfileUseCase, SaveProfileUseCase};

/// State holder for the profile screen: live profile record, a mirror of
/// the reminder time, and the wholesale save operation.
///
/// Must be created inside a Tokio runtime.
pub struct ProfileViewModel {
    get_profile: GetProfileUseCase,
    save: SaveProfileUseCase,
    favorite_class_time: watch::Sender<String>,
    tasks: Mutex<JoinSet<()>>,
}

impl ProfileViewModel {
    pub fn new(get_profile: GetProfileUseCase, save: SaveProfileUseCase) -> Self {
        let initial = get_profile.call().borrow().favorite_class_time.clone();
        let (favorite_class_time, _) = watch::channel(initial);

        let view_model = Self {
            get_profile,
            save,
            favorite_class_time,
            tasks: Mutex::new(JoinSet::new()),
        };

        let mut profile_rx = view_model.get_profile.call();
        let mirror = view_model.favorite_class_time.clone();
        view_model.tasks.lock().unwrap().spawn(async move {
            loop {
                let time = profile_rx.borrow_and_update().favorite_class_time.clone();
                mirror.send_replace(time);
                if profile_rx.changed().await.is_err() {
                    break;
                }
            }
        });

        view_model
    }

    /// Live view of the stored profile.
    pub fn profile(&self) -> watch::Receiver<Profile> {
        self.get_profile.call()
    }

    /// Mirror of the profile's reminder time.
    pub fn favorite_class_time(&self) -> watch::Receiver<String> {
        self.favorite_class_time.subscribe()
    }

    /// Builds and persists the whole profile record; every field is
    /// replaced, there is no partial update.
    pub fn save_profile(
        &self,
        full_name: &str,
        avatar_uri: &str,
        resume_url: &str,
        position: &str,
        email: &str,
        favorite_class_time: &str,
    ) -> Result<()> {
        let profile = Profile {
            full_name: full_name.to_string(),
            avatar_uri: avatar_uri.to_string(),
            resume_url: resume_url.to_string(),
            position: position.to_string(),
            email: email.to_string(),
            favorite_class_time: favorite_class_time.to_string(),
            ..Profile::default()
        };
        self.save.call(&profile)
    }

    /// Accepts an empty string (no reminder) or a strict "HH:mm" time.
    pub fn validate_time_format(time: &str) -> bool {
        time.is_empty() || NaiveTime::parse_from_str(time, "%H:%M").is_ok()
    }
}
