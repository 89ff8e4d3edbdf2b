//! Process-wide application context, built once and handed to every screen

use uuid::Uuid;

use crate::{
    config::Config,
    models::{Role, Theme},
};

/// Identity of the signed-in user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub session_id: Uuid,
    pub user_name: String,
    pub role: Role,
}

impl Session {
    pub fn new(user_name: &str, role: Role) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            user_name: user_name.to_string(),
            role,
        }
    }

    /// "name (role)" as shown in the status bar
    pub fn label(&self) -> String {
        format!("{} ({})", self.user_name, self.role.as_str())
    }
}

/// Theme and session, injected instead of looked up
#[derive(Debug, Clone)]
pub struct AppContext {
    pub theme: Theme,
    pub session: Session,
}

impl AppContext {
    pub fn new(theme: Theme, session: Session) -> Self {
        Self { theme, session }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.theme, Session::new(&config.user_name, config.role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_from_config() {
        let mut config = Config::default();
        config.user_name = "Nurse Joy".to_string();
        config.role = Role::Nurse;
        config.theme = Theme::Light;

        let context = AppContext::from_config(&config);
        assert_eq!(context.theme, Theme::Light);
        assert_eq!(context.session.label(), "Nurse Joy (nurse)");

        let other = AppContext::from_config(&config);
        assert_ne!(context.session.session_id, other.session.session_id);
    }
}
