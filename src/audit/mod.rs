//! Login/logout audit trail, injected into [`crate::state::AppState`] so
//! handlers report authentication events without knowing where they go.

use tracing::info;

pub trait AuthAudit: Send + Sync {
    fn logged_in(&self, user_id: &str, username: &str);
    fn logged_out(&self, user_id: &str, username: &str);
}

/// Production observer: structured events under the `audit` target.
pub struct TracingAudit;

impl AuthAudit for TracingAudit {
    fn logged_in(&self, user_id: &str, username: &str) {
        info!(target: "audit", user_id, username, "user logged in");
    }

    fn logged_out(&self, user_id: &str, username: &str) {
        info!(target: "audit", user_id, username, "user logged out");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingAudit {
        events: Mutex<Vec<String>>,
    }

    impl AuthAudit for RecordingAudit {
        fn logged_in(&self, _user_id: &str, username: &str) {
            self.events.lock().unwrap().push(format!("login:{username}"));
        }

        fn logged_out(&self, _user_id: &str, username: &str) {
            self.events.lock().unwrap().push(format!("logout:{username}"));
        }
    }

    #[test]
    fn observer_sees_events_through_the_trait_object() {
        let audit = RecordingAudit::default();
        let observer: &dyn AuthAudit = &audit;
        observer.logged_in("64f0", "magnus");
        observer.logged_out("64f0", "magnus");
        assert_eq!(
            *audit.events.lock().unwrap(),
            vec!["login:magnus".to_string(), "logout:magnus".to_string()]
        );
    }
}
