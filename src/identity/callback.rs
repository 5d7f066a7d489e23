use crate::config::IdentityConfig;
use crate::flight::SingleFlight;
use std::fmt;
use tracing::{debug, warn};

const OIDC_REGISTER: &str = "oidc-register";

/// What the OIDC callback page should do next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    /// Navigate to the given path
    Redirect(String),
    /// Start the account registration request
    Register,
    /// A registration is already running; render the spinner
    Wait,
}

/// Landing page after the identity provider redirects back.
///
/// The page may render several times while a registration request is
/// running; the owned single-flight guard makes sure only one request is
/// started.
#[derive(Debug, Clone)]
pub struct OidcCallback {
    config: IdentityConfig,
    flights: SingleFlight<&'static str>,
}

impl OidcCallback {
    pub fn new(config: IdentityConfig) -> Self {
        Self {
            config,
            flights: SingleFlight::new(),
        }
    }

    pub fn on_render(&mut self, has_access_token: bool) -> CallbackAction {
        if has_access_token {
            return CallbackAction::Redirect(self.config.profile_setup_path.clone());
        }
        if self.flights.try_begin(&OIDC_REGISTER) {
            debug!("starting OIDC registration");
            CallbackAction::Register
        } else {
            CallbackAction::Wait
        }
    }

    pub fn on_register_success(&mut self) {
        self.flights.finish(&OIDC_REGISTER);
    }

    pub fn on_register_failure(&mut self, error: &dyn fmt::Display) -> CallbackAction {
        warn!("OIDC register failed: {}", error);
        self.flights.finish(&OIDC_REGISTER);
        CallbackAction::Redirect(self.config.login_path.clone())
    }

    pub fn is_registering(&self) -> bool {
        self.flights.is_in_flight(&OIDC_REGISTER)
    }
}

impl Default for OidcCallback {
    fn default() -> Self {
        Self::new(IdentityConfig::default())
    }
}
