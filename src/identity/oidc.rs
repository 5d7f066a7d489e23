use crate::identity::flow::{input_value, LoginFlow, GROUP_DEFAULT, GROUP_OIDC};
use serde::Serialize;
use tracing::warn;

const DEFAULT_METHOD: &str = "POST";

/// Everything needed to post the social login form back to the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OidcLoginForm {
    pub action: String,
    pub method: String,
    pub provider: String,
    pub csrf_token: String,
}

impl OidcLoginForm {
    /// Hidden fields to submit, in order
    pub fn hidden_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("csrf_token", self.csrf_token.as_str()),
            ("provider", self.provider.as_str()),
        ]
    }
}

/// Social login state for the login page: enabled only when the flow
/// carries both the OIDC provider and the CSRF token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialLogin {
    form: Option<OidcLoginForm>,
}

impl SocialLogin {
    pub fn from_flow(flow: Option<&LoginFlow>) -> Self {
        Self {
            form: flow.and_then(oidc_login_form),
        }
    }

    pub fn can_login(&self) -> bool {
        self.form.is_some()
    }

    /// The form to submit, or `None` while the button is disabled
    pub fn submission(&self) -> Option<&OidcLoginForm> {
        if self.form.is_none() {
            warn!("Social login data not ready yet");
        }
        self.form.as_ref()
    }
}

fn oidc_login_form(flow: &LoginFlow) -> Option<OidcLoginForm> {
    if flow.ui.action.is_empty() {
        return None;
    }

    let provider = input_value(flow, GROUP_OIDC, "provider");
    let csrf_token = input_value(flow, GROUP_DEFAULT, "csrf_token");
    let (Some(provider), Some(csrf_token)) = (provider, csrf_token) else {
        warn!(
            "Missing OIDC provider or CSRF token node in flow {} ({} nodes)",
            flow.id,
            flow.nodes().len()
        );
        return None;
    };

    let method = if flow.ui.method.is_empty() {
        DEFAULT_METHOD.to_string()
    } else {
        flow.ui.method.to_uppercase()
    };

    Some(OidcLoginForm {
        action: flow.ui.action.clone(),
        method,
        provider: provider.to_string(),
        csrf_token: csrf_token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::flow::fixtures::{flow_with, input_node, login_flow};
    use serde_json::json;

    #[test]
    fn test_social_login_enabled() {
        let flow = login_flow();
        let login = SocialLogin::from_flow(Some(&flow));

        assert!(login.can_login());
        let form = login.submission().unwrap();
        assert_eq!(form.method, "POST");
        assert_eq!(form.provider, "facebook");
        assert_eq!(
            form.hidden_fields(),
            vec![("csrf_token", "csrf-abc123"), ("provider", "facebook")]
        );
    }

    #[test]
    fn test_missing_oidc_group_disables_login() {
        let flow = flow_with(vec![input_node("default", "csrf_token", json!("t"))]);
        let login = SocialLogin::from_flow(Some(&flow));

        assert!(!login.can_login());
        assert!(login.submission().is_none());
    }

    #[test]
    fn test_missing_csrf_disables_login() {
        let flow = flow_with(vec![input_node("oidc", "provider", json!("facebook"))]);

        assert!(!SocialLogin::from_flow(Some(&flow)).can_login());
    }

    #[test]
    fn test_non_string_values_disable_login() {
        let flow = flow_with(vec![
            input_node("default", "csrf_token", json!("t")),
            input_node("oidc", "provider", json!(42)),
        ]);

        assert!(!SocialLogin::from_flow(Some(&flow)).can_login());
    }

    #[test]
    fn test_no_flow_or_no_action_disables_login() {
        assert!(!SocialLogin::from_flow(None).can_login());

        let mut flow = login_flow();
        flow.ui.action.clear();
        assert!(!SocialLogin::from_flow(Some(&flow)).can_login());
    }

    #[test]
    fn test_empty_method_defaults_to_post() {
        let mut flow = login_flow();
        flow.ui.method.clear();

        let login = SocialLogin::from_flow(Some(&flow));
        assert_eq!(login.submission().unwrap().method, "POST");
    }
}
