use crate::identity::flow::{input_value, Aal, LoginFlow, GROUP_CODE};
use url::form_urlencoded;

/// True when the flow asks for a second factor: it requests AAL2 or
/// carries any node of the one-time code group.
pub fn is_second_factor_flow(flow: &LoginFlow) -> bool {
    flow.requested_aal == Some(Aal::Aal2) || flow.nodes().iter().any(|node| node.group == GROUP_CODE)
}

/// Where to send the browser for the one-time code step, if the flow needs one
pub fn second_factor_redirect(flow: &LoginFlow, otp_path: &str) -> Option<String> {
    if !is_second_factor_flow(flow) {
        return None;
    }
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("flow", &flow.id)
        .finish();
    Some(format!("{}?{}", otp_path, query))
}

/// Address the one-time code is sent to, or an empty string
pub fn second_factor_email(flow: &LoginFlow) -> String {
    input_value(flow, GROUP_CODE, "address")
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::flow::fixtures::{flow_with, input_node, login_flow};
    use crate::identity::flow::GROUP_DEFAULT;
    use serde_json::json;

    #[test]
    fn test_first_factor_flow() {
        let flow = login_flow();

        assert!(!is_second_factor_flow(&flow));
        assert!(second_factor_redirect(&flow, "/auth/otp").is_none());
        assert_eq!(second_factor_email(&flow), "");
    }

    #[test]
    fn test_aal2_flow_redirects() {
        let mut flow = flow_with(vec![input_node(GROUP_DEFAULT, "csrf_token", json!("t"))]);
        flow.requested_aal = Some(Aal::Aal2);
        flow.id = "a b&c".to_string();

        assert!(is_second_factor_flow(&flow));
        assert_eq!(
            second_factor_redirect(&flow, "/auth/otp").as_deref(),
            Some("/auth/otp?flow=a+b%26c")
        );
    }

    #[test]
    fn test_code_group_flow_exposes_email() {
        let flow = flow_with(vec![
            input_node(GROUP_DEFAULT, "csrf_token", json!("t")),
            input_node(GROUP_CODE, "address", json!("ken@example.com")),
        ]);

        assert!(is_second_factor_flow(&flow));
        assert_eq!(second_factor_email(&flow), "ken@example.com");
        assert_eq!(
            second_factor_redirect(&flow, "/auth/otp").as_deref(),
            Some("/auth/otp?flow=flow-1")
        );
    }
}
