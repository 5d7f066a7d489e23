//! Helpers around the identity provider's self-service login flow.

pub mod callback;
pub mod flow;
pub mod oidc;
pub mod second_factor;

pub use callback::{CallbackAction, OidcCallback};
pub use flow::{find_node, input_value, LoginFlow, NodeAttributes, NodeType, UiContainer, UiNode};
pub use oidc::{OidcLoginForm, SocialLogin};
pub use second_factor::{is_second_factor_flow, second_factor_email, second_factor_redirect};
