//! Authorization verdict display.

use serde::Serialize;

use netdash_core::{Authorization, Session};

use crate::cli::GlobalOpts;
use crate::output;

#[derive(Serialize)]
struct AuthView {
    caller: Option<String>,
    authorized: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    allow_list: Vec<String>,
}

impl AuthView {
    fn new(session: &Session) -> Self {
        let authorization = session.authorization();
        let reason = match authorization {
            Authorization::Granted { .. } => None,
            Authorization::Refused { .. } => Some("caller is not on the allow-list".into()),
            Authorization::Unresolved { reason } => Some(reason.clone()),
        };
        Self {
            caller: authorization.caller().map(|ip| ip.to_string()),
            authorized: authorization.is_granted(),
            reason,
            allow_list: session
                .config()
                .allow_list
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

fn detail(v: &AuthView) -> String {
    let mut lines = vec![
        format!("Caller:     {}", v.caller.as_deref().unwrap_or("(unresolved)")),
        format!("Authorized: {}", if v.authorized { "yes" } else { "no" }),
    ];
    if let Some(ref reason) = v.reason {
        lines.push(format!("Reason:     {reason}"));
    }
    let allow_list = if v.allow_list.is_empty() {
        "(empty)".to_owned()
    } else {
        v.allow_list.join(", ")
    };
    lines.push(format!("Allow-list: {allow_list}"));
    lines.join("\n")
}

pub fn handle(session: &Session, global: &GlobalOpts) {
    let view = AuthView::new(session);
    let out = output::render_single(&global.output, &view, detail, |v| v.authorized.to_string());
    output::print_output(&out, global.quiet);
}
