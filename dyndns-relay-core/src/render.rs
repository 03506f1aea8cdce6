//! Rule template rendering.
//!
//! Rule argument and command strings are administrator-supplied MiniJinja
//! templates. This module is the only place they are evaluated, and the
//! output is always a plain data string; what that string is used for
//! (URL, command line, argument) is decided by the dispatcher, never here.
//!
//! Templates see exactly three namespaces:
//! - `req`  — the inbound request fields
//! - `host` — the just-updated host record
//! - `rule` — the rule being rendered
//!
//! Absent optional fields render as empty strings.

use minijinja::Environment;
use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::types::{Host, UpdateRequest, UpdateRule};

/// Template view of the inbound request.
#[derive(Serialize)]
struct ReqView<'a> {
    token: &'a str,
    domain: &'a str,
    ipaddr: &'a str,
    ip6addr: &'a str,
    ip6lanprefix: &'a str,
    ether: &'a str,
}

/// Template view of the host record.
#[derive(Serialize)]
struct HostView<'a> {
    token: &'a str,
    name: &'a str,
    domain: &'a str,
    zone: &'a str,
    ip4addr: &'a str,
    ip6addr: &'a str,
}

/// Template view of the current rule.
#[derive(Serialize)]
struct RuleView<'a> {
    id: i64,
    cmd: &'a str,
    args: &'a str,
}

/// The data a rule template is rendered against.
pub struct RenderContext<'a> {
    pub req: &'a UpdateRequest,
    pub host: &'a Host,
    pub rule: &'a UpdateRule,
}

fn opt(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or("")
}

/// Render a template source against the request context.
///
/// Any parse or evaluation failure is fatal for the whole pipeline run.
pub fn render(source: &str, ctx: &RenderContext<'_>) -> CoreResult<String> {
    let env = Environment::new();
    let value = minijinja::context! {
        req => ReqView {
            token: &ctx.req.token,
            domain: &ctx.req.domain,
            ipaddr: opt(&ctx.req.ipaddr),
            ip6addr: opt(&ctx.req.ip6addr),
            ip6lanprefix: opt(&ctx.req.ip6lanprefix),
            ether: opt(&ctx.req.ether),
        },
        host => HostView {
            token: &ctx.host.token,
            name: &ctx.host.name,
            domain: &ctx.host.domain,
            zone: &ctx.host.zone,
            ip4addr: opt(&ctx.host.ip4addr),
            ip6addr: opt(&ctx.host.ip6addr),
        },
        rule => RuleView {
            id: ctx.rule.id,
            cmd: &ctx.rule.cmd,
            args: &ctx.rule.args,
        },
    };

    env.render_str(source, value)
        .map_err(|e| CoreError::Template(e.to_string()))
}
