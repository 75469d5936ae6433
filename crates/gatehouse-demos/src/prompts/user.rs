//! User-message templates
//!
//! Envelopes that wrap runtime data before it reaches an agent. Rendered
//! with minijinja so the template text stays readable next to the system
//! prompts.

use crate::error::Result;
use minijinja::{context, Environment};

const TRIAGE_ENVELOPE: &str = r"Customer {{ customer_id }} wrote:

{{ message }}

Classify this message.";

const CLAIM_PACKET: &str = r"Claim {{ claim_id }} under policy {{ policy_number }}.

Claim description:
{{ description }}

Review this claim from your specialty's perspective.";

const ADJUSTER_PACKET: &str = r"Specialist reports for claim {{ claim_id }}:

{% for report in reports %}--- {{ report.label }} ---
{{ report.body }}

{% endfor %}Produce your recommendation.";

/// Render the triage envelope for a customer message
pub fn triage_envelope(customer_id: &str, message: &str) -> Result<String> {
    render(
        "triage_envelope",
        TRIAGE_ENVELOPE,
        context! { customer_id, message },
    )
}

/// Render the claim packet sent to each specialist reviewer
pub fn claim_packet(claim_id: &str, policy_number: &str, description: &str) -> Result<String> {
    render(
        "claim_packet",
        CLAIM_PACKET,
        context! { claim_id, policy_number, description },
    )
}

/// One labeled specialist report for the adjuster packet
#[derive(Debug, serde::Serialize)]
pub struct LabeledReport {
    /// Which specialist produced the report
    pub label: String,
    /// The report text
    pub body: String,
}

/// Render the adjuster packet aggregating the specialist reports
pub fn adjuster_packet(claim_id: &str, reports: &[LabeledReport]) -> Result<String> {
    render(
        "adjuster_packet",
        ADJUSTER_PACKET,
        context! { claim_id, reports },
    )
}

fn render(name: &str, source: &str, ctx: minijinja::Value) -> Result<String> {
    let mut env = Environment::new();
    env.add_template(name, source)?;
    Ok(env.get_template(name)?.render(ctx)?)
}
