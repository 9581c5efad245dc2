//! Static description of the responders, served to clients.

use serde::Serialize;

use super::Intent;

/// Public profile of one responder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentProfile {
    #[serde(rename = "type")]
    pub agent_type: Intent,
    pub name: &'static str,
    pub description: &'static str,
    pub capabilities: &'static [&'static str],
}

/// What a responder can do and which records it reads.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCapabilities {
    #[serde(rename = "type")]
    pub agent_type: Intent,
    pub capabilities: &'static [&'static str],
    pub tools: &'static [&'static str],
}

/// The three responders, in display order.
pub fn agent_catalog() -> Vec<AgentProfile> {
    vec![
        AgentProfile {
            agent_type: Intent::Support,
            name: "Support Agent",
            description: "General inquiries & troubleshooting",
            capabilities: &["FAQs", "Account Help", "Technical Support"],
        },
        AgentProfile {
            agent_type: Intent::Order,
            name: "Order Agent",
            description: "Order status & tracking",
            capabilities: &["Track Orders", "Delivery Status", "Order Modifications"],
        },
        AgentProfile {
            agent_type: Intent::Billing,
            name: "Billing Agent",
            description: "Payments & refunds",
            capabilities: &["Invoices", "Refunds", "Payment Issues"],
        },
    ]
}

/// Capabilities of the responder for `intent`; `None` for `Fallback`.
pub fn agent_capabilities(intent: Intent) -> Option<AgentCapabilities> {
    let (capabilities, tools): (&'static [&'static str], &'static [&'static str]) = match intent {
        Intent::Support => (
            &[
                "Query conversation history",
                "Provide help articles",
                "Troubleshooting guides",
            ],
            &["getConversationHistory"],
        ),
        Intent::Order => (
            &[
                "Fetch order details",
                "Check delivery status",
                "Track shipments",
            ],
            &["getOrders", "trackOrder"],
        ),
        Intent::Billing => (
            &[
                "Get invoice details",
                "Check refund status",
                "View payment history",
            ],
            &["getBillingRecords", "getInvoices"],
        ),
        Intent::Fallback => return None,
    };

    Some(AgentCapabilities {
        agent_type: intent,
        capabilities,
        tools,
    })
}
