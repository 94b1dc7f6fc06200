//! Plain-text rendering of resolved views and API records.

use std::fmt::Write;

use bfx_client::{Contract, Document, RiskAssessment, Shipment};
use bfx_state::{lifecycle_steps, ContractView};

/// Render a resolved status view.
pub fn view(v: &ContractView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Status:     {} [{}]", v.label, v.color);
    if let Some(escrow) = v.escrow {
        let _ = writeln!(out, "Escrow:     {escrow}");
    }
    if let (Some(i), Some(label)) = (v.current_step, v.current_step_label()) {
        let _ = writeln!(out, "Step:       {label} ({}/{})", i + 1, lifecycle_steps().len());
    }
    match v.action {
        Some(action) => {
            let _ = writeln!(out, "Action:     {}", action.label());
        }
        None => {
            let _ = writeln!(out, "Action:     none");
        }
    }
    let _ = writeln!(out, "Milestones:");
    for m in &v.milestones {
        let mark = if m.completed { "x" } else { " " };
        match m.timestamp {
            Some(ts) => {
                let _ = writeln!(out, "  [{mark}] {:<18} {}", m.label, ts.to_date_string());
            }
            None => {
                let _ = writeln!(out, "  [{mark}] {}", m.label);
            }
        }
    }
    out
}

/// Render one contract with its resolved view.
pub fn contract(c: &Contract) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Contract:   {} ({})", c.title, c.id.as_str());
    if let Some(number) = &c.contract_number {
        let _ = writeln!(out, "Number:     {number}");
    }
    if let Some(buyer) = &c.buyer {
        let _ = writeln!(out, "Buyer:      {buyer}");
    }
    if let Some(seller) = &c.seller {
        let _ = writeln!(out, "Seller:     {seller}");
    }
    if let Some(value) = c.display_value() {
        let _ = writeln!(out, "Value:      {value}");
    }
    out.push_str(&view(&c.view()));
    out
}

/// One line per contract: id, status label, offered action, title.
pub fn contract_table(contracts: &[Contract]) -> String {
    let mut out = String::new();
    for c in contracts {
        let v = c.view();
        let action = v.action.map(|a| a.label()).unwrap_or("-");
        let _ = writeln!(
            out,
            "{:<16} {:<18} {:<18} {}",
            c.id.as_str(),
            v.label,
            action,
            c.title
        );
    }
    out
}

/// One line per document.
pub fn documents(docs: &[Document]) -> String {
    let mut out = String::new();
    for d in docs {
        let _ = writeln!(
            out,
            "{:<12} {:<24} {:<22} {}",
            d.id.as_str(),
            d.name,
            d.document_type.as_deref().unwrap_or("-"),
            d.status.as_deref().unwrap_or("-")
        );
    }
    out
}

/// One line per shipment.
pub fn shipments(items: &[Shipment]) -> String {
    let mut out = String::new();
    for s in items {
        let eta = s
            .estimated_arrival
            .map(|t| t.to_date_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{:<12} {:<12} {:<28} {:<12} eta {}",
            s.id.as_str(),
            s.carrier.as_deref().unwrap_or("-"),
            s.route(),
            s.status,
            eta
        );
    }
    out
}

/// Risk assessment summary.
pub fn risk(a: &RiskAssessment) -> String {
    let mut out = String::new();
    let score = a
        .score
        .map(|s| format!("{s:.1}"))
        .unwrap_or_else(|| "-".to_string());
    let _ = writeln!(
        out,
        "Risk:       {} (score {score})",
        a.level.as_deref().unwrap_or("unknown")
    );
    for f in &a.factors {
        match (f.score, &f.description) {
            (Some(s), _) => {
                let _ = writeln!(out, "  - {}: {s:.1}", f.name);
            }
            (None, Some(d)) => {
                let _ = writeln!(out, "  - {}: {d}", f.name);
            }
            (None, None) => {
                let _ = writeln!(out, "  - {}", f.name);
            }
        }
    }
    for r in &a.recommendations {
        let _ = writeln!(out, "  > {r}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use bfx_state::MilestoneTimes;

    #[test]
    fn draft_view_offers_approve() {
        let text = view(&ContractView::resolve("DRAFT", &MilestoneTimes::new()));
        assert!(text.contains("Status:     Draft [gray]"));
        assert!(text.contains("Action:     Approve Contract"));
        assert!(text.contains("Step:       Draft (1/7)"));
        assert!(text.contains("[x] Contract Created"));
        assert!(text.contains("[ ] Contract Approved"));
    }

    #[test]
    fn unknown_view_shows_raw_code() {
        let text = view(&ContractView::resolve("ON_HOLD", &MilestoneTimes::new()));
        assert!(text.contains("Status:     ON_HOLD [gray]"));
        assert!(text.contains("Action:     none"));
        assert!(!text.contains("Escrow:"));
        assert!(!text.contains("Step:"));
    }

    #[test]
    fn completed_view_shows_released() {
        let text = view(&ContractView::resolve("COMPLETED", &MilestoneTimes::new()));
        assert!(text.contains("Escrow:     Released"));
        assert!(!text.contains("[ ]"));
    }

    #[test]
    fn contract_table_lists_action() {
        let contracts: Vec<Contract> = serde_json::from_value(serde_json::json!([
            { "id": "c-1", "title": "Cocoa", "status": "GOODSRECEIVED" },
            { "id": "c-2", "title": "Coffee", "status": "ACTIVE" }
        ]))
        .unwrap();
        let table = contract_table(&contracts);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Release Funds"));
        assert!(lines[1].contains(" - "));
    }

    #[test]
    fn contract_includes_value_and_milestone_dates() {
        let c: Contract = serde_json::from_value(serde_json::json!({
            "id": "c-1",
            "title": "Cocoa",
            "status": "FUNDED",
            "value": "125000.00",
            "currency": "USD",
            "createdAt": "2026-02-01T09:00:00Z"
        }))
        .unwrap();
        let text = contract(&c);
        assert!(text.contains("Value:      125000.00 USD"));
        assert!(text.contains("2026-02-01"));
    }
}
