//! Ask command implementation
//!
//! Answers a free-text trade question from the route table.

use trade_routes::{AssistantReply, AssistantSettings, RouteTable, TradeAssistant};

use crate::render::{self, OutputFormat};
use crate::Result;

/// Run the ask command
pub fn run(
    table: &RouteTable,
    settings: AssistantSettings,
    question: &str,
    format: OutputFormat,
) -> Result<String> {
    let reply = TradeAssistant::with_settings(table, settings).answer(question);

    if format == OutputFormat::Json {
        return render::to_json(&reply);
    }

    let mut out = reply.message();
    out.push('\n');
    if let AssistantReply::Answer(answer) = &reply {
        if let Some(scenarios) = &answer.scenarios {
            let rows: Vec<Vec<String>> = scenarios
                .iter()
                .map(|s| {
                    vec![
                        s.name.clone(),
                        format!("{}%", s.tariff_rate),
                        format!("{}", s.exchange_rate),
                        render::money(s.final_price),
                    ]
                })
                .collect();
            out.push_str("\nScenario comparison\n");
            out.push_str(&render::table(
                &["Scenario", "Tariff", "Exchange Rate", "Final Price"],
                &rows,
            ));
        }
    }
    Ok(out)
}
